// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Assigning glyphs to grid cells.

use crate::{CellFrame, GridGlyph};

/// A fully resolved grid, in atlas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CellGrid {
    pub(crate) columns: i32,
    pub(crate) rows: i32,
    pub(crate) cell_width: i32,
    pub(crate) cell_height: i32,
    /// Atlas height; rows are counted from the top.
    pub(crate) height: i32,
}

/// Frames and places every non-whitespace glyph in row-major order.
///
/// Stops once the grid is full and returns the number of non-whitespace glyphs
/// left without a cell. Glyphs placed before that keep their placement.
pub(crate) fn place_glyphs<G: GridGlyph>(
    glyphs: &mut [G],
    grid: &CellGrid,
    frame: &CellFrame,
) -> usize {
    let capacity = grid.columns.saturating_mul(grid.rows).max(0);
    let mut cells = glyphs.iter_mut().filter(|glyph| !glyph.is_whitespace());
    // The range goes first so a full grid does not pull one more glyph.
    for (index, glyph) in (0..capacity).zip(cells.by_ref()) {
        let (row, column) = (index / grid.columns, index % grid.columns);
        glyph.frame_box(frame);
        glyph.place_box(
            column * grid.cell_width,
            grid.height - (row + 1) * grid.cell_height,
        );
    }
    cells.count()
}

#[cfg(test)]
mod tests {
    use super::{CellGrid, place_glyphs};
    use crate::kurbo::Rect;
    use crate::{CellFrame, ShapeGlyph};

    const FRAME: CellFrame = CellFrame {
        scale: 1.0,
        range: 0.0,
        miter_limit: 0.0,
        width: 10,
        height: 10,
        fixed_x: None,
        fixed_y: None,
    };

    fn glyph() -> ShapeGlyph {
        ShapeGlyph::new(Rect::new(0.0, 0.0, 8.0, 8.0))
    }

    #[test]
    fn rows_start_at_the_top() {
        let mut glyphs = [glyph(), ShapeGlyph::whitespace(), glyph(), glyph()];
        let grid = CellGrid {
            columns: 2,
            rows: 2,
            cell_width: 10,
            cell_height: 10,
            height: 20,
        };
        assert_eq!(place_glyphs(&mut glyphs, &grid, &FRAME), 0);
        assert_eq!(glyphs[0].origin(), Some((0, 10)));
        assert_eq!(glyphs[1].origin(), None);
        assert_eq!(glyphs[2].origin(), Some((10, 10)));
        assert_eq!(glyphs[3].origin(), Some((0, 0)));
    }

    #[test]
    fn overflow_counts_remaining_glyphs() {
        let mut glyphs = [glyph(), glyph(), glyph(), ShapeGlyph::whitespace(), glyph()];
        let grid = CellGrid {
            columns: 1,
            rows: 2,
            cell_width: 10,
            cell_height: 10,
            height: 20,
        };
        assert_eq!(place_glyphs(&mut glyphs, &grid, &FRAME), 2);
        assert!(glyphs[1].frame().is_some());
        assert_eq!(glyphs[2].frame(), None);
        assert_eq!(glyphs[4].origin(), None);
    }

    #[test]
    fn full_grid_stops_the_walk() {
        let mut glyphs = [glyph(), ShapeGlyph::whitespace(), glyph(), glyph()];
        let grid = CellGrid {
            columns: 1,
            rows: 1,
            cell_width: 10,
            cell_height: 10,
            height: 10,
        };
        assert_eq!(place_glyphs(&mut glyphs, &grid, &FRAME), 2);
        assert_eq!(glyphs[0].origin(), Some((0, 0)));
        assert_eq!(glyphs[2].frame(), None);
        assert_eq!(glyphs[3].frame(), None);
    }

    #[test]
    fn wide_grid_places_in_one_row() {
        let mut glyphs = [glyph(), glyph(), glyph()];
        let grid = CellGrid {
            columns: i32::MAX,
            rows: 1,
            cell_width: 10,
            cell_height: 10,
            height: 10,
        };
        assert_eq!(place_glyphs(&mut glyphs, &grid, &FRAME), 0);
        assert_eq!(glyphs[2].origin(), Some((20, 0)));
    }
}
