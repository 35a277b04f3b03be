// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph sets and helpers shared by the tests.

use grid_atlas::{CellFrame, GridGlyph, GridLayout, ShapeGlyph};
use peniko::kurbo::Rect;

/// `count` glyphs of `width` by `height` font units.
pub(crate) fn boxes(count: usize, width: f64, height: f64) -> Vec<ShapeGlyph> {
    (0..count)
        .map(|_| ShapeGlyph::new(Rect::new(0.0, 0.0, width, height)))
        .collect()
}

/// A glyph with a spike on top whose miter join grows with the border.
///
/// Up to a miter limit of 2 the spike extends the top edge by
/// `border * (miter_limit - 1)`.
#[derive(Clone, Debug)]
pub(crate) struct SpikeGlyph {
    bounds: Rect,
    pub(crate) frame: Option<CellFrame>,
    pub(crate) origin: Option<(i32, i32)>,
}

impl SpikeGlyph {
    pub(crate) fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            frame: None,
            origin: None,
        }
    }
}

impl GridGlyph for SpikeGlyph {
    fn is_whitespace(&self) -> bool {
        false
    }

    fn geometry_scale(&self) -> f64 {
        1.0
    }

    fn shape_bounds(&self) -> Rect {
        self.bounds
    }

    fn bound_miters(&self, bounds: Rect, border: f64, miter_limit: f64, _polarity: i32) -> Rect {
        let spike = border * (miter_limit.min(2.0) - 1.0).max(0.0);
        Rect {
            y1: bounds.y1 + spike,
            ..bounds
        }
    }

    fn frame_box(&mut self, frame: &CellFrame) {
        self.frame = Some(*frame);
    }

    fn place_box(&mut self, x: i32, y: i32) {
        self.origin = Some((x, y));
    }
}

/// Checks the relations every resolved layout satisfies.
pub(crate) fn assert_consistent(layout: &GridLayout, padding: u32, glyph_count: u32) {
    assert!(
        layout.columns * layout.rows >= glyph_count,
        "{layout:?} has no room for {glyph_count} glyphs"
    );
    assert!(
        layout.columns * layout.cell_width <= layout.width + padding,
        "{layout:?} columns overrun the atlas width"
    );
    assert!(
        layout.rows * layout.cell_height <= layout.height + padding,
        "{layout:?} rows overrun the atlas height"
    );
    assert!(layout.scale > 0.0, "{layout:?} has no scale");
}

/// Checks that every placed glyph lies inside the usable part of its cell, and
/// that the cell stays within the atlas.
///
/// The bottom row starts `padding` pixels below the atlas, where only padding falls.
pub(crate) fn assert_inside_cells(glyphs: &[ShapeGlyph], layout: &GridLayout, padding: u32) {
    const SLACK: f64 = 1e-9;
    let padding = f64::from(padding);
    for (index, glyph) in glyphs.iter().enumerate() {
        let (Some(bounds), Some((x, y))) = (glyph.atlas_bounds(), glyph.origin()) else {
            continue;
        };
        let (x, y) = (f64::from(x), f64::from(y));
        let cell = Rect::new(
            x,
            y,
            x + f64::from(layout.cell_width) - padding,
            y + f64::from(layout.cell_height) - padding,
        );
        assert!(
            bounds.x0 >= cell.x0 - SLACK
                && bounds.y0 >= cell.y0 - SLACK
                && bounds.x1 <= cell.x1 + SLACK
                && bounds.y1 <= cell.y1 + SLACK,
            "glyph {index} at {bounds:?} leaves its cell {cell:?}"
        );
        assert!(
            cell.x0 >= 0.0
                && cell.y0 >= -padding
                && cell.x1 <= f64::from(layout.width)
                && cell.y1 <= f64::from(layout.height),
            "cell {cell:?} of glyph {index} leaves the atlas"
        );
    }
}
