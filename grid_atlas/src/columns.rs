// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choosing the number of grid columns.

use log::trace;

use crate::DimensionsConstraint;
use crate::GridGlyph;
use crate::scale::ScaleFitter;

/// `ceil(a / b)` for positive operands.
pub(crate) fn ceil_div(a: i32, b: i32) -> i32 {
    a / b + i32::from(a % b != 0)
}

/// Column counts worth considering for `cell_count` cells.
///
/// Every row count `r` is best served by `ceil(n / r)` columns, so walking `q`
/// from `isqrt(n) + 1` down to 1 and yielding both `q` and `ceil(n / q)` covers
/// every useful grid shape without visiting all column counts. Callers keep the
/// first of equally good candidates, so this order decides ties.
pub(crate) fn column_candidates(cell_count: i32) -> impl Iterator<Item = i32> {
    let cell_count = cell_count.max(1);
    (1..=cell_count.isqrt() + 1)
        .rev()
        .flat_map(move |q| [q, ceil_div(cell_count, q)])
}

/// A grid shape and the scale it allows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ColumnChoice {
    pub(crate) columns: i32,
    pub(crate) rows: i32,
    pub(crate) cell_width: i32,
    pub(crate) cell_height: i32,
    pub(crate) scale: f64,
}

/// Inputs shared by both column searches.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ColumnSearch {
    pub(crate) cell_count: i32,
    pub(crate) padding: i32,
    /// Preference for column counts that divide the atlas width exactly.
    pub(crate) aligned_bias: f64,
}

impl ColumnSearch {
    /// Picks the grid that maximizes glyph scale within a fixed atlas size.
    ///
    /// A column count that divides the width exactly is preferred when its
    /// scale is at least `min_scale` and within `1 + aligned_bias` of the best.
    /// Returns `None` if no column count leaves room for a cell.
    pub(crate) fn best_for_scale<G: GridGlyph>(
        &self,
        fitter: &ScaleFitter<'_, G>,
        width: i32,
        height: i32,
        cell_constraint: DimensionsConstraint,
        min_scale: f64,
    ) -> Option<ColumnChoice> {
        let mut best: Option<ColumnChoice> = None;
        let mut best_aligned: Option<ColumnChoice> = None;
        for columns in column_candidates(self.cell_count) {
            let rows = ceil_div(self.cell_count, columns);
            let cell_width = width.saturating_add(self.padding) / columns;
            let cell_height = height.saturating_add(self.padding) / rows;
            if cell_width <= 0 || cell_height <= 0 {
                continue;
            }
            let (cell_width, cell_height) = cell_constraint.lower(cell_width, cell_height);
            let choice = ColumnChoice {
                columns,
                rows,
                cell_width,
                cell_height,
                scale: fitter.fit(Some(cell_width), Some(cell_height)),
            };
            trace!(
                "{columns}x{rows} grid of {cell_width}x{cell_height} cells fits scale {}",
                choice.scale
            );
            if best.is_none_or(|best| choice.scale > best.scale) {
                best = Some(choice);
            }
            if columns * cell_width == width
                && choice.scale > best_aligned.map_or(0.0, |aligned| aligned.scale)
            {
                best_aligned = Some(choice);
            }
        }
        let best = best?;
        match best_aligned {
            Some(aligned)
                if aligned.scale >= min_scale
                    && (1.0 + self.aligned_bias) * aligned.scale >= best.scale =>
            {
                Some(aligned)
            }
            _ => Some(best),
        }
    }

    /// Picks the column count giving the smallest atlas for fixed cells.
    ///
    /// Atlas sizes are raised to `constraint` and rated by the sum of squared
    /// sides, discounted by `aligned_bias` when raising left the width unchanged.
    pub(crate) fn best_for_area(
        &self,
        cell_width: i32,
        cell_height: i32,
        constraint: DimensionsConstraint,
    ) -> i32 {
        let mut best: Option<(f64, i32)> = None;
        for columns in column_candidates(self.cell_count) {
            let rows = ceil_div(self.cell_count, columns);
            let width = columns.saturating_mul(cell_width);
            let height = rows.saturating_mul(cell_height);
            let (raised_width, raised_height) = constraint.raise(width, height);
            let rating = self.rating(raised_width, raised_height, raised_width == width);
            trace!("{columns} columns: {raised_width}x{raised_height} atlas rated {rating}");
            if best.is_none_or(|(best_rating, _)| rating < best_rating) {
                best = Some((rating, columns));
            }
        }
        best.map_or(1, |(_, columns)| columns)
    }

    fn rating(&self, width: i32, height: i32, aligned: bool) -> f64 {
        let (width, height) = (f64::from(width), f64::from(height));
        let discount = if aligned { 1.0 - self.aligned_bias } else { 1.0 };
        (width * width + height * height) * discount
    }
}
