// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Finding the largest glyph scale that fits a cell.
//!
//! The distance range has a pixel component that does not grow with the scale,
//! so a glyph's pixel extent is `scale * unit_extent + pixel_range`. Without
//! miter expansion this is affine in the scale and the fitting scale has a
//! closed form. Miter bounds depend on the range in shape units, which depends
//! on the scale, so in that case the scale is found by bisection over the
//! fit predicate.

use log::trace;

use crate::GridGlyph;
use crate::bounds::{BoundsOptions, MaxBounds, max_bounds};

/// Stand-in size for a cell side that is not constrained.
const UNBOUNDED_CELL: i32 = 1 << 28;

/// Scales beyond these are treated as unreachable.
const MAX_SCALE: f64 = 1e32;
const MIN_SCALE: f64 = 1e-32;

/// Smallest tolerance the bisection will honor.
const MIN_TOLERANCE: f64 = 1e-12;

/// Fits glyph scales to cell sizes for one glyph set.
#[derive(Debug)]
pub(crate) struct ScaleFitter<'a, G> {
    glyphs: &'a [G],
    options: BoundsOptions,
    padding: i32,
    unit_range: f64,
    px_range: f64,
    tolerance: f64,
    /// Bounds at scale 1 without the pixel range, when extents are affine in the scale.
    affine: Option<MaxBounds>,
}

impl<'a, G: GridGlyph> ScaleFitter<'a, G> {
    pub(crate) fn new(
        glyphs: &'a [G],
        options: BoundsOptions,
        padding: i32,
        unit_range: f64,
        px_range: f64,
        tolerance: f64,
    ) -> Self {
        let affine = (px_range == 0.0 || options.miter_limit <= 0.0)
            .then(|| max_bounds(glyphs, &options, 1.0, unit_range));
        Self {
            glyphs,
            options,
            padding,
            unit_range,
            px_range,
            tolerance: tolerance.max(MIN_TOLERANCE),
            affine,
        }
    }

    /// Glyph bounds at `scale`, including the full distance range.
    pub(crate) fn bounds_at(&self, scale: f64) -> MaxBounds {
        max_bounds(
            self.glyphs,
            &self.options,
            scale,
            self.unit_range + self.px_range / scale,
        )
    }

    /// The largest scale at which every glyph fits the usable part of the cell.
    ///
    /// A `None` side is unconstrained. Returns 0 when no usable scale exists.
    pub(crate) fn fit(&self, cell_width: Option<i32>, cell_height: Option<i32>) -> f64 {
        match &self.affine {
            Some(unit) => self.fit_affine(unit, cell_width, cell_height),
            None => self.bisect(
                cell_width.unwrap_or(UNBOUNDED_CELL),
                cell_height.unwrap_or(UNBOUNDED_CELL),
            ),
        }
    }

    fn fit_affine(
        &self,
        unit: &MaxBounds,
        cell_width: Option<i32>,
        cell_height: Option<i32>,
    ) -> f64 {
        let axis = |cell: Option<i32>, extent: f64| {
            let cell = cell.filter(|_| extent > 0.0)?;
            Some((f64::from(cell - self.padding) - self.px_range) / extent)
        };
        match (axis(cell_width, unit.width), axis(cell_height, unit.height)) {
            (Some(h), Some(v)) => h.min(v),
            (Some(scale), None) | (None, Some(scale)) => scale,
            (None, None) => 0.0,
        }
    }

    /// Brackets the fitting scale by doubling or halving from 1, then bisects
    /// until the bracket's ratio is within tolerance.
    fn bisect(&self, cell_width: i32, cell_height: i32) -> f64 {
        let width = f64::from(cell_width - self.padding);
        let height = f64::from(cell_height - self.padding);
        let fits = |scale: f64| self.bounds_at(scale).fits(width, height);

        let mut lo = 1.0;
        let mut hi = 1.0;
        if fits(1.0) {
            while hi < MAX_SCALE {
                hi = 2.0 * lo;
                if !fits(hi) {
                    break;
                }
                lo = hi;
            }
        } else {
            while lo > MIN_SCALE {
                lo = 0.5 * hi;
                if fits(lo) {
                    break;
                }
                hi = lo;
            }
        }
        if lo == hi {
            return 0.0;
        }
        trace!("scale bracket {lo}..{hi} for {cell_width}x{cell_height} cells");
        while lo / hi < 1.0 - self.tolerance {
            let mid = 0.5 * (lo + hi);
            if fits(mid) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }
}
