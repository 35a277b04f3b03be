// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Worst-case glyph extents at a given scale.

use crate::GridGlyph;
use crate::kurbo::Rect;

/// Options shared by every bounds query in one solve.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct BoundsOptions {
    pub(crate) miter_limit: f64,
    pub(crate) fixed_x: bool,
    pub(crate) fixed_y: bool,
}

/// The reduction of all glyph boxes at one scale, in atlas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct MaxBounds {
    /// Union of all glyph boxes, or [`Rect::ZERO`] if nothing contributed.
    pub(crate) union: Rect,
    /// Width a cell must fit (widest glyph, or the union when the x origin is fixed).
    pub(crate) width: f64,
    /// Height a cell must fit (tallest glyph, or the union when the y origin is fixed).
    pub(crate) height: f64,
}

impl MaxBounds {
    pub(crate) fn fits(&self, width: f64, height: f64) -> bool {
        self.width <= width && self.height <= height
    }
}

/// Measures every non-whitespace glyph at `scale` with a total distance `range`
/// in font units.
pub(crate) fn max_bounds<G: GridGlyph>(
    glyphs: &[G],
    options: &BoundsOptions,
    scale: f64,
    range: f64,
) -> MaxBounds {
    let mut union: Option<Rect> = None;
    let mut max_width = 0.0_f64;
    let mut max_height = 0.0_f64;
    for glyph in glyphs.iter().filter(|glyph| !glyph.is_whitespace()) {
        let geometry_scale = glyph.geometry_scale();
        let border = 0.5 * range / geometry_scale;
        let mut bounds = glyph.shape_bounds().inflate(border, border);
        if options.miter_limit > 0.0 {
            bounds = glyph.bound_miters(bounds, border, options.miter_limit, 1);
        }
        let bounds = bounds.scale_from_origin(geometry_scale * scale);
        union = Some(union.map_or(bounds, |union| union.union(bounds)));
        max_width = max_width.max(bounds.width());
        max_height = max_height.max(bounds.height());
    }
    let union = union
        .filter(|union| union.x0 < union.x1 && union.y0 < union.y1)
        .unwrap_or(Rect::ZERO);
    if options.fixed_x {
        max_width = union.width();
    }
    if options.fixed_y {
        max_height = union.height();
    }
    MaxBounds {
        union,
        width: max_width,
        height: max_height,
    }
}
