// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The glyph interface consumed by the packer.

use crate::kurbo::{Rect, Vec2};

/// A glyph shape that can be laid out in a grid cell.
///
/// Shape bounds use a y-up convention: `x0` is the left edge, `y0` the bottom,
/// `x1` the right edge and `y1` the top, all in shape units.
pub trait GridGlyph {
    /// Whether the glyph has no visible shape. Whitespace glyphs get no cell.
    fn is_whitespace(&self) -> bool;

    /// Factor converting shape units to font units.
    fn geometry_scale(&self) -> f64;

    /// Axis-aligned bounds of the shape in shape units.
    fn shape_bounds(&self) -> Rect;

    /// Expands `bounds` to cover miter joins of an outline offset by `border`.
    ///
    /// Joins sharper than `miter_limit` are clipped. `polarity` selects which side
    /// of the outline is offset. The default implementation suits shapes without
    /// sharp corners and returns `bounds` unchanged.
    fn bound_miters(&self, bounds: Rect, border: f64, miter_limit: f64, polarity: i32) -> Rect {
        let _ = (border, miter_limit, polarity);
        bounds
    }

    /// Records the glyph's box inside a cell of the given frame.
    fn frame_box(&mut self, frame: &CellFrame);

    /// Records the pixel origin of the glyph's cell within the atlas.
    fn place_box(&mut self, x: i32, y: i32);
}

/// Parameters for framing a glyph inside its cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellFrame {
    /// Pixels per font unit.
    pub scale: f64,
    /// Total distance range in font units.
    pub range: f64,
    /// Miter limit used for bounds, zero when miters are ignored.
    pub miter_limit: f64,
    /// Usable cell width in pixels (padding excluded).
    pub width: i32,
    /// Usable cell height in pixels (padding excluded).
    pub height: i32,
    /// Shared horizontal origin in font units, if the origin is fixed.
    pub fixed_x: Option<f64>,
    /// Shared vertical origin in font units, if the origin is fixed.
    pub fixed_y: Option<f64>,
}

/// The box a [`ShapeGlyph`] recorded in [`GridGlyph::frame_box`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphFrame {
    /// Pixels per shape unit.
    pub scale: f64,
    /// Distance range in shape units.
    pub range: f64,
    /// Offset in shape units from the shape origin to the cell's lower-left corner.
    pub translate: Vec2,
    /// Cell width in pixels.
    pub width: i32,
    /// Cell height in pixels.
    pub height: i32,
}

impl GlyphFrame {
    /// The shape bounds mapped into cell pixel coordinates.
    #[must_use]
    pub fn pixel_bounds(&self, shape_bounds: Rect) -> Rect {
        Rect::new(
            (shape_bounds.x0 + self.translate.x) * self.scale,
            (shape_bounds.y0 + self.translate.y) * self.scale,
            (shape_bounds.x1 + self.translate.x) * self.scale,
            (shape_bounds.y1 + self.translate.y) * self.scale,
        )
    }
}

/// A glyph whose shape is fully described by its bounding box.
///
/// Records the frame and placement it receives from the packer, which makes it
/// useful both for plain rectangular content and for inspecting a layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeGlyph {
    bounds: Rect,
    geometry_scale: f64,
    whitespace: bool,
    frame: Option<GlyphFrame>,
    origin: Option<(i32, i32)>,
}

impl ShapeGlyph {
    /// Creates a glyph with the given shape bounds and a geometry scale of 1.
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            geometry_scale: 1.0,
            whitespace: false,
            frame: None,
            origin: None,
        }
    }

    /// Creates a whitespace glyph.
    #[must_use]
    pub fn whitespace() -> Self {
        Self {
            whitespace: true,
            ..Self::new(Rect::ZERO)
        }
    }

    /// Sets the factor converting shape units to font units.
    #[must_use]
    pub fn with_geometry_scale(mut self, geometry_scale: f64) -> Self {
        self.geometry_scale = geometry_scale;
        self
    }

    /// The frame recorded by the last pack, if the glyph was placed.
    pub fn frame(&self) -> Option<&GlyphFrame> {
        self.frame.as_ref()
    }

    /// The cell origin recorded by the last pack, if the glyph was placed.
    pub fn origin(&self) -> Option<(i32, i32)> {
        self.origin
    }

    /// The shape bounds in atlas pixel coordinates, once framed and placed.
    pub fn atlas_bounds(&self) -> Option<Rect> {
        let frame = self.frame?;
        let (x, y) = self.origin?;
        Some(frame.pixel_bounds(self.bounds) + Vec2::new(f64::from(x), f64::from(y)))
    }

    /// Forgets any recorded frame and placement.
    pub fn reset(&mut self) {
        self.frame = None;
        self.origin = None;
    }
}

impl GridGlyph for ShapeGlyph {
    fn is_whitespace(&self) -> bool {
        self.whitespace
    }

    fn geometry_scale(&self) -> f64 {
        self.geometry_scale
    }

    fn shape_bounds(&self) -> Rect {
        self.bounds
    }

    fn frame_box(&mut self, frame: &CellFrame) {
        let scale = frame.scale * self.geometry_scale;
        let range = frame.range / self.geometry_scale;
        let border = 0.5 * range;
        let mut padded = self.bounds.inflate(border, border);
        if frame.miter_limit > 0.0 {
            padded = self.bound_miters(padded, border, frame.miter_limit, 1);
        }
        // Centers the padded shape on any axis without a shared origin.
        let center = |lo: f64, hi: f64, cell: i32| {
            -lo + 0.5 * (f64::from(cell) - scale * (hi - lo)) / scale
        };
        let translate = Vec2::new(
            frame.fixed_x.map_or_else(
                || center(padded.x0, padded.x1, frame.width),
                |x| x / self.geometry_scale,
            ),
            frame.fixed_y.map_or_else(
                || center(padded.y0, padded.y1, frame.height),
                |y| y / self.geometry_scale,
            ),
        );
        self.frame = Some(GlyphFrame {
            scale,
            range,
            translate,
            width: frame.width,
            height: frame.height,
        });
    }

    fn place_box(&mut self, x: i32, y: i32) {
        self.origin = Some((x, y));
    }
}
