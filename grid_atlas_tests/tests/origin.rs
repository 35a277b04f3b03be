// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyphs sharing one origin across all cells.

use grid_atlas::{GridAtlasPacker, ShapeGlyph};
use peniko::kurbo::{Rect, Vec2};

fn glyphs() -> [ShapeGlyph; 2] {
    [
        ShapeGlyph::new(Rect::new(0.0, 0.0, 10.0, 5.0)),
        ShapeGlyph::new(Rect::new(2.0, -3.0, 6.0, 7.0)),
    ]
}

#[test]
fn origin_fixed_on_both_axes() {
    let mut glyphs = glyphs();
    let mut packer = GridAtlasPacker::new();
    packer.set_fixed_origin(true, true);
    packer.set_cell_dimensions(30, 30);

    assert_eq!(packer.pack(&mut glyphs), Ok(0));
    assert_eq!(packer.scale(), Some(3.0));
    for glyph in &glyphs {
        assert_eq!(glyph.frame().unwrap().translate, Vec2::new(0.0, 3.0));
    }
    assert_eq!(
        glyphs[0].atlas_bounds(),
        Some(Rect::new(0.0, 9.0, 30.0, 24.0))
    );
    assert_eq!(
        glyphs[1].atlas_bounds(),
        Some(Rect::new(36.0, 0.0, 48.0, 30.0))
    );

    let origin = packer.fixed_origin();
    let half_pixel = 0.5 / 3.0;
    assert!((origin.x + half_pixel).abs() < 1e-12, "origin {origin:?}");
    assert!((origin.y - (3.0 - half_pixel)).abs() < 1e-12, "origin {origin:?}");
}

#[test]
fn origin_fixed_vertically_centers_horizontally() {
    let mut glyphs = glyphs();
    let mut packer = GridAtlasPacker::new();
    packer.set_fixed_origin(false, true);
    packer.set_cell_dimensions(30, 30);

    assert_eq!(packer.pack(&mut glyphs), Ok(0));
    let frame = glyphs[1].frame().unwrap();
    assert_eq!(frame.translate, Vec2::new(1.0, 3.0));
    assert_eq!(
        frame.pixel_bounds(Rect::new(2.0, -3.0, 6.0, 7.0)),
        Rect::new(9.0, 0.0, 21.0, 30.0)
    );
}

#[test]
fn origin_fixed_cells_cover_the_union() {
    let stacked = || {
        [
            ShapeGlyph::new(Rect::new(0.0, 0.0, 10.0, 5.0)),
            ShapeGlyph::new(Rect::new(0.0, 5.0, 10.0, 10.0)),
        ]
    };

    let mut packer = GridAtlasPacker::new();
    assert_eq!(packer.pack(&mut stacked()), Ok(0));
    assert_eq!(packer.cell_dimensions(), Some((10, 5)));

    let mut packer = GridAtlasPacker::new();
    packer.set_fixed_origin(false, true);
    assert_eq!(packer.pack(&mut stacked()), Ok(0));
    assert_eq!(packer.cell_dimensions(), Some((10, 10)));
}
