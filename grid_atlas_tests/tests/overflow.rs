// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyphs that do not fit a pinned grid.

use grid_atlas::{ErrorKind, GridAtlasPacker, ShapeGlyph};
use peniko::kurbo::Rect;

use crate::util::boxes;

#[test]
fn overflow_reports_unplaced_count() {
    let mut glyphs = boxes(6, 10.0, 10.0);
    let mut packer = GridAtlasPacker::new();
    packer.set_columns(2);
    packer.set_rows(2);
    packer.set_cell_dimensions(10, 10);

    assert_eq!(packer.pack(&mut glyphs), Ok(2));
    let placed: Vec<_> = glyphs.iter().map(ShapeGlyph::origin).collect();
    assert_eq!(
        placed,
        [
            Some((0, 10)),
            Some((10, 10)),
            Some((0, 0)),
            Some((10, 0)),
            None,
            None,
        ]
    );
    // The layout still resolves for the glyphs that did fit.
    assert_eq!(packer.dimensions(), Some((20, 20)));
}

#[test]
fn overflow_ignores_whitespace() {
    let glyph = || ShapeGlyph::new(Rect::new(0.0, 0.0, 10.0, 10.0));
    let mut glyphs = vec![
        glyph(),
        ShapeGlyph::whitespace(),
        glyph(),
        glyph(),
        glyph(),
        ShapeGlyph::whitespace(),
        glyph(),
    ];
    let mut packer = GridAtlasPacker::new();
    packer.set_columns(2);
    packer.set_rows(2);
    packer.set_cell_dimensions(10, 10);

    assert_eq!(packer.pack(&mut glyphs), Ok(1));
    assert_eq!(glyphs[1].origin(), None);
    assert_eq!(glyphs[4].origin(), Some((10, 0)));
    assert_eq!(glyphs[6].origin(), None);
}

#[test]
fn overflow_free_with_pinned_atlas_and_cells() {
    let mut glyphs = boxes(5, 10.0, 10.0);
    let mut packer = GridAtlasPacker::new();
    packer.set_dimensions(30, 20);
    packer.set_cell_dimensions(10, 10);

    assert_eq!(packer.pack(&mut glyphs), Ok(0));
    assert_eq!((packer.columns(), packer.rows()), (Some(3), Some(2)));
    assert_eq!(glyphs[4].origin(), Some((10, 0)));
}

#[test]
fn overflow_cell_wider_than_atlas() {
    let mut glyphs = boxes(3, 10.0, 10.0);
    let mut packer = GridAtlasPacker::new();
    packer.set_dimensions(8, 40);
    packer.set_cell_dimensions(12, 12);
    packer.set_minimum_scale(0.5);

    let error = packer.pack(&mut glyphs).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NoFeasibleLayout);
    assert_eq!(packer.columns(), None);
}

#[test]
fn overflow_rows_cut_to_pinned_height() {
    let mut glyphs = boxes(5, 10.0, 10.0);
    let mut packer = GridAtlasPacker::new();
    packer.set_dimensions(20, 20);
    packer.set_cell_dimensions(10, 10);

    assert_eq!(packer.pack(&mut glyphs), Ok(1));
    assert_eq!((packer.columns(), packer.rows()), (Some(2), Some(2)));
    assert_eq!(glyphs[3].origin(), Some((10, 0)));
    assert_eq!(glyphs[4].origin(), None);
    assert!(glyphs[..4].iter().all(|glyph| glyph.origin().is_some_and(|(_, y)| y >= 0)));
}

#[test]
fn overflow_pinned_rows_taller_than_atlas() {
    let mut glyphs = boxes(5, 10.0, 10.0);
    let mut packer = GridAtlasPacker::new();
    packer.set_dimensions(20, 20);
    packer.set_cell_dimensions(10, 10);
    packer.set_rows(3);

    let error = packer.pack(&mut glyphs).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NoFeasibleLayout);
    assert_eq!(packer.columns(), None);
}
