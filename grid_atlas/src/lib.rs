// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid layout for signed distance field glyph atlases.
//!
//! [`GridAtlasPacker`] places every glyph of a set into a uniform grid of equally
//! sized cells, all rendered at one common scale. The caller pins whichever of
//! columns, rows, atlas size, cell size and scale matter to them and the packer
//! derives the rest:
//!
//! - with cells known, the largest scale that fits them is found,
//! - with only the atlas size known, the column count giving the largest scale
//!   is chosen,
//! - with neither, cells are sized for the minimum scale and the atlas is kept
//!   as small and square as the [`DimensionsConstraint`] allows.
//!
//! Each glyph is grown by a distance range with a part in font units and a part
//! in pixels, so the fitting scale is solved in closed form when it can be and
//! by bisection when miter joins make glyph extents depend on the scale.
//!
//! Glyphs are supplied through the [`GridGlyph`] trait. [`ShapeGlyph`] is a
//! ready-made implementation for glyphs described by their bounding box.
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! ## Example
//!
//! ```
//! use grid_atlas::{DimensionsConstraint, GridAtlasPacker, ShapeGlyph, kurbo::Rect};
//!
//! let mut glyphs: Vec<ShapeGlyph> = (0..10_i32)
//!     .map(|i| ShapeGlyph::new(Rect::new(0.0, -2.0, 6.0 + f64::from(i), 10.0)))
//!     .collect();
//!
//! let mut packer = GridAtlasPacker::new();
//! packer.set_dimensions_constraint(DimensionsConstraint::PowerOfTwoSquare);
//! packer.set_minimum_scale(2.0);
//! packer.set_pixel_range(4.0);
//! packer.set_padding(1);
//!
//! assert_eq!(packer.pack(&mut glyphs), Ok(0));
//! let layout = packer.layout().unwrap();
//! assert!(layout.columns * layout.rows >= 10);
//! assert!(layout.width.is_power_of_two());
//! assert_eq!(layout.width, layout.height);
//! ```
//!
//! [libm]: https://crates.io/crates/libm

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("grid_atlas requires either the `std` or `libm` feature to be enabled");

#[cfg(feature = "std")]
extern crate std;

pub use peniko::kurbo;

mod bounds;
mod columns;
mod constraint;
mod error;
mod glyph;
mod packer;
mod placement;
mod scale;
mod util;

pub use constraint::{DimensionsConstraint, ParseDimensionsConstraintError};
pub use error::{ErrorKind, PackError};
pub use glyph::{CellFrame, GlyphFrame, GridGlyph, ShapeGlyph};
pub use packer::{GridAtlasPacker, GridLayout};
