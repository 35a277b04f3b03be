// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `grid_atlas`.
//!
//! - The `util` module holds glyph sets and a recording glyph shared by the tests.
//! - Tests are grouped by topic: `layout` for the ways a grid gets resolved, `scale` for
//!   scale fitting, `overflow` for glyphs that do not fit, and `origin` for shared origins.
//! - Put the topic at the start of a test name, e.g. `scale_grows_with_cells`.

#![allow(missing_docs, reason = "we don't need docs for testing")]

mod origin;
mod overflow;
mod util;
