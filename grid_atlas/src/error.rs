// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error returned when a packer configuration cannot be satisfied.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the cell dimensions and scales
/// that were in effect when the solve gave up. The configuration has to be
/// changed before packing again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackError {
    kind: ErrorKind,
    cell_width: Option<u32>,
    cell_height: Option<u32>,
    scale: Option<f64>,
    minimum_scale: f64,
}

impl PackError {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Cell dimensions in effect when the error occurred, where they were known.
    pub fn cell_dimensions(&self) -> (Option<u32>, Option<u32>) {
        (self.cell_width, self.cell_height)
    }

    /// The best scale that was found, for [`ErrorKind::ScaleBelowMinimum`].
    pub fn scale(&self) -> Option<f64> {
        self.scale
    }

    /// The minimum scale the configuration asked for.
    pub fn minimum_scale(&self) -> f64 {
        self.minimum_scale
    }

    fn new(kind: ErrorKind, cell_width: Option<i32>, cell_height: Option<i32>) -> Self {
        Self {
            kind,
            cell_width: cell_width.and_then(|w| u32::try_from(w).ok()),
            cell_height: cell_height.and_then(|h| u32::try_from(h).ok()),
            scale: None,
            minimum_scale: 0.0,
        }
    }

    pub(crate) fn cells_too_small(cell_width: Option<i32>, cell_height: Option<i32>) -> Self {
        Self::new(ErrorKind::CellsTooSmall, cell_width, cell_height)
    }

    pub(crate) fn scale_below_minimum(
        scale: f64,
        minimum_scale: f64,
        cell_width: Option<i32>,
        cell_height: Option<i32>,
    ) -> Self {
        Self {
            scale: Some(scale),
            minimum_scale,
            ..Self::new(ErrorKind::ScaleBelowMinimum, cell_width, cell_height)
        }
    }

    pub(crate) fn no_feasible_layout(cell_width: Option<i32>, cell_height: Option<i32>) -> Self {
        Self::new(ErrorKind::NoFeasibleLayout, cell_width, cell_height)
    }
}

impl core::fmt::Display for PackError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::CellsTooSmall => {
                f.write_str("cells are too small for the distance range")?;
                match self.cell_dimensions() {
                    (Some(w), Some(h)) => write!(f, " ({w}x{h})"),
                    (Some(w), None) => write!(f, " (width {w})"),
                    (None, Some(h)) => write!(f, " (height {h})"),
                    (None, None) => Ok(()),
                }
            }
            ErrorKind::ScaleBelowMinimum => write!(
                f,
                "glyph scale {} is below the minimum of {}",
                self.scale.unwrap_or(0.0),
                self.minimum_scale
            ),
            ErrorKind::NoFeasibleLayout => f.write_str("no grid arrangement fits the atlas"),
        }
    }
}

impl core::error::Error for PackError {}

/// The non-exhaustive category of a [`PackError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A cell minus padding cannot hold the pixel component of the distance range.
    CellsTooSmall,

    /// Glyphs only fit at a scale below the configured minimum.
    ScaleBelowMinimum,

    /// No column count leaves room for a cell of positive size.
    NoFeasibleLayout,
}
