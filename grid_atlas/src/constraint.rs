// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rounding of atlas and cell dimensions to a [`DimensionsConstraint`].

use core::fmt;
use core::str::FromStr;

/// A policy restricting the shape of a `(width, height)` pair.
///
/// The square variants force both sides to be equal before the per-axis rule
/// (parity, multiple of four, power of two) is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DimensionsConstraint {
    /// Any width and height.
    #[default]
    None,
    /// Width equals height.
    Square,
    /// A square with an even side.
    EvenSquare,
    /// A square with a side divisible by four.
    MultipleOfFourSquare,
    /// A square with a power-of-two side.
    PowerOfTwoSquare,
    /// A rectangle with power-of-two sides.
    PowerOfTwoRectangle,
}

impl DimensionsConstraint {
    /// Whether this constraint forces width and height to be equal.
    #[must_use]
    pub const fn is_square(self) -> bool {
        matches!(
            self,
            Self::Square | Self::EvenSquare | Self::MultipleOfFourSquare | Self::PowerOfTwoSquare
        )
    }

    /// The short name of this constraint, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Square => "square",
            Self::EvenSquare => "square2",
            Self::MultipleOfFourSquare => "square4",
            Self::PowerOfTwoSquare => "pots",
            Self::PowerOfTwoRectangle => "potr",
        }
    }

    /// Rounds `(width, height)` down to the nearest pair satisfying this constraint.
    ///
    /// Square variants first shrink both sides to the smaller one.
    /// Non-positive sides are left alone by the power-of-two rule.
    #[must_use]
    pub fn lower(self, width: i32, height: i32) -> (i32, i32) {
        let (mut width, mut height) = (width, height);
        if self.is_square() {
            width = width.min(height);
            height = width;
        }
        match self {
            Self::None | Self::Square => {}
            Self::EvenSquare => {
                width &= !1;
                height &= !1;
            }
            Self::MultipleOfFourSquare => {
                width &= !3;
                height &= !3;
            }
            Self::PowerOfTwoSquare | Self::PowerOfTwoRectangle => {
                width = floor_pot(width);
                height = floor_pot(height);
            }
        }
        (width, height)
    }

    /// Rounds `(width, height)` up to the nearest pair satisfying this constraint.
    ///
    /// Square variants first grow both sides to the larger one.
    /// Non-positive sides are left alone by the power-of-two rule.
    #[must_use]
    pub fn raise(self, width: i32, height: i32) -> (i32, i32) {
        let (mut width, mut height) = (width, height);
        if self.is_square() {
            width = width.max(height);
            height = width;
        }
        match self {
            Self::None | Self::Square => {}
            Self::EvenSquare => {
                width = round_up(width, width & 1);
                height = round_up(height, height & 1);
            }
            Self::MultipleOfFourSquare => {
                width = round_up(width, width.wrapping_neg() & 3);
                height = round_up(height, height.wrapping_neg() & 3);
            }
            Self::PowerOfTwoSquare | Self::PowerOfTwoRectangle => {
                width = ceil_pot(width);
                height = ceil_pot(height);
            }
        }
        (width, height)
    }

    /// Like [`lower`](Self::lower), but for a pair where either side may still be unresolved.
    ///
    /// Only resolved sides are rounded. The square rule applies only when both are known.
    pub(crate) fn lower_partial(
        self,
        width: Option<i32>,
        height: Option<i32>,
    ) -> (Option<i32>, Option<i32>) {
        match (width, height) {
            (Some(w), Some(h)) => {
                let (w, h) = self.lower(w, h);
                (Some(w), Some(h))
            }
            _ => (
                width.map(|w| self.lower_axis(w)),
                height.map(|h| self.lower_axis(h)),
            ),
        }
    }

    /// Like [`raise`](Self::raise), but for a pair where either side may still be unresolved.
    pub(crate) fn raise_partial(
        self,
        width: Option<i32>,
        height: Option<i32>,
    ) -> (Option<i32>, Option<i32>) {
        match (width, height) {
            (Some(w), Some(h)) => {
                let (w, h) = self.raise(w, h);
                (Some(w), Some(h))
            }
            _ => (
                width.map(|w| self.raise_axis(w)),
                height.map(|h| self.raise_axis(h)),
            ),
        }
    }

    /// Rounds a single side down, as if it were both sides of a pair.
    pub(crate) fn lower_axis(self, value: i32) -> i32 {
        self.lower(value, value).0
    }

    /// Rounds a single side up, as if it were both sides of a pair.
    pub(crate) fn raise_axis(self, value: i32) -> i32 {
        self.raise(value, value).0
    }
}

/// Largest power of two not greater than `x`, or `x` itself if it is not positive.
fn floor_pot(x: i32) -> i32 {
    if x <= 0 {
        return x;
    }
    1 << (31 - x.leading_zeros())
}

/// Adds `step` to `x`, or keeps `x` when the sum is not representable.
fn round_up(x: i32, step: i32) -> i32 {
    x.checked_add(step).unwrap_or(x)
}

/// Smallest power of two not less than `x`, or `x` itself if it is not positive.
fn ceil_pot(x: i32) -> i32 {
    if x <= 0 {
        return x;
    }
    u32::try_from(x)
        .ok()
        .and_then(u32::checked_next_power_of_two)
        .and_then(|pot| i32::try_from(pot).ok())
        .unwrap_or(x)
}

impl fmt::Display for DimensionsConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DimensionsConstraint {
    type Err = ParseDimensionsConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseDimensionsConstraintError::Empty);
        }
        [
            Self::None,
            Self::Square,
            Self::EvenSquare,
            Self::MultipleOfFourSquare,
            Self::PowerOfTwoSquare,
            Self::PowerOfTwoRectangle,
        ]
        .into_iter()
        .find(|constraint| constraint.as_str().eq_ignore_ascii_case(s))
        .ok_or(ParseDimensionsConstraintError::Unknown)
    }
}

/// An error returned from parsing a [`DimensionsConstraint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseDimensionsConstraintError {
    /// The input was empty.
    Empty,
    /// The input did not name a known constraint.
    Unknown,
}

impl fmt::Display for ParseDimensionsConstraintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty dimensions constraint"),
            Self::Unknown => f.write_str("unknown dimensions constraint"),
        }
    }
}

impl core::error::Error for ParseDimensionsConstraintError {}
