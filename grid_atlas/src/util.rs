// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Misc helpers.

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "unused when std provides the float methods")]
use core_maths::CoreFloat;

/// Whole pixels needed to cover `extent`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "glyph extents are far below i32::MAX pixels; larger values saturate"
)]
pub(crate) fn ceil_px(extent: f64) -> i32 {
    extent.ceil() as i32
}

/// Converts a caller-supplied size to an optional dimension, with zero meaning unset.
pub(crate) fn dimension(value: u32) -> Option<i32> {
    (value > 0).then(|| i32::try_from(value).unwrap_or(i32::MAX))
}

/// Converts a resolved dimension back to the public unsigned form.
pub(crate) fn unsigned(value: Option<i32>) -> Option<u32> {
    value.and_then(|value| u32::try_from(value).ok())
}

#[cfg(test)]
mod tests {
    use super::{ceil_px, dimension, unsigned};

    #[test]
    fn ceil_rounds_up_partial_pixels() {
        assert_eq!(ceil_px(9.0), 9);
        assert_eq!(ceil_px(9.01), 10);
        assert_eq!(ceil_px(0.0), 0);
    }

    #[test]
    fn zero_size_is_unset() {
        assert_eq!(dimension(0), None);
        assert_eq!(dimension(12), Some(12));
        assert_eq!(dimension(u32::MAX), Some(i32::MAX));
        assert_eq!(unsigned(Some(-1)), None);
        assert_eq!(unsigned(Some(7)), Some(7));
    }
}
