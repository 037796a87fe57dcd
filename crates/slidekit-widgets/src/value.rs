#![forbid(unsafe_code)]

//! Value types a slider core can be instantiated over.
//!
//! Cores are generic over [`SliderValue`]: `i32` plays the role of the
//! host toolkit's integer-only slider primitive, `i64` is the wide integer
//! host behind the decimal float adapter, `f64` is the value-based
//! floating-point domain. Interpolation, stepping and wheel arithmetic happen
//! in `f64` and are converted back through [`SliderValue::from_f64`].

use std::fmt;

/// A scalar a slider can hold.
pub trait SliderValue: Copy + PartialEq + PartialOrd + fmt::Debug + 'static {
    /// Whether only whole numbers are representable.
    const INTEGRAL: bool;

    /// Convert from the interpolation domain. Integral types round to the
    /// nearest value and saturate at their bounds; NaN maps to zero.
    fn from_f64(value: f64) -> Self;

    /// Widen into the interpolation domain.
    fn to_f64(self) -> f64;

    /// Whether the value is unordered (NaN).
    #[inline]
    fn is_nan(self) -> bool {
        self.to_f64().is_nan()
    }
}

impl SliderValue for i32 {
    const INTEGRAL: bool = true;

    #[inline]
    fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return 0;
        }
        // `as` saturates at i32::MIN/MAX.
        value.round() as i32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

/// First `f64` past `i64::MAX` (2^63).
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

impl SliderValue for i64 {
    const INTEGRAL: bool = true;

    #[inline]
    fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return 0;
        }
        value.round() as i64
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// Round `value` into an `i64`, or `None` when it does not fit.
#[inline]
#[must_use]
pub fn checked_i64(value: f64) -> Option<i64> {
    let rounded = value.round();
    (rounded >= -I64_LIMIT && rounded < I64_LIMIT).then_some(rounded as i64)
}

impl SliderValue for f64 {
    const INTEGRAL: bool = false;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

/// Clamp `value` into `[minimum, maximum]`.
///
/// Values that compare false against both bounds (NaN) land on `minimum`.
#[inline]
pub fn bound<T: SliderValue>(value: T, minimum: T, maximum: T) -> T {
    if !(value >= minimum) {
        minimum
    } else if value > maximum {
        maximum
    } else {
        value
    }
}

/// Clamp in `f64` without panicking on inverted bounds (`lo` wins).
#[inline]
pub(crate) fn qbound(lo: f64, hi: f64, value: f64) -> f64 {
    lo.max(hi.min(value))
}

/// The `{minimum, maximum}` domain of a slider. Always `minimum <= maximum`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds<T> {
    pub minimum: T,
    pub maximum: T,
}

impl<T: SliderValue> Bounds<T> {
    /// Build bounds, raising `maximum` to `minimum` when they are inverted.
    #[must_use]
    pub fn new(minimum: T, maximum: T) -> Self {
        let maximum = if maximum < minimum { minimum } else { maximum };
        Self { minimum, maximum }
    }

    /// Clamp a value into the domain.
    #[inline]
    #[must_use]
    pub fn clamp(&self, value: T) -> T {
        bound(value, self.minimum, self.maximum)
    }

    /// Whether the domain has collapsed to a single point.
    #[inline]
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.minimum == self.maximum
    }

    /// `(minimum, maximum)` widened to `f64`.
    #[inline]
    #[must_use]
    pub fn to_f64(&self) -> (f64, f64) {
        (self.minimum.to_f64(), self.maximum.to_f64())
    }

    /// Saturating `value + add` in `f64`, pinned to the domain.
    ///
    /// Infinite or huge steps land on the boundary in their direction
    /// instead of overflowing or producing NaN.
    #[must_use]
    pub fn overflow_safe_add(&self, value: T, add: f64) -> f64 {
        let (min, max) = self.to_f64();
        let current = value.to_f64();
        if add.is_nan() {
            return current;
        }
        let next = current + add;
        if add > 0.0 && !(next >= current && next <= max) {
            max
        } else if add < 0.0 && !(next <= current && next >= min) {
            min
        } else {
            next
        }
    }
}

/// Single and page step sizes, stored verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct Steps<T> {
    pub single: T,
    pub page: T,
}
