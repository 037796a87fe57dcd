#![forbid(unsafe_code)]

//! Pixel ↔ value mapping.
//!
//! Pure functions shared by every slider variant. A *span* is the number of
//! pixels the handle's leading edge can travel (groove length minus handle
//! length). *Upside down* means the maximum sits at the leading edge (left
//! or top) instead of the trailing edge.
//!
//! All arithmetic is done in `f64`. When `max - min` overflows (for example
//! `[-1e308, 1e308]`) interpolation falls back to the two-sided form
//! `min * (1 - t) + max * t`, which stays finite.

/// Fraction `t` in `[0, 1]` of `value` inside `[min, max]`.
///
/// A collapsed range yields `0.0`.
#[must_use]
pub fn fraction_of(value: f64, min: f64, max: f64) -> f64 {
    if !(max > min) {
        return 0.0;
    }
    let range = max - min;
    let t = if range.is_finite() {
        (value - min) / range
    } else {
        // Halve everything so the difference fits.
        (value / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)
    };
    t.clamp(0.0, 1.0)
}

/// Value at fraction `t` of `[min, max]`. `t` is clamped to `[0, 1]`.
#[must_use]
pub fn value_at_fraction(fraction: f64, min: f64, max: f64) -> f64 {
    if fraction.is_nan() || !(max > min) {
        return min;
    }
    let t = fraction.clamp(0.0, 1.0);
    if t <= 0.0 {
        return min;
    }
    if t >= 1.0 {
        return max;
    }
    let range = max - min;
    let v = if range.is_finite() {
        min + t * range
    } else {
        min * (1.0 - t) + max * t
    };
    v.clamp(min, max)
}

/// Map a pixel offset along the groove to a value.
///
/// `offset` is measured from the start of the handle's travel. Offsets at or
/// before the start pin to the leading value, offsets at or past `span` pin
/// to the trailing value.
///
/// ```
/// use slidekit_widgets::mapper::pixel_to_value;
///
/// assert_eq!(pixel_to_value(50.0, 100.0, 0.0, 10.0, false), 5.0);
/// assert_eq!(pixel_to_value(25.0, 100.0, 0.0, 10.0, true), 7.5);
/// assert_eq!(pixel_to_value(-3.0, 100.0, 0.0, 10.0, false), 0.0);
/// ```
#[must_use]
pub fn pixel_to_value(offset: f64, span: f64, min: f64, max: f64, upside_down: bool) -> f64 {
    let (lead, trail) = if upside_down { (max, min) } else { (min, max) };
    if !(span > 0.0) || !(offset > 0.0) {
        return lead;
    }
    if offset >= span {
        return trail;
    }
    let t = offset / span;
    if upside_down {
        value_at_fraction(1.0 - t, min, max)
    } else {
        value_at_fraction(t, min, max)
    }
}

/// Map a value to the pixel offset of the handle's leading edge.
///
/// A collapsed range maps to the leading end of the travel.
#[must_use]
pub fn value_to_pixel(value: f64, min: f64, max: f64, span: f64, upside_down: bool) -> f64 {
    if !(span > 0.0) {
        return 0.0;
    }
    if !(max > min) {
        return if upside_down { span } else { 0.0 };
    }
    let t = fraction_of(value, min, max);
    let t = if upside_down { 1.0 - t } else { t };
    t * span
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_endpoints_pin() {
        assert_eq!(pixel_to_value(0.0, 200.0, 10.0, 20.0, false), 10.0);
        assert_eq!(pixel_to_value(200.0, 200.0, 10.0, 20.0, false), 20.0);
        assert_eq!(pixel_to_value(999.0, 200.0, 10.0, 20.0, false), 20.0);
        assert_eq!(pixel_to_value(0.0, 200.0, 10.0, 20.0, true), 20.0);
        assert_eq!(pixel_to_value(200.0, 200.0, 10.0, 20.0, true), 10.0);
    }

    #[test]
    fn zero_span_pins_to_leading_value() {
        assert_eq!(pixel_to_value(5.0, 0.0, 1.0, 2.0, false), 1.0);
        assert_eq!(pixel_to_value(5.0, -4.0, 1.0, 2.0, true), 2.0);
    }

    #[test]
    fn upside_down_mirrors() {
        let up = pixel_to_value(30.0, 100.0, 0.0, 50.0, false);
        let down = pixel_to_value(70.0, 100.0, 0.0, 50.0, true);
        assert!((up - down).abs() < 1e-12);
    }

    #[test]
    fn value_to_pixel_inverts() {
        assert_eq!(value_to_pixel(5.0, 0.0, 10.0, 100.0, false), 50.0);
        assert_eq!(value_to_pixel(7.5, 0.0, 10.0, 100.0, true), 25.0);
        assert_eq!(value_to_pixel(3.0, 3.0, 3.0, 100.0, false), 0.0);
        assert_eq!(value_to_pixel(3.0, 3.0, 3.0, 100.0, true), 100.0);
        assert_eq!(value_to_pixel(3.0, 0.0, 10.0, 0.0, false), 0.0);
    }

    #[test]
    fn extreme_magnitudes_stay_finite() {
        let v = pixel_to_value(50.0, 100.0, -1e308, 1e308, false);
        assert!(v.is_finite());
        assert!(v.abs() < 1e300);

        let tiny = pixel_to_value(50.0, 100.0, 0.0, 1e-18, false);
        assert!((tiny - 5e-19).abs() < 1e-30);

        let huge = pixel_to_value(25.0, 100.0, 0.0, 1e18, false);
        assert!((huge - 2.5e17).abs() / 2.5e17 < 1e-12);

        let t = fraction_of(1e308, -1e308, 1e308);
        assert!((t - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fraction_helpers_clamp() {
        assert_eq!(fraction_of(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(fraction_of(15.0, 0.0, 10.0), 1.0);
        assert_eq!(fraction_of(5.0, 5.0, 5.0), 0.0);
        assert_eq!(value_at_fraction(2.0, 0.0, 10.0), 10.0);
        assert_eq!(value_at_fraction(f64::NAN, 0.0, 10.0), 0.0);
    }
}
