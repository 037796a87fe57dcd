#![forbid(unsafe_code)]

//! Interaction tuning shared by every slider variant.

use slidekit_core::event::{MouseButtons, WHEEL_DELTA};

/// Configuration for wheel, modifier and pointer handling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct SliderConfig {
    /// Line steps per wheel notch without modifiers (default: 3).
    pub wheel_scroll_lines: u32,
    /// Wheel units in one notch (default: 120).
    pub wheel_delta_per_notch: i32,
    /// Fraction of the range moved per notch with Ctrl held (default: 0.04).
    pub control_fraction: f64,
    /// Spread factor per Alt+wheel notch on range sliders (default: 1.1).
    pub spread_gain: f64,
    /// Buttons whose press jumps the handle under the pointer (default: left + middle).
    #[cfg_attr(feature = "state-persistence", serde(with = "button_bits"))]
    pub absolute_set_buttons: MouseButtons,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            wheel_scroll_lines: 3,
            wheel_delta_per_notch: WHEEL_DELTA,
            control_fraction: 0.04,
            spread_gain: 1.1,
            absolute_set_buttons: MouseButtons::LEFT | MouseButtons::MIDDLE,
        }
    }
}

impl SliderConfig {
    /// Set the line steps per notch.
    #[must_use]
    pub fn with_wheel_scroll_lines(mut self, lines: u32) -> Self {
        self.wheel_scroll_lines = lines;
        self
    }

    /// Set the wheel units per notch. Non-positive values fall back to 120.
    #[must_use]
    pub fn with_wheel_delta_per_notch(mut self, delta: i32) -> Self {
        self.wheel_delta_per_notch = if delta > 0 { delta } else { WHEEL_DELTA };
        self
    }

    /// Set the Ctrl+wheel fraction of the range.
    #[must_use]
    pub fn with_control_fraction(mut self, fraction: f64) -> Self {
        self.control_fraction = fraction;
        self
    }

    /// Set the Alt+wheel spread factor. Values `<= 1` are ignored.
    #[must_use]
    pub fn with_spread_gain(mut self, gain: f64) -> Self {
        if gain > 1.0 && gain.is_finite() {
            self.spread_gain = gain;
        }
        self
    }

    /// Set the buttons that jump the handle to the pointer.
    #[must_use]
    pub fn with_absolute_set_buttons(mut self, buttons: MouseButtons) -> Self {
        self.absolute_set_buttons = buttons;
        self
    }

    /// Wheel units per notch as a divisor; never zero.
    pub(crate) fn notch(&self) -> f64 {
        if self.wheel_delta_per_notch > 0 {
            f64::from(self.wheel_delta_per_notch)
        } else {
            f64::from(WHEEL_DELTA)
        }
    }
}

#[cfg(feature = "state-persistence")]
mod button_bits {
    use slidekit_core::event::MouseButtons;

    pub fn serialize<S: serde::Serializer>(
        buttons: &MouseButtons,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(buttons.bits())
    }

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<MouseButtons, D::Error> {
        let bits = <u8 as serde::Deserialize>::deserialize(deserializer)?;
        Ok(MouseButtons::from_bits_truncate(bits))
    }
}
