#![forbid(unsafe_code)]

//! Floating-point slider on top of an integer core.
//!
//! [`FloatSlider`] keeps an `i64` [`ScalarCore`] and a [`DecimalScale`]
//! multiplier of `10^decimals` between the public `f64` domain and the
//! private integer domain:
//!
//! ```text
//! private = round(public * 10^decimals)
//! public  = private / 10^decimals
//! ```
//!
//! Negative decimals divide instead of multiplying by a fractional factor,
//! so both directions stay exact for integral scales. Values that do not fit
//! saturate at the `i64` bounds; changing the decimals (or restoring a saved
//! state) is the only operation that refuses instead, and only over the
//! bounds and the value. Steps always saturate.
//!
//! With enough decimals any magnitude from `1e-18` to `1e18` round-trips to
//! well within `1e-8` relative error: the core has 63 bits, so a range
//! `[-m, m]` encoded with `decimals = 15 - log10(m)` keeps about fifteen
//! significant digits.
//!
//! Listeners only ever see public values.

use slidekit_core::event::{KeyEvent, Modifiers, MouseEvent, WheelEvent};

use crate::config::SliderConfig;
use crate::error::{Result, SliderError};
use crate::geometry::{Orientation, SliderGeometry};
use crate::interaction::{Interaction, SliderAction, SliderResponse};
use crate::notify::{Notifications, SliderSignals};
use crate::scalar::{ScalarCore, ScalarState};
use crate::value::{Bounds, SliderValue, Steps, checked_i64};

/// Decimals a new [`FloatSlider`] starts with.
pub const DEFAULT_DECIMALS: i32 = 2;

/// Largest supported `|decimals|`. `10^300` is still a finite `f64`.
pub const MAX_DECIMALS: i32 = 300;

/// The `10^decimals` multiplier between public and private values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecimalScale {
    decimals: i32,
    factor: f64,
}

impl Default for DecimalScale {
    fn default() -> Self {
        Self {
            decimals: DEFAULT_DECIMALS,
            factor: 10f64.powi(DEFAULT_DECIMALS),
        }
    }
}

impl DecimalScale {
    /// Scale for `decimals`, or `None` beyond [`MAX_DECIMALS`].
    #[must_use]
    pub fn new(decimals: i32) -> Option<Self> {
        if decimals.unsigned_abs() > MAX_DECIMALS.unsigned_abs() {
            return None;
        }
        Some(Self {
            decimals,
            factor: 10f64.powi(decimals.abs()),
        })
    }

    #[must_use]
    pub fn decimals(&self) -> i32 {
        self.decimals
    }

    fn scaled(&self, public: f64) -> f64 {
        if self.decimals >= 0 {
            public * self.factor
        } else {
            public / self.factor
        }
    }

    /// Encode, saturating at the `i64` bounds. NaN encodes as zero.
    #[must_use]
    pub fn encode(&self, public: f64) -> i64 {
        i64::from_f64(self.scaled(public))
    }

    /// Encode, or `None` when the result does not fit an `i64`.
    #[must_use]
    pub fn try_encode(&self, public: f64) -> Option<i64> {
        checked_i64(self.scaled(public))
    }

    /// Decode a private value.
    #[must_use]
    pub fn decode(&self, private: i64) -> f64 {
        if self.decimals >= 0 {
            private.to_f64() / self.factor
        } else {
            private.to_f64() * self.factor
        }
    }

    fn encode_steps(&self, single: f64, page: f64) -> Steps<i64> {
        Steps {
            single: self.encode(single),
            page: self.encode(page),
        }
    }
}

/// Serializable state of a [`FloatSlider`], in public units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatState {
    pub decimals: i32,
    pub scalar: ScalarState<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PublicView {
    minimum: f64,
    maximum: f64,
    value: f64,
    position: f64,
}

/// A slider over `f64` values with a fixed number of decimals.
///
/// ```
/// use slidekit_widgets::float::FloatSlider;
///
/// let mut slider = FloatSlider::new();
/// slider.set_range(0.0, 1.0);
/// slider.set_decimals(8).unwrap();
/// slider.set_value(0.72644353);
/// assert!((slider.value() - 0.72644353).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct FloatSlider {
    core: ScalarCore<i64>,
    scale: DecimalScale,
    interaction: Interaction,
    signals: SliderSignals<f64, f64>,
}

impl Default for FloatSlider {
    fn default() -> Self {
        Self::new()
    }
}

impl FloatSlider {
    /// Range `[0, 99]`, value 0, steps 1 and 10, two decimals.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SliderConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SliderConfig) -> Self {
        let scale = DecimalScale::default();
        let mut core = ScalarCore::new();
        core.replace_silently(
            Bounds::new(scale.encode(0.0), scale.encode(99.0)),
            scale.encode_steps(1.0, 10.0),
            0,
            0,
        );
        Self {
            core,
            scale,
            interaction: Interaction::new(config),
            signals: SliderSignals::new(),
        }
    }

    #[must_use]
    pub fn signals(&self) -> &SliderSignals<f64, f64> {
        &self.signals
    }

    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        self.interaction.config()
    }

    pub fn set_config(&mut self, config: SliderConfig) {
        self.interaction.set_config(config);
    }

    /// The private integer core.
    #[must_use]
    pub fn core(&self) -> &ScalarCore<i64> {
        &self.core
    }

    #[must_use]
    pub fn decimals(&self) -> i32 {
        self.scale.decimals()
    }

    #[must_use]
    pub fn scale(&self) -> DecimalScale {
        self.scale
    }

    fn flush(&mut self) {
        let scale = self.scale;
        let pending = self
            .core
            .take_notifications()
            .map(|v| scale.decode(v), |v| scale.decode(v));
        self.signals.dispatch(pending);
    }

    fn public_view(&self) -> PublicView {
        PublicView {
            minimum: self.minimum(),
            maximum: self.maximum(),
            value: self.value(),
            position: self.slider_position(),
        }
    }

    #[must_use]
    pub fn minimum(&self) -> f64 {
        self.scale.decode(self.core.minimum())
    }

    #[must_use]
    pub fn maximum(&self) -> f64 {
        self.scale.decode(self.core.maximum())
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.scale.decode(self.core.value())
    }

    #[must_use]
    pub fn slider_position(&self) -> f64 {
        self.scale.decode(self.core.slider_position())
    }

    #[must_use]
    pub fn single_step(&self) -> f64 {
        self.scale.decode(self.core.single_step())
    }

    #[must_use]
    pub fn page_step(&self) -> f64 {
        self.scale.decode(self.core.page_step())
    }

    #[must_use]
    pub fn has_tracking(&self) -> bool {
        self.core.has_tracking()
    }

    #[must_use]
    pub fn is_slider_down(&self) -> bool {
        self.core.is_slider_down()
    }

    #[must_use]
    pub fn inverted_controls(&self) -> bool {
        self.core.inverted_controls()
    }

    pub fn set_range(&mut self, minimum: f64, maximum: f64) {
        if minimum.is_nan() || maximum.is_nan() {
            return;
        }
        self.core
            .set_range(self.scale.encode(minimum), self.scale.encode(maximum));
        self.flush();
    }

    pub fn set_minimum(&mut self, minimum: f64) {
        if minimum.is_nan() {
            return;
        }
        self.core.set_minimum(self.scale.encode(minimum));
        self.flush();
    }

    pub fn set_maximum(&mut self, maximum: f64) {
        if maximum.is_nan() {
            return;
        }
        self.core.set_maximum(self.scale.encode(maximum));
        self.flush();
    }

    pub fn set_value(&mut self, value: f64) {
        self.core.set_value(self.scale.encode(value));
        self.flush();
    }

    pub fn set_slider_position(&mut self, position: f64) {
        self.core.set_slider_position(self.scale.encode(position));
        self.flush();
    }

    pub fn set_single_step(&mut self, step: f64) {
        self.core.set_single_step(self.scale.encode(step));
    }

    pub fn set_page_step(&mut self, step: f64) {
        self.core.set_page_step(self.scale.encode(step));
    }

    pub fn set_tracking(&mut self, tracking: bool) {
        self.core.set_tracking(tracking);
    }

    pub fn set_inverted_controls(&mut self, inverted: bool) {
        self.core.set_inverted_controls(inverted);
    }

    pub fn set_slider_down(&mut self, down: bool) {
        self.core.set_slider_down(down);
        self.flush();
    }

    pub fn trigger_action(&mut self, action: SliderAction) {
        self.core.trigger_action(action);
        self.flush();
    }

    /// Change the number of decimals.
    ///
    /// Bounds, value, position and steps are re-encoded from their public
    /// values. If the bounds, the value or the position do not fit the new
    /// scale nothing changes and [`SliderError::DecimalsOverflow`] is
    /// returned; steps saturate. On success, listeners are told only about
    /// public values that actually changed (rounding away digits can move
    /// the value).
    pub fn set_decimals(&mut self, decimals: i32) -> Result<()> {
        if decimals == self.scale.decimals() {
            return Ok(());
        }
        let before = self.public_view();
        let steps = (self.single_step(), self.page_step());
        self.migrate(decimals, before, steps)
    }

    /// Re-encode `target` under `decimals`, or refuse without touching
    /// anything.
    fn migrate(&mut self, decimals: i32, target: PublicView, steps: (f64, f64)) -> Result<()> {
        let before = self.public_view();
        let encoded = DecimalScale::new(decimals).and_then(|scale| {
            Some((
                scale,
                Bounds::new(
                    scale.try_encode(target.minimum)?,
                    scale.try_encode(target.maximum)?,
                ),
                scale.try_encode(target.value)?,
                scale.try_encode(target.position)?,
            ))
        });
        let Some((scale, bounds, value, position)) = encoded else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                message = "slider.decimals_overflow",
                decimals,
                minimum = target.minimum,
                maximum = target.maximum
            );
            return Err(SliderError::DecimalsOverflow {
                decimals,
                minimum: target.minimum,
                maximum: target.maximum,
            });
        };

        // Anything queued by the old encoding is meaningless after this.
        let _ = self.core.take_notifications();
        self.core
            .replace_silently(bounds, scale.encode_steps(steps.0, steps.1), value, position);
        self.scale = scale;

        let after = self.public_view();
        let mut pending = Notifications::default();
        if (after.minimum, after.maximum) != (before.minimum, before.maximum) {
            pending.range(after.minimum, after.maximum);
        }
        if after.value != before.value {
            pending.value(after.value);
        }
        if after.position != before.position && self.core.is_slider_down() {
            pending.moved(after.position);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "slider.decimals",
            decimals,
            changes = ?pending.changes()
        );

        self.signals.dispatch(pending);
        Ok(())
    }

    pub fn handle_mouse<G>(&mut self, event: &MouseEvent, geometry: &G) -> SliderResponse
    where
        G: SliderGeometry + ?Sized,
    {
        let response = self
            .interaction
            .handle_mouse(&mut self.core, geometry, event);
        self.flush();
        response
    }

    pub fn handle_wheel(&mut self, event: &WheelEvent) -> SliderResponse {
        let response = self.interaction.handle_wheel(&mut self.core, event);
        self.flush();
        response
    }

    pub fn handle_key<G>(&mut self, event: &KeyEvent, geometry: &G) -> SliderResponse
    where
        G: SliderGeometry + ?Sized,
    {
        let response = self.interaction.handle_key(&mut self.core, geometry, event);
        self.flush();
        response
    }

    pub fn scroll_by_delta(&mut self, orientation: Orientation, modifiers: Modifiers, delta: i32) -> bool {
        let consumed = self
            .interaction
            .scroll_by_delta(&mut self.core, orientation, modifiers, delta);
        self.flush();
        consumed
    }

    #[must_use]
    pub fn state(&self) -> FloatState {
        FloatState {
            decimals: self.decimals(),
            scalar: ScalarState {
                bounds: Bounds::new(self.minimum(), self.maximum()),
                steps: Steps {
                    single: self.single_step(),
                    page: self.page_step(),
                },
                value: self.value(),
                tracking: self.has_tracking(),
                inverted_controls: self.inverted_controls(),
            },
        }
    }

    /// Apply a saved state.
    ///
    /// The saved bounds and value are validated against the saved decimals
    /// before anything is applied; on [`SliderError::DecimalsOverflow`] the
    /// slider is left exactly as it was.
    pub fn restore(&mut self, state: &FloatState) -> Result<()> {
        let s = &state.scalar;
        let target = PublicView {
            minimum: s.bounds.minimum,
            maximum: s.bounds.maximum,
            value: s.value,
            position: if self.core.is_slider_down() {
                self.slider_position()
            } else {
                s.value
            },
        };
        self.migrate(state.decimals, target, (s.steps.single, s.steps.page))?;
        self.core.set_tracking(s.tracking);
        self.core.set_inverted_controls(s.inverted_controls);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn scale_encodes_both_directions() {
        let two = DecimalScale::new(2).expect("two decimals");
        assert_eq!(two.encode(1.234), 123);
        assert_eq!(two.encode(1.236), 124);
        assert_eq!(two.decode(123), 1.23);

        let neg = DecimalScale::new(-2).expect("negative decimals");
        assert_eq!(neg.encode(1250.0), 13);
        assert_eq!(neg.decode(13), 1300.0);

        assert!(DecimalScale::new(MAX_DECIMALS + 1).is_none());
        assert!(DecimalScale::new(-MAX_DECIMALS - 1).is_none());
    }

    #[test]
    fn encode_saturates_try_encode_refuses() {
        let eighteen = DecimalScale::new(18).expect("eighteen decimals");
        assert_eq!(eighteen.encode(99.0), i64::MAX);
        assert_eq!(eighteen.encode(-99.0), i64::MIN);
        assert_eq!(eighteen.try_encode(99.0), None);
        assert_eq!(eighteen.try_encode(0.5), Some(500_000_000_000_000_000));
    }

    #[test]
    fn tiny_scales_are_representable() {
        let fine = DecimalScale::new(27).expect("27 decimals");
        assert_eq!(fine.try_encode(1e-18), Some(1_000_000_000));
        assert!(DecimalScale::new(MAX_DECIMALS).is_some());
    }

    #[test]
    fn defaults_in_public_units() {
        let slider = FloatSlider::new();
        assert_eq!(slider.decimals(), 2);
        assert_eq!((slider.minimum(), slider.maximum()), (0.0, 99.0));
        assert_eq!((slider.single_step(), slider.page_step()), (1.0, 10.0));
        assert_eq!(slider.core().maximum(), 9900);
    }

    #[test]
    fn values_round_to_configured_decimals() {
        let mut slider = FloatSlider::new();
        slider.set_value(12.345_6);
        assert_eq!(slider.value(), 12.35);
    }

    #[test]
    fn overflowing_decimals_roll_back() {
        let mut slider = FloatSlider::new();
        slider.set_range(0.0, 1e11);
        slider.set_value(42.5);
        let fired = Rc::new(RefCell::new(0));
        let _sub = {
            let fired = Rc::clone(&fired);
            slider
                .signals()
                .value_changed
                .connect(move |_| *fired.borrow_mut() += 1)
        };

        let err = slider.set_decimals(8).expect_err("1e19 does not fit an i64");
        assert_eq!(
            err,
            SliderError::DecimalsOverflow {
                decimals: 8,
                minimum: 0.0,
                maximum: 1e11,
            }
        );
        assert_eq!(slider.decimals(), 2);
        assert_eq!(slider.value(), 42.5);
        assert_eq!((slider.minimum(), slider.maximum()), (0.0, 1e11));
        assert_eq!(slider.page_step(), 10.0);
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn losing_digits_reports_new_value_once() {
        let mut slider = FloatSlider::new();
        slider.set_value(42.35);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = Rc::clone(&seen);
            slider
                .signals()
                .value_changed
                .connect(move |v| seen.borrow_mut().push(*v))
        };
        let ranges = Rc::new(RefCell::new(0));
        let _range_sub = {
            let ranges = Rc::clone(&ranges);
            slider
                .signals()
                .range_changed
                .connect(move |_| *ranges.borrow_mut() += 1)
        };

        slider.set_decimals(0).expect("fits");
        assert_eq!(slider.value(), 42.0);
        assert_eq!(*seen.borrow(), vec![42.0]);
        assert_eq!(*ranges.borrow(), 0);
        assert_eq!(slider.core().maximum(), 99);
    }

    #[test]
    fn gaining_digits_is_silent() {
        let mut slider = FloatSlider::new();
        slider.set_range(0.0, 1.0);
        slider.set_value(0.5);
        let fired = Rc::new(RefCell::new(0));
        let _sub = {
            let fired = Rc::clone(&fired);
            slider
                .signals()
                .value_changed
                .connect(move |_| *fired.borrow_mut() += 1)
        };
        slider.set_decimals(8).expect("fits");
        assert_eq!(slider.value(), 0.5);
        assert_eq!(slider.core().maximum(), 100_000_000);
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn oversized_steps_saturate_instead_of_refusing() {
        let mut slider = FloatSlider::new();
        slider.set_range(0.0, 1.0);
        slider.set_decimals(18).expect("bounds fit");
        assert_eq!(slider.decimals(), 18);
        assert_eq!(slider.core().page_step(), i64::MAX);
        assert_eq!(slider.maximum(), 1.0);

        slider.trigger_action(SliderAction::PageStepAdd);
        assert_eq!(slider.value(), 1.0);
    }

    #[test]
    fn listeners_see_public_units() {
        let mut slider = FloatSlider::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = Rc::clone(&seen);
            slider
                .signals()
                .range_changed
                .connect(move |r| seen.borrow_mut().push(*r))
        };
        slider.set_range(-1.5, 2.25);
        assert_eq!(*seen.borrow(), vec![(-1.5, 2.25)]);
    }

    #[test]
    fn steps_move_in_public_units() {
        let mut slider = FloatSlider::new();
        slider.set_single_step(0.25);
        slider.trigger_action(SliderAction::SingleStepAdd);
        assert_eq!(slider.value(), 0.25);
    }

    #[test]
    fn state_round_trip() {
        let mut slider = FloatSlider::new();
        slider.set_range(-5.0, 5.0);
        slider.set_decimals(3).expect("fits");
        slider.set_value(1.125);
        let state = slider.state();

        let mut other = FloatSlider::new();
        other.restore(&state).expect("fits");
        assert_eq!(other.state(), state);
    }

    #[test]
    fn restore_refusal_leaves_slider_untouched() {
        let mut source = FloatSlider::new();
        source.set_range(0.0, 1e11);
        let mut state = source.state();
        state.decimals = 9;
        state.scalar.tracking = false;

        let mut target = FloatSlider::new();
        target.set_value(12.5);
        let before = target.state();
        let err = target.restore(&state).expect_err("1e20 does not fit");
        assert!(matches!(err, SliderError::DecimalsOverflow { decimals: 9, .. }));
        assert_eq!(target.state(), before);
    }

    #[test]
    fn restore_reaches_scales_the_current_range_cannot() {
        // Default [0, 99] cannot take 18 decimals, the saved [0, 1] can.
        let mut source = FloatSlider::new();
        source.set_range(0.0, 1.0);
        source.set_decimals(18).expect("fits");
        source.set_value(0.123_456_789_012);
        let state = source.state();

        let mut target = FloatSlider::new();
        assert!(target.set_decimals(18).is_err());
        target.restore(&state).expect("saved range fits");
        assert_eq!(target.decimals(), 18);
        assert!((target.value() - source.value()).abs() < 1e-15);
    }
}
