#![forbid(unsafe_code)]

//! Single-handle sliders.
//!
//! [`ScalarCore`] is the value/position state machine; [`Slider`] wraps it
//! with an [`Interaction`] controller and a set of [`SliderSignals`], and
//! flushes queued notifications once at the end of every public call.
//!
//! # Value and position
//!
//! The *value* is committed and is what `value_changed` reports. The
//! *position* is where the handle is drawn. With tracking on (the default)
//! every position change commits immediately; with tracking off the value
//! only follows on release or on an explicit [`SliderAction::Move`].

use slidekit_core::event::{KeyEvent, Modifiers, MouseEvent, WheelEvent};

use crate::config::SliderConfig;
use crate::geometry::{Orientation, SliderGeometry};
use crate::interaction::{HandleModel, Interaction, SliderAction, SliderResponse};
use crate::notify::{Notifications, SliderSignals};
use crate::value::{Bounds, SliderValue, Steps};

/// Serializable configuration and value of a single-handle slider.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalarState<T> {
    pub bounds: Bounds<T>,
    pub steps: Steps<T>,
    pub value: T,
    pub tracking: bool,
    pub inverted_controls: bool,
}

/// Value/position state machine for one handle.
#[derive(Debug, Clone)]
pub struct ScalarCore<T: SliderValue> {
    bounds: Bounds<T>,
    steps: Steps<T>,
    value: T,
    position: T,
    tracking: bool,
    slider_down: bool,
    block_tracking: bool,
    inverted_controls: bool,
    pending: Notifications<T, T>,
}

impl<T: SliderValue> Default for ScalarCore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SliderValue> ScalarCore<T> {
    /// Range `[0, 99]`, value 0, single step 1, page step 10, tracking on.
    #[must_use]
    pub fn new() -> Self {
        let zero = T::from_f64(0.0);
        Self {
            bounds: Bounds::new(zero, T::from_f64(99.0)),
            steps: Steps {
                single: T::from_f64(1.0),
                page: T::from_f64(10.0),
            },
            value: zero,
            position: zero,
            tracking: true,
            slider_down: false,
            block_tracking: false,
            inverted_controls: false,
            pending: Notifications::default(),
        }
    }

    #[must_use]
    pub fn minimum(&self) -> T {
        self.bounds.minimum
    }

    #[must_use]
    pub fn maximum(&self) -> T {
        self.bounds.maximum
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds<T> {
        self.bounds
    }

    #[must_use]
    pub fn value(&self) -> T {
        self.value
    }

    #[must_use]
    pub fn slider_position(&self) -> T {
        self.position
    }

    #[must_use]
    pub fn single_step(&self) -> T {
        self.steps.single
    }

    #[must_use]
    pub fn page_step(&self) -> T {
        self.steps.page
    }

    #[must_use]
    pub fn has_tracking(&self) -> bool {
        self.tracking
    }

    #[must_use]
    pub fn is_slider_down(&self) -> bool {
        self.slider_down
    }

    #[must_use]
    pub fn inverted_controls(&self) -> bool {
        self.inverted_controls
    }

    /// Set both bounds. An inverted pair collapses onto `minimum`.
    ///
    /// The current value is re-clamped into the new range.
    pub fn set_range(&mut self, minimum: T, maximum: T) {
        if minimum.is_nan() || maximum.is_nan() {
            return;
        }
        let bounds = Bounds::new(minimum, maximum);
        if bounds == self.bounds {
            return;
        }
        self.bounds = bounds;
        self.pending.range(bounds.minimum, bounds.maximum);
        self.set_value(self.value);
    }

    /// Set the minimum, raising the maximum if needed.
    pub fn set_minimum(&mut self, minimum: T) {
        let maximum = if self.bounds.maximum < minimum {
            minimum
        } else {
            self.bounds.maximum
        };
        self.set_range(minimum, maximum);
    }

    /// Set the maximum, lowering the minimum if needed.
    pub fn set_maximum(&mut self, maximum: T) {
        let minimum = if maximum < self.bounds.minimum {
            maximum
        } else {
            self.bounds.minimum
        };
        self.set_range(minimum, maximum);
    }

    /// Commit a value (clamped). Also moves the position.
    pub fn set_value(&mut self, value: T) {
        let value = self.bounds.clamp(value);
        if self.value == value && self.position == value {
            return;
        }
        self.value = value;
        if self.position != value {
            self.position = value;
            if self.slider_down {
                self.pending.moved(value);
            }
        }
        self.pending.value(value);
    }

    /// Move the live position (clamped). Commits when tracking.
    pub fn set_slider_position(&mut self, position: T) {
        let position = self.bounds.clamp(position);
        if position == self.position {
            return;
        }
        self.position = position;
        if self.slider_down {
            self.pending.moved(position);
        }
        if self.tracking && !self.block_tracking {
            self.trigger_action(SliderAction::Move);
        }
    }

    pub fn set_single_step(&mut self, step: T) {
        self.steps.single = step;
    }

    pub fn set_page_step(&mut self, step: T) {
        self.steps.page = step;
    }

    pub fn set_tracking(&mut self, tracking: bool) {
        self.tracking = tracking;
    }

    pub fn set_inverted_controls(&mut self, inverted: bool) {
        self.inverted_controls = inverted;
    }

    /// Mark the handle as held or released.
    ///
    /// Releasing with an uncommitted position commits it.
    pub fn set_slider_down(&mut self, down: bool) {
        if self.slider_down != down {
            self.slider_down = down;
            if down {
                self.pending.pressed();
            } else {
                self.pending.released();
            }
        }
        if !down && self.position != self.value {
            self.trigger_action(SliderAction::Move);
        }
    }

    /// Run a discrete action, then commit the position.
    pub fn trigger_action(&mut self, action: SliderAction) {
        self.block_tracking = true;
        let single = self.steps.single.to_f64();
        let page = self.steps.page.to_f64();
        match action {
            SliderAction::SingleStepAdd => self.step_position(single),
            SliderAction::SingleStepSub => self.step_position(-single),
            SliderAction::PageStepAdd => self.step_position(page),
            SliderAction::PageStepSub => self.step_position(-page),
            SliderAction::ToMinimum => self.set_slider_position(self.bounds.minimum),
            SliderAction::ToMaximum => self.set_slider_position(self.bounds.maximum),
            SliderAction::Move => {}
        }
        self.block_tracking = false;
        self.set_value(self.position);
    }

    fn step_position(&mut self, add: f64) {
        let target = self.bounds.overflow_safe_add(self.value, add);
        self.set_slider_position(T::from_f64(target));
    }

    /// Snapshot of configuration and value.
    #[must_use]
    pub fn state(&self) -> ScalarState<T> {
        ScalarState {
            bounds: self.bounds,
            steps: self.steps,
            value: self.value,
            tracking: self.tracking,
            inverted_controls: self.inverted_controls,
        }
    }

    /// Replace bounds, steps and value without queuing anything.
    ///
    /// The position follows the value unless the handle is held, in which
    /// case it is only re-clamped.
    pub(crate) fn replace_silently(&mut self, bounds: Bounds<T>, steps: Steps<T>, value: T, position: T) {
        self.bounds = Bounds::new(bounds.minimum, bounds.maximum);
        self.steps = steps;
        self.value = self.bounds.clamp(value);
        self.position = if self.slider_down {
            self.bounds.clamp(position)
        } else {
            self.value
        };
    }

    /// Drain queued notifications.
    pub fn take_notifications(&mut self) -> Notifications<T, T> {
        self.pending.take()
    }
}

impl<T: SliderValue> HandleModel for ScalarCore<T> {
    fn bounds_f64(&self) -> (f64, f64) {
        self.bounds.to_f64()
    }

    fn single_step_f64(&self) -> f64 {
        self.steps.single.to_f64()
    }

    fn page_step_f64(&self) -> f64 {
        self.steps.page.to_f64()
    }

    fn handle_count(&self) -> usize {
        1
    }

    fn positions_f64(&self) -> Vec<f64> {
        vec![self.position.to_f64()]
    }

    fn committed_f64(&self) -> Vec<f64> {
        vec![self.value.to_f64()]
    }

    fn inverted_controls(&self) -> bool {
        self.inverted_controls
    }

    fn set_slider_down(&mut self, down: bool) {
        ScalarCore::set_slider_down(self, down);
    }

    fn move_handle(&mut self, index: usize, position: f64) {
        if index == 0 {
            self.set_slider_position(T::from_f64(position));
        }
    }

    fn move_bar(&mut self, delta: f64, reference: &[f64]) {
        if let Some(&start) = reference.first() {
            self.set_slider_position(T::from_f64(start + delta));
        }
    }

    fn apply_scroll(&mut self, steps: f64, _modifiers: Modifiers, _config: &SliderConfig) {
        self.block_tracking = true;
        self.step_position(steps);
        self.block_tracking = false;
        self.trigger_action(SliderAction::Move);
    }

    fn has_scroll_room(&self, sign: f64) -> bool {
        (sign > 0.0 && self.value < self.bounds.maximum)
            || (sign < 0.0 && self.value > self.bounds.minimum)
    }

    fn dispatch_action(&mut self, action: SliderAction) {
        self.trigger_action(action);
    }
}

/// A single-handle slider widget model.
///
/// Every public mutator drains the core's queue before returning, so
/// listeners see one ordered batch per call.
///
/// ```
/// use slidekit_widgets::scalar::Slider;
///
/// let mut slider = Slider::<i32>::new();
/// slider.set_range(0, 10);
/// slider.set_value(42);
/// assert_eq!(slider.value(), 10);
/// ```
#[derive(Debug)]
pub struct Slider<T: SliderValue> {
    core: ScalarCore<T>,
    interaction: Interaction,
    signals: SliderSignals<T, T>,
}

/// Integer slider.
pub type IntSlider = Slider<i32>;

/// Slider over a native `f64` domain.
pub type DoubleSlider = Slider<f64>;

impl<T: SliderValue> Default for Slider<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SliderValue> Slider<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SliderConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SliderConfig) -> Self {
        Self {
            core: ScalarCore::new(),
            interaction: Interaction::new(config),
            signals: SliderSignals::new(),
        }
    }

    /// Read access to the state machine.
    #[must_use]
    pub fn core(&self) -> &ScalarCore<T> {
        &self.core
    }

    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    #[must_use]
    pub fn signals(&self) -> &SliderSignals<T, T> {
        &self.signals
    }

    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        self.interaction.config()
    }

    pub fn set_config(&mut self, config: SliderConfig) {
        self.interaction.set_config(config);
    }

    fn flush(&mut self) {
        let pending = self.core.take_notifications();
        self.signals.dispatch(pending);
    }

    #[must_use]
    pub fn minimum(&self) -> T {
        self.core.minimum()
    }

    #[must_use]
    pub fn maximum(&self) -> T {
        self.core.maximum()
    }

    #[must_use]
    pub fn value(&self) -> T {
        self.core.value()
    }

    #[must_use]
    pub fn slider_position(&self) -> T {
        self.core.slider_position()
    }

    #[must_use]
    pub fn single_step(&self) -> T {
        self.core.single_step()
    }

    #[must_use]
    pub fn page_step(&self) -> T {
        self.core.page_step()
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

    pub fn set_range(&mut self, minimum: T, maximum: T) {
        self.core.set_range(minimum, maximum);
        self.flush();
    }

    pub fn set_minimum(&mut self, minimum: T) {
        self.core.set_minimum(minimum);
        self.flush();
    }

    pub fn set_maximum(&mut self, maximum: T) {
        self.core.set_maximum(maximum);
        self.flush();
    }

    pub fn set_value(&mut self, value: T) {
        self.core.set_value(value);
        self.flush();
    }

    pub fn set_slider_position(&mut self, position: T) {
        self.core.set_slider_position(position);
        self.flush();
    }

    pub fn set_single_step(&mut self, step: T) {
        self.core.set_single_step(step);
    }

    pub fn set_page_step(&mut self, step: T) {
        self.core.set_page_step(step);
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

    /// Feed a pointer event.
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

    /// Feed a wheel event.
    pub fn handle_wheel(&mut self, event: &WheelEvent) -> SliderResponse {
        let response = self.interaction.handle_wheel(&mut self.core, event);
        self.flush();
        response
    }

    /// Feed a key event.
    pub fn handle_key<G>(&mut self, event: &KeyEvent, geometry: &G) -> SliderResponse
    where
        G: SliderGeometry + ?Sized,
    {
        let response = self.interaction.handle_key(&mut self.core, geometry, event);
        self.flush();
        response
    }

    /// Scroll by a raw wheel delta. Returns whether the scroll was consumed.
    pub fn scroll_by_delta(&mut self, orientation: Orientation, modifiers: Modifiers, delta: i32) -> bool {
        let consumed = self
            .interaction
            .scroll_by_delta(&mut self.core, orientation, modifiers, delta);
        self.flush();
        consumed
    }

    #[must_use]
    pub fn state(&self) -> ScalarState<T> {
        self.core.state()
    }

    /// Apply a saved state through the public setters.
    pub fn restore(&mut self, state: &ScalarState<T>) {
        self.core.set_range(state.bounds.minimum, state.bounds.maximum);
        self.core.set_single_step(state.steps.single);
        self.core.set_page_step(state.steps.page);
        self.core.set_tracking(state.tracking);
        self.core.set_inverted_controls(state.inverted_controls);
        self.core.set_value(state.value);
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::SliderNotification as N;

    fn drained(core: &mut ScalarCore<i32>) -> Vec<N<i32, i32>> {
        core.take_notifications().into_ordered()
    }

    #[test]
    fn defaults() {
        let core = ScalarCore::<i32>::new();
        assert_eq!((core.minimum(), core.maximum()), (0, 99));
        assert_eq!(core.value(), 0);
        assert_eq!((core.single_step(), core.page_step()), (1, 10));
        assert!(core.has_tracking());
        assert!(!core.is_slider_down());
    }

    #[test]
    fn raising_minimum_keeps_contained_value() {
        let mut core = ScalarCore::<i32>::new();
        core.set_value(40);
        drained(&mut core);
        core.set_minimum(10);
        assert_eq!(drained(&mut core), vec![N::RangeChanged(10, 99)]);
        assert_eq!(core.value(), 40);
    }

    #[test]
    fn shrinking_range_clamps_value() {
        let mut core = ScalarCore::<i32>::new();
        core.set_value(80);
        drained(&mut core);
        core.set_range(0, 50);
        assert_eq!(
            drained(&mut core),
            vec![N::RangeChanged(0, 50), N::ValueChanged(50)]
        );
    }

    #[test]
    fn inverted_range_collapses() {
        let mut core = ScalarCore::<i32>::new();
        core.set_range(30, 10);
        assert_eq!((core.minimum(), core.maximum()), (30, 30));
        assert_eq!(core.value(), 30);
        core.set_maximum(5);
        assert_eq!((core.minimum(), core.maximum()), (5, 5));
    }

    #[test]
    fn setting_same_value_is_silent() {
        let mut core = ScalarCore::<i32>::new();
        core.set_value(12);
        drained(&mut core);
        core.set_value(core.value());
        assert!(drained(&mut core).is_empty());
    }

    #[test]
    fn position_without_tracking_commits_on_release() {
        let mut core = ScalarCore::<i32>::new();
        core.set_tracking(false);
        core.set_slider_down(true);
        core.set_slider_position(30);
        assert_eq!(core.value(), 0);
        assert_eq!(drained(&mut core), vec![N::Pressed, N::SliderMoved(30)]);

        core.set_slider_down(false);
        assert_eq!(core.value(), 30);
        assert_eq!(drained(&mut core), vec![N::ValueChanged(30), N::Released]);
    }

    #[test]
    fn tracking_position_commits_immediately() {
        let mut core = ScalarCore::<i32>::new();
        core.set_slider_down(true);
        core.set_slider_position(7);
        assert_eq!(core.value(), 7);
        assert_eq!(
            drained(&mut core),
            vec![N::Pressed, N::ValueChanged(7), N::SliderMoved(7)]
        );
    }

    #[test]
    fn step_actions_saturate() {
        let mut core = ScalarCore::<i32>::new();
        core.set_value(95);
        core.trigger_action(SliderAction::PageStepAdd);
        assert_eq!(core.value(), 99);
        core.trigger_action(SliderAction::SingleStepSub);
        assert_eq!(core.value(), 98);
        core.trigger_action(SliderAction::ToMinimum);
        assert_eq!(core.value(), 0);
        core.trigger_action(SliderAction::PageStepSub);
        assert_eq!(core.value(), 0);
        core.trigger_action(SliderAction::ToMaximum);
        assert_eq!(core.value(), 99);
    }

    #[test]
    fn huge_steps_do_not_overflow() {
        let mut core = ScalarCore::<i32>::new();
        core.set_range(i32::MIN, i32::MAX);
        core.set_single_step(i32::MAX);
        core.set_value(i32::MAX - 5);
        core.trigger_action(SliderAction::SingleStepAdd);
        assert_eq!(core.value(), i32::MAX);
        core.set_value(i32::MIN + 5);
        core.trigger_action(SliderAction::SingleStepSub);
        assert_eq!(core.value(), i32::MIN);
    }

    #[test]
    fn nan_range_is_ignored() {
        let mut core = ScalarCore::<f64>::new();
        core.set_range(f64::NAN, 3.0);
        assert_eq!((core.minimum(), core.maximum()), (0.0, 99.0));
        core.set_value(f64::NAN);
        assert_eq!(core.value(), 0.0);
    }

    #[test]
    fn float_core_keeps_fractions() {
        let mut core = ScalarCore::<f64>::new();
        core.set_range(-1.5, 1.5);
        core.set_value(0.125);
        assert_eq!(core.value(), 0.125);
    }

    #[test]
    fn widget_flushes_signals_per_call() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut slider = IntSlider::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = Rc::clone(&seen);
            slider
                .signals()
                .value_changed
                .connect(move |v| seen.borrow_mut().push(*v))
        };
        slider.set_value(3);
        slider.set_value(3);
        slider.set_value(4);
        assert_eq!(*seen.borrow(), vec![3, 4]);
    }

    #[test]
    fn restore_applies_saved_state() {
        let mut source = DoubleSlider::new();
        source.set_range(-10.0, 10.0);
        source.set_value(2.5);
        source.set_tracking(false);
        let state = source.state();

        let mut target = DoubleSlider::new();
        target.restore(&state);
        assert_eq!(target.state(), state);
    }
}
