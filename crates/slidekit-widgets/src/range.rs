#![forbid(unsafe_code)]

//! Multi-handle range sliders.
//!
//! # Design
//!
//! [`RangeCore`] holds an ordered set of handles, each with a committed
//! value and a live position, over one shared range. [`RangeSlider`] wraps it
//! the same way [`Slider`](crate::scalar::Slider) wraps the scalar core.
//!
//! # Invariants
//!
//! 1. Every value and position lies within `[minimum, maximum]`.
//! 2. Positions (and values) are non-decreasing in handle order.
//! 3. Consecutive handles are at least one *gap* apart. The gap is the
//!    single step, shrunk to `(maximum - minimum) / (count - 1)` when the
//!    range is too narrow to hold every handle a full step apart.
//! 4. The handle count only changes through
//!    [`RangeCore::replace_handles`].
//!
//! # Bounding
//!
//! Whole sequences go through [`bound_sequence`]: clamp to the range, push
//! handles up to respect the gap, then pull them back down from the
//! maximum. Single handles are bounded against their current neighbors
//! instead, so dragging one handle never moves another.

use slidekit_core::event::{KeyEvent, Modifiers, MouseEvent, WheelEvent};

use crate::config::SliderConfig;
use crate::error::{MIN_HANDLES, Result, SliderError};
use crate::geometry::{Orientation, SliderGeometry};
use crate::interaction::{HandleModel, Interaction, SliderAction, SliderResponse};
use crate::notify::{Notifications, SliderSignals};
use crate::value::{Bounds, SliderValue, Steps, qbound};

/// Handle values of a new range slider.
pub const DEFAULT_HANDLES: [f64; 2] = [20.0, 80.0];

/// Minimum spacing between consecutive handles.
#[must_use]
pub fn neighbor_gap(minimum: f64, maximum: f64, single_step: f64, count: usize, integral: bool) -> f64 {
    let mut gap = if single_step > 0.0 { single_step } else { 0.0 };
    if count > 1 {
        let room = (maximum - minimum) / (count - 1) as f64;
        if gap > room {
            gap = if integral { room.floor() } else { room };
        }
    }
    gap
}

/// Bound a whole handle sequence into `[minimum, maximum]` with `gap`
/// spacing.
///
/// ```
/// use slidekit_widgets::range::bound_sequence;
///
/// assert_eq!(bound_sequence(&[30.0, 38.0], 20.0, 25.0, 1.0), vec![24.0, 25.0]);
/// assert_eq!(bound_sequence(&[50.0, 50.0], 0.0, 99.0, 1.0), vec![50.0, 51.0]);
/// ```
#[must_use]
pub fn bound_sequence(values: &[f64], minimum: f64, maximum: f64, gap: f64) -> Vec<f64> {
    let clamp = |v: f64| {
        if v.is_nan() {
            minimum
        } else {
            qbound(minimum, maximum, v)
        }
    };
    let mut out: Vec<f64> = values.iter().copied().map(clamp).collect();
    for i in 1..out.len() {
        let floor = out[i - 1] + gap;
        if out[i] < floor {
            out[i] = floor;
        }
    }
    if let Some(last) = out.last_mut() {
        *last = last.min(maximum);
    }
    for i in (0..out.len().saturating_sub(1)).rev() {
        let ceiling = out[i + 1] - gap;
        if out[i] > ceiling {
            out[i] = ceiling;
        }
    }
    for v in &mut out {
        *v = qbound(minimum, maximum, *v);
    }
    out
}

/// Serializable configuration and values of a range slider.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeState<T> {
    pub bounds: Bounds<T>,
    pub steps: Steps<T>,
    pub values: Vec<T>,
    pub tracking: bool,
    pub inverted_controls: bool,
    pub bar_is_rigid: bool,
    pub bar_moves_all_handles: bool,
    pub bar_visible: bool,
}

/// Value/position state machine for an ordered handle set.
#[derive(Debug, Clone)]
pub struct RangeCore<T: SliderValue> {
    bounds: Bounds<T>,
    steps: Steps<T>,
    values: Vec<T>,
    positions: Vec<T>,
    tracking: bool,
    slider_down: bool,
    block_tracking: bool,
    inverted_controls: bool,
    bar_is_rigid: bool,
    bar_moves_all: bool,
    bar_visible: bool,
    pending: Notifications<T, Vec<T>>,
}

impl<T: SliderValue> Default for RangeCore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SliderValue> RangeCore<T> {
    /// Range `[0, 99]`, handles at 20 and 80, steps 1 and 10.
    #[must_use]
    pub fn new() -> Self {
        let handles: Vec<T> = DEFAULT_HANDLES.iter().map(|&v| T::from_f64(v)).collect();
        Self {
            bounds: Bounds::new(T::from_f64(0.0), T::from_f64(99.0)),
            steps: Steps {
                single: T::from_f64(1.0),
                page: T::from_f64(10.0),
            },
            values: handles.clone(),
            positions: handles,
            tracking: true,
            slider_down: false,
            block_tracking: false,
            inverted_controls: false,
            bar_is_rigid: true,
            bar_moves_all: true,
            bar_visible: true,
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

    /// Committed handle values.
    #[must_use]
    pub fn value(&self) -> &[T] {
        &self.values
    }

    /// Live handle positions.
    #[must_use]
    pub fn slider_position(&self) -> &[T] {
        &self.positions
    }

    #[must_use]
    pub fn handle_count(&self) -> usize {
        self.values.len()
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

    #[must_use]
    pub fn bar_is_rigid(&self) -> bool {
        self.bar_is_rigid
    }

    #[must_use]
    pub fn bar_moves_all_handles(&self) -> bool {
        self.bar_moves_all
    }

    #[must_use]
    pub fn bar_visible(&self) -> bool {
        self.bar_visible
    }

    /// Current minimum spacing between consecutive handles.
    #[must_use]
    pub fn gap(&self) -> f64 {
        let (min, max) = self.bounds.to_f64();
        neighbor_gap(
            min,
            max,
            self.steps.single.to_f64(),
            self.positions.len(),
            T::INTEGRAL,
        )
    }

    fn bound_all(&self, values: &[T]) -> Vec<T> {
        let (min, max) = self.bounds.to_f64();
        let raw: Vec<f64> = values.iter().map(|v| v.to_f64()).collect();
        let gap = neighbor_gap(min, max, self.steps.single.to_f64(), raw.len(), T::INTEGRAL);
        bound_sequence(&raw, min, max, gap)
            .into_iter()
            .map(T::from_f64)
            .collect()
    }

    /// Bound one entry of `neighbors` (committed values or live positions).
    fn bound_at(&self, neighbors: &[T], index: usize, value: f64) -> T {
        let (min, max) = self.bounds.to_f64();
        let gap = self.gap();
        let mut v = if value.is_nan() { min } else { value };
        if index > 0 {
            v = v.max(neighbors[index - 1].to_f64() + gap);
        }
        if let Some(next) = neighbors.get(index + 1) {
            v = v.min(next.to_f64() - gap);
        }
        T::from_f64(qbound(min, max, v))
    }

    fn check_len(&self, actual: usize) -> Result<()> {
        let expected = self.values.len();
        if actual == expected {
            Ok(())
        } else {
            Err(SliderError::HandleCountMismatch { expected, actual })
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let count = self.values.len();
        if index < count {
            Ok(())
        } else {
            Err(SliderError::HandleIndexOutOfRange { index, count })
        }
    }

    /// Set both bounds and re-bound every handle.
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
        let values = self.values.clone();
        self.commit_values(&values);
    }

    pub fn set_minimum(&mut self, minimum: T) {
        let maximum = if self.bounds.maximum < minimum {
            minimum
        } else {
            self.bounds.maximum
        };
        self.set_range(minimum, maximum);
    }

    pub fn set_maximum(&mut self, maximum: T) {
        let minimum = if maximum < self.bounds.minimum {
            maximum
        } else {
            self.bounds.minimum
        };
        self.set_range(minimum, maximum);
    }

    /// Commit a full value sequence. Its length must match the handle count.
    pub fn set_value(&mut self, values: &[T]) -> Result<()> {
        self.check_len(values.len())?;
        self.commit_values(values);
        Ok(())
    }

    /// Commit one handle, bounded by its neighbors.
    pub fn set_value_at(&mut self, index: usize, value: T) -> Result<()> {
        self.check_index(index)?;
        let bounded = self.bound_at(&self.values, index, value.to_f64());
        let mut values = self.values.clone();
        values[index] = bounded;
        self.commit_values(&values);
        Ok(())
    }

    /// Replace the whole handle set. Any count of at least
    /// [`MIN_HANDLES`] is accepted.
    pub fn replace_handles(&mut self, values: &[T]) -> Result<()> {
        if values.len() < MIN_HANDLES {
            return Err(SliderError::TooFewHandles {
                count: values.len(),
            });
        }

        #[cfg(feature = "tracing")]
        if values.len() != self.values.len() {
            tracing::debug!(
                message = "slider.handles",
                from = self.values.len(),
                to = values.len()
            );
        }

        let bounded = self.bound_all(values);
        if self.values == bounded && self.positions == bounded {
            return Ok(());
        }
        if self.positions != bounded && self.slider_down {
            self.pending.moved(bounded.clone());
        }
        self.positions = bounded.clone();
        self.values = bounded.clone();
        self.pending.value(bounded);
        Ok(())
    }

    fn commit_values(&mut self, values: &[T]) {
        let bounded = self.bound_all(values);
        if self.values == bounded && self.positions == bounded {
            return;
        }
        self.values = bounded.clone();
        if self.positions != bounded {
            self.positions = bounded.clone();
            if self.slider_down {
                self.pending.moved(bounded.clone());
            }
        }
        self.pending.value(bounded);
    }

    /// Move every live position. The length must match the handle count.
    pub fn set_slider_position(&mut self, positions: &[T]) -> Result<()> {
        self.check_len(positions.len())?;
        let bounded = self.bound_all(positions);
        self.move_positions(bounded);
        Ok(())
    }

    /// Move one live position, bounded by its neighbors.
    pub fn set_slider_position_at(&mut self, index: usize, position: T) -> Result<()> {
        self.check_index(index)?;
        let bounded = self.bound_at(&self.positions, index, position.to_f64());
        if self.positions[index] == bounded {
            return Ok(());
        }
        let mut positions = self.positions.clone();
        positions[index] = bounded;
        self.move_positions(positions);
        Ok(())
    }

    fn move_positions(&mut self, positions: Vec<T>) {
        if positions == self.positions {
            return;
        }
        self.positions = positions;
        if self.slider_down {
            self.pending.moved(self.positions.clone());
        }
        if self.tracking && !self.block_tracking {
            self.trigger_action(SliderAction::Move);
        }
    }

    /// Shift every position by `delta`.
    ///
    /// A rigid bar stops when the first or last handle reaches the range
    /// boundary, preserving the spacing. A non-rigid bar lets the boundary
    /// compress the handles.
    pub fn offset_all_positions(&mut self, delta: T) {
        let reference: Vec<f64> = self.positions.iter().map(|p| p.to_f64()).collect();
        self.offset_from(&reference, delta.to_f64(), self.bar_is_rigid);
    }

    fn offset_from(&mut self, reference: &[f64], delta: f64, rigid: bool) {
        if reference.len() != self.positions.len() || delta.is_nan() {
            return;
        }
        let mut delta = if T::INTEGRAL { delta.round() } else { delta };
        if rigid {
            let (min, max) = self.bounds.to_f64();
            let lo = reference.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = reference.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            delta = qbound(min - lo, max - hi, delta);
        }
        let target: Vec<T> = reference.iter().map(|p| T::from_f64(p + delta)).collect();
        let bounded = self.bound_all(&target);
        self.move_positions(bounded);
    }

    /// Scale positions around the midpoint of the first and last handle.
    ///
    /// `gain` widens the spread; with `shrink` its reciprocal narrows it.
    pub fn spread_all_positions(&mut self, shrink: bool, gain: f64) {
        let (Some(first), Some(last)) = (self.positions.first(), self.positions.last()) else {
            return;
        };
        if !(gain > 0.0) || !gain.is_finite() {
            return;
        }
        let gain = if shrink { 1.0 / gain } else { gain };
        let center = (first.to_f64() + last.to_f64()) / 2.0;
        let target: Vec<T> = self
            .positions
            .iter()
            .map(|p| T::from_f64((p.to_f64() - center) * gain + center))
            .collect();
        let bounded = self.bound_all(&target);
        self.move_positions(bounded);
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

    pub fn set_bar_is_rigid(&mut self, rigid: bool) {
        self.bar_is_rigid = rigid;
    }

    pub fn set_bar_moves_all_handles(&mut self, moves_all: bool) {
        self.bar_moves_all = moves_all;
    }

    pub fn set_bar_visible(&mut self, visible: bool) {
        self.bar_visible = visible;
    }

    /// Mark the handles as held or released.
    pub fn set_slider_down(&mut self, down: bool) {
        if self.slider_down != down {
            self.slider_down = down;
            if down {
                self.pending.pressed();
            } else {
                self.pending.released();
            }
        }
        if !down && self.positions != self.values {
            self.trigger_action(SliderAction::Move);
        }
    }

    /// Run a discrete action on the whole bar, then commit.
    ///
    /// Steps always move the handles rigidly; boundary jumps slide the bar
    /// until its first or last handle touches the boundary.
    pub fn trigger_action(&mut self, action: SliderAction) {
        self.block_tracking = true;
        let single = self.steps.single.to_f64();
        let page = self.steps.page.to_f64();
        let (min, max) = self.bounds.to_f64();
        let reference: Vec<f64> = self.positions.iter().map(|p| p.to_f64()).collect();
        let lo = reference.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = reference.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let delta = match action {
            SliderAction::SingleStepAdd => Some(single),
            SliderAction::SingleStepSub => Some(-single),
            SliderAction::PageStepAdd => Some(page),
            SliderAction::PageStepSub => Some(-page),
            SliderAction::ToMinimum => Some(min - lo),
            SliderAction::ToMaximum => Some(max - hi),
            SliderAction::Move => None,
        };
        if let Some(delta) = delta {
            self.offset_from(&reference, delta, true);
        }
        self.block_tracking = false;
        let positions = self.positions.clone();
        self.commit_values(&positions);
    }

    #[must_use]
    pub fn state(&self) -> RangeState<T> {
        RangeState {
            bounds: self.bounds,
            steps: self.steps,
            values: self.values.clone(),
            tracking: self.tracking,
            inverted_controls: self.inverted_controls,
            bar_is_rigid: self.bar_is_rigid,
            bar_moves_all_handles: self.bar_moves_all,
            bar_visible: self.bar_visible,
        }
    }

    /// Drain queued notifications.
    pub fn take_notifications(&mut self) -> Notifications<T, Vec<T>> {
        self.pending.take()
    }
}

impl<T: SliderValue> HandleModel for RangeCore<T> {
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
        self.positions.len()
    }

    fn positions_f64(&self) -> Vec<f64> {
        self.positions.iter().map(|p| p.to_f64()).collect()
    }

    fn committed_f64(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.to_f64()).collect()
    }

    fn inverted_controls(&self) -> bool {
        self.inverted_controls
    }

    fn bar_moves_all_handles(&self) -> bool {
        self.bar_moves_all
    }

    fn set_slider_down(&mut self, down: bool) {
        RangeCore::set_slider_down(self, down);
    }

    fn move_handle(&mut self, index: usize, position: f64) {
        // The handle set may have been replaced mid-drag.
        let _ = self.set_slider_position_at(index, T::from_f64(position));
    }

    fn move_bar(&mut self, delta: f64, reference: &[f64]) {
        self.offset_from(reference, delta, self.bar_is_rigid);
    }

    fn apply_scroll(&mut self, steps: f64, modifiers: Modifiers, config: &SliderConfig) {
        self.block_tracking = true;
        if modifiers.contains(Modifiers::ALT) {
            self.spread_all_positions(steps < 0.0, config.spread_gain);
        } else {
            let reference = self.positions_f64();
            self.offset_from(&reference, steps, self.bar_is_rigid);
        }
        self.block_tracking = false;
        self.trigger_action(SliderAction::Move);
    }

    fn has_scroll_room(&self, sign: f64) -> bool {
        let committed = self.committed_f64();
        let (min, max) = self.bounds.to_f64();
        let lo = committed.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = committed.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (sign > 0.0 && hi < max) || (sign < 0.0 && lo > min)
    }

    fn dispatch_action(&mut self, action: SliderAction) {
        self.trigger_action(action);
    }
}

/// A range slider widget model with any number of handles.
///
/// ```
/// use slidekit_widgets::range::RangeSlider;
///
/// let mut slider = RangeSlider::<i32>::new();
/// assert_eq!(slider.value(), &[20, 80]);
/// slider.set_value_at(0, 90).unwrap();
/// assert_eq!(slider.value(), &[79, 80]);
/// ```
#[derive(Debug)]
pub struct RangeSlider<T: SliderValue> {
    core: RangeCore<T>,
    interaction: Interaction,
    signals: SliderSignals<T, Vec<T>>,
}

/// Integer range slider.
pub type IntRangeSlider = RangeSlider<i32>;

/// Range slider over a native `f64` domain.
pub type DoubleRangeSlider = RangeSlider<f64>;

impl<T: SliderValue> Default for RangeSlider<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SliderValue> RangeSlider<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SliderConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SliderConfig) -> Self {
        Self {
            core: RangeCore::new(),
            interaction: Interaction::new(config),
            signals: SliderSignals::new(),
        }
    }

    #[must_use]
    pub fn core(&self) -> &RangeCore<T> {
        &self.core
    }

    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    #[must_use]
    pub fn signals(&self) -> &SliderSignals<T, Vec<T>> {
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
    pub fn value(&self) -> &[T] {
        self.core.value()
    }

    #[must_use]
    pub fn slider_position(&self) -> &[T] {
        self.core.slider_position()
    }

    #[must_use]
    pub fn handle_count(&self) -> usize {
        self.core.handle_count()
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

    #[must_use]
    pub fn bar_is_rigid(&self) -> bool {
        self.core.bar_is_rigid()
    }

    #[must_use]
    pub fn bar_moves_all_handles(&self) -> bool {
        self.core.bar_moves_all_handles()
    }

    #[must_use]
    pub fn bar_visible(&self) -> bool {
        self.core.bar_visible()
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

    pub fn set_value(&mut self, values: &[T]) -> Result<()> {
        let result = self.core.set_value(values);
        self.flush();
        result
    }

    pub fn set_value_at(&mut self, index: usize, value: T) -> Result<()> {
        let result = self.core.set_value_at(index, value);
        self.flush();
        result
    }

    pub fn replace_handles(&mut self, values: &[T]) -> Result<()> {
        let result = self.core.replace_handles(values);
        if result.is_ok() {
            // Anything armed refers to the old handle set.
            if self.core.is_slider_down() {
                self.core.set_slider_down(false);
            }
            self.interaction.reset();
        }
        self.flush();
        result
    }

    pub fn set_slider_position(&mut self, positions: &[T]) -> Result<()> {
        let result = self.core.set_slider_position(positions);
        self.flush();
        result
    }

    pub fn set_slider_position_at(&mut self, index: usize, position: T) -> Result<()> {
        let result = self.core.set_slider_position_at(index, position);
        self.flush();
        result
    }

    pub fn offset_all_positions(&mut self, delta: T) {
        self.core.offset_all_positions(delta);
        self.flush();
    }

    pub fn spread_all_positions(&mut self, shrink: bool, gain: f64) {
        self.core.spread_all_positions(shrink, gain);
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

    pub fn set_bar_is_rigid(&mut self, rigid: bool) {
        self.core.set_bar_is_rigid(rigid);
    }

    pub fn set_bar_moves_all_handles(&mut self, moves_all: bool) {
        self.core.set_bar_moves_all_handles(moves_all);
    }

    pub fn set_bar_visible(&mut self, visible: bool) {
        self.core.set_bar_visible(visible);
    }

    pub fn set_slider_down(&mut self, down: bool) {
        self.core.set_slider_down(down);
        self.flush();
    }

    pub fn trigger_action(&mut self, action: SliderAction) {
        self.core.trigger_action(action);
        self.flush();
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
    pub fn state(&self) -> RangeState<T> {
        self.core.state()
    }

    /// Apply a saved state, replacing the handle set.
    pub fn restore(&mut self, state: &RangeState<T>) -> Result<()> {
        if state.values.len() < MIN_HANDLES {
            return Err(SliderError::TooFewHandles {
                count: state.values.len(),
            });
        }
        self.core.set_range(state.bounds.minimum, state.bounds.maximum);
        self.core.set_single_step(state.steps.single);
        self.core.set_page_step(state.steps.page);
        self.core.set_tracking(state.tracking);
        self.core.set_inverted_controls(state.inverted_controls);
        self.core.set_bar_is_rigid(state.bar_is_rigid);
        self.core.set_bar_moves_all_handles(state.bar_moves_all_handles);
        self.core.set_bar_visible(state.bar_visible);
        self.replace_handles(&state.values)
    }
}
