#![forbid(unsafe_code)]

//! Pointer, wheel and keyboard interaction.
//!
//! # Design
//!
//! [`Interaction`] is the controller shared by every slider variant. It owns
//! the transient [`InteractionState`] (what is pressed, what is hovered, the
//! click offset, the bar snapshot and the wheel accumulator) and drives a
//! core through the [`HandleModel`] trait. Geometry comes from the renderer
//! through [`SliderGeometry`]; the controller never caches it, so a resize
//! between two events is picked up on the next one.
//!
//! All model arithmetic crosses this boundary as `f64`. Cores convert back
//! into their own value type.
//!
//! # Invariants
//!
//! 1. A press arms at most one control; a second press while armed is ignored.
//! 2. A release with nothing pressed is a no-op.
//! 3. The wheel accumulator is reset by modifier scrolls, by direction
//!    reversal, and whenever a scroll fails to change the value.
//! 4. Nothing is pressed when the range has collapsed to a point.

use slidekit_core::event::{
    KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseButtons, MouseEvent,
    MouseEventKind, WheelEvent,
};
use slidekit_core::geometry::Point;

use crate::config::SliderConfig;
use crate::geometry::{Orientation, SliderGeometry};
use crate::value::qbound;

/// Discrete slider actions, as triggered by keys and the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderAction {
    SingleStepAdd,
    SingleStepSub,
    PageStepAdd,
    PageStepSub,
    ToMinimum,
    ToMaximum,
    /// Commit the live position as the value.
    Move,
}

impl SliderAction {
    /// Swap add and subtract; boundary jumps and `Move` are unchanged.
    #[must_use]
    pub const fn inverted(self) -> Self {
        match self {
            Self::SingleStepAdd => Self::SingleStepSub,
            Self::SingleStepSub => Self::SingleStepAdd,
            Self::PageStepAdd => Self::PageStepSub,
            Self::PageStepSub => Self::PageStepAdd,
            other => other,
        }
    }
}

/// A hit-testable part of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SliderControl {
    #[default]
    None,
    /// The groove outside any handle.
    Groove,
    /// The handle with this index.
    Handle(usize),
    /// The span between the first and last handle of a range slider.
    Bar,
}

/// Press/drag lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SliderPhase {
    #[default]
    Idle,
    /// A control is armed but the pointer has not moved yet.
    Pressed,
    /// The pointer moved while a control was armed.
    Dragging,
}

/// Outcome of feeding one event to a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderResponse {
    /// The event was not for this slider.
    Ignored,
    /// A control was armed.
    Pressed(SliderControl),
    /// The armed control followed the pointer.
    Dragged,
    /// The armed control was released.
    Released,
    /// The hovered control changed.
    HoverChanged(SliderControl),
    /// A wheel event changed the value.
    Scrolled,
    /// A key was mapped to a slider action.
    Stepped,
}

impl SliderResponse {
    /// Whether the slider consumed the event.
    #[must_use]
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// The view of a slider core the controller operates on.
///
/// Implemented by the scalar and range cores. Positions are the live
/// (possibly uncommitted) handle positions; committed values are what
/// listeners last saw through `value_changed`.
pub trait HandleModel {
    /// `(minimum, maximum)`.
    fn bounds_f64(&self) -> (f64, f64);

    fn single_step_f64(&self) -> f64;

    fn page_step_f64(&self) -> f64;

    /// Number of handles; at least one.
    fn handle_count(&self) -> usize;

    /// Live handle positions in handle order.
    fn positions_f64(&self) -> Vec<f64>;

    /// Committed values in handle order.
    fn committed_f64(&self) -> Vec<f64>;

    fn inverted_controls(&self) -> bool;

    /// Whether a press between two handles grabs the whole bar.
    fn bar_moves_all_handles(&self) -> bool {
        false
    }

    fn set_slider_down(&mut self, down: bool);

    /// Move one handle's live position. Unknown indexes are ignored.
    fn move_handle(&mut self, index: usize, position: f64);

    /// Move every handle by `delta` relative to `reference` positions.
    fn move_bar(&mut self, delta: f64, reference: &[f64]);

    /// Apply a discharged wheel scroll of `steps` value units and commit.
    fn apply_scroll(&mut self, steps: f64, modifiers: Modifiers, config: &SliderConfig);

    /// Whether a scroll in the direction of `sign` could still change the value.
    fn has_scroll_room(&self, sign: f64) -> bool;

    /// Run a discrete action and commit.
    fn dispatch_action(&mut self, action: SliderAction);
}

/// Transient interaction state. Reset on release and leave.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    pressed: SliderControl,
    hover: SliderControl,
    phase: SliderPhase,
    click_offset: i32,
    bar_anchor: f64,
    bar_snapshot: Vec<f64>,
    wheel_accumulator: f64,
}

impl InteractionState {
    /// The armed control.
    #[must_use]
    pub fn pressed(&self) -> SliderControl {
        self.pressed
    }

    /// The control under the pointer.
    #[must_use]
    pub fn hover(&self) -> SliderControl {
        self.hover
    }

    #[must_use]
    pub fn phase(&self) -> SliderPhase {
        self.phase
    }

    /// Pointer distance from the armed handle's leading edge at press time.
    #[must_use]
    pub fn click_offset(&self) -> i32 {
        self.click_offset
    }

    /// Fractional line steps not yet discharged by the wheel.
    #[must_use]
    pub fn wheel_accumulator(&self) -> f64 {
        self.wheel_accumulator
    }
}

/// The interaction controller.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    config: SliderConfig,
    state: InteractionState,
}

impl Interaction {
    #[must_use]
    pub fn new(config: SliderConfig) -> Self {
        Self {
            config,
            state: InteractionState::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SliderConfig) {
        self.config = config;
    }

    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Drop any armed control and pending wheel remainder without touching
    /// the model.
    pub fn reset(&mut self) {
        self.state = InteractionState::default();
    }

    // -----------------------------------------------------------------------
    // Hit testing
    // -----------------------------------------------------------------------

    /// The control a press at `point` would arm.
    ///
    /// A handle under the pointer wins. Otherwise the value under the pointer
    /// is compared against the handle positions: before the first handle arms
    /// the first handle, past the last arms the last, and in between arms the
    /// bar (when the bar moves all handles) or the closer neighbor.
    pub fn control_at<M, G>(&self, model: &M, geometry: &G, point: Point) -> SliderControl
    where
        M: HandleModel + ?Sized,
        G: SliderGeometry + ?Sized,
    {
        let positions = model.positions_f64();
        let Some(last) = positions.len().checked_sub(1) else {
            return SliderControl::None;
        };
        if let Some(index) = handle_under(&positions, model, geometry, point) {
            return SliderControl::Handle(index);
        }

        let click = value_under_center(model, geometry, point);
        match positions.iter().position(|&p| p > click) {
            Some(0) => SliderControl::Handle(0),
            Some(_) if model.bar_moves_all_handles() => SliderControl::Bar,
            Some(i) => {
                let midpoint = positions[i - 1] / 2.0 + positions[i] / 2.0;
                if click < midpoint {
                    SliderControl::Handle(i - 1)
                } else {
                    SliderControl::Handle(i)
                }
            }
            None => SliderControl::Handle(last),
        }
    }

    /// The control the pointer hovers at `point`.
    pub fn hover_at<M, G>(&self, model: &M, geometry: &G, point: Point) -> SliderControl
    where
        M: HandleModel + ?Sized,
        G: SliderGeometry + ?Sized,
    {
        let positions = model.positions_f64();
        if let Some(index) = handle_under(&positions, model, geometry, point) {
            return SliderControl::Handle(index);
        }
        if !geometry.groove_rect().contains_point(point) {
            return SliderControl::None;
        }
        if positions.len() > 1 && model.bar_moves_all_handles() {
            let click = value_under_center(model, geometry, point);
            let lo = positions.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = positions.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if click > lo && click < hi {
                return SliderControl::Bar;
            }
        }
        SliderControl::Groove
    }

    // -----------------------------------------------------------------------
    // Pointer
    // -----------------------------------------------------------------------

    /// Feed a pointer event.
    pub fn handle_mouse<M, G>(
        &mut self,
        model: &mut M,
        geometry: &G,
        event: &MouseEvent,
    ) -> SliderResponse
    where
        M: HandleModel + ?Sized,
        G: SliderGeometry + ?Sized,
    {
        let point = Point::new(event.x, event.y);
        match event.kind {
            MouseEventKind::Down(button) => self.press(model, geometry, event, button, point),
            MouseEventKind::Drag(_) => self.drag(model, geometry, point),
            MouseEventKind::Up(_) => self.release(model, geometry, event, point),
            MouseEventKind::Moved => {
                let hover = self.hover_at(model, geometry, point);
                self.set_hover(hover)
            }
            MouseEventKind::Leave => self.set_hover(SliderControl::None),
        }
    }

    fn press<M, G>(
        &mut self,
        model: &mut M,
        geometry: &G,
        event: &MouseEvent,
        button: MouseButton,
        point: Point,
    ) -> SliderResponse
    where
        M: HandleModel + ?Sized,
        G: SliderGeometry + ?Sized,
    {
        let (min, max) = model.bounds_f64();
        let bit = MouseButtons::from(button);
        if min == max
            || !(event.buttons - bit).is_empty()
            || !self.config.absolute_set_buttons.contains(bit)
            || self.state.pressed != SliderControl::None
        {
            return SliderResponse::Ignored;
        }

        let orientation = geometry.orientation();
        let control = self.control_at(model, geometry, point);
        match control {
            SliderControl::Handle(index) => {
                let positions = model.positions_f64();
                let mut rect = geometry.handle_rect(positions[index], min, max);
                if !rect.contains_point(point) {
                    let center = rect.center().minus(rect.top_left());
                    let target = geometry.value_at(orientation.pick(point.minus(center)), min, max);
                    model.move_handle(index, target);
                    model.dispatch_action(SliderAction::Move);
                    let moved = model.positions_f64();
                    rect = geometry.handle_rect(moved[index], min, max);
                }
                self.state.click_offset = orientation.pick(point.minus(rect.top_left()));
            }
            SliderControl::Bar => {
                self.state.bar_anchor = geometry.value_at(orientation.pick(point), min, max);
                self.state.bar_snapshot = model.positions_f64();
            }
            SliderControl::None | SliderControl::Groove => return SliderResponse::Ignored,
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "slider.press",
            control = ?control,
            x = event.x,
            y = event.y
        );

        self.state.pressed = control;
        self.state.phase = SliderPhase::Pressed;
        model.set_slider_down(true);
        SliderResponse::Pressed(control)
    }

    fn drag<M, G>(&mut self, model: &mut M, geometry: &G, point: Point) -> SliderResponse
    where
        M: HandleModel + ?Sized,
        G: SliderGeometry + ?Sized,
    {
        let (min, max) = model.bounds_f64();
        let orientation = geometry.orientation();
        let pixel = orientation.pick(point);
        match self.state.pressed {
            SliderControl::Handle(index) => {
                let target =
                    geometry.value_at(pixel.saturating_sub(self.state.click_offset), min, max);
                model.move_handle(index, target);
            }
            SliderControl::Bar => {
                let delta = geometry.value_at(pixel, min, max) - self.state.bar_anchor;
                model.move_bar(delta, &self.state.bar_snapshot);
            }
            SliderControl::None | SliderControl::Groove => return SliderResponse::Ignored,
        }
        self.state.phase = SliderPhase::Dragging;
        SliderResponse::Dragged
    }

    fn release<M, G>(
        &mut self,
        model: &mut M,
        geometry: &G,
        event: &MouseEvent,
        point: Point,
    ) -> SliderResponse
    where
        M: HandleModel + ?Sized,
        G: SliderGeometry + ?Sized,
    {
        if self.state.pressed == SliderControl::None || !event.buttons.is_empty() {
            return SliderResponse::Ignored;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "slider.release",
            control = ?self.state.pressed,
            phase = ?self.state.phase
        );

        self.state.pressed = SliderControl::None;
        self.state.phase = SliderPhase::Idle;
        self.state.bar_snapshot.clear();
        model.set_slider_down(false);
        self.state.hover = self.hover_at(model, geometry, point);
        SliderResponse::Released
    }

    fn set_hover(&mut self, hover: SliderControl) -> SliderResponse {
        if self.state.hover == hover {
            return SliderResponse::Ignored;
        }
        self.state.hover = hover;
        SliderResponse::HoverChanged(hover)
    }

    // -----------------------------------------------------------------------
    // Wheel
    // -----------------------------------------------------------------------

    /// Feed a wheel event. The dominant axis carries the delta.
    pub fn handle_wheel<M>(&mut self, model: &mut M, event: &WheelEvent) -> SliderResponse
    where
        M: HandleModel + ?Sized,
    {
        let (orientation, mut delta) = if event.is_vertical() {
            (Orientation::Vertical, event.delta_y)
        } else {
            (Orientation::Horizontal, event.delta_x)
        };
        if delta == 0 {
            return SliderResponse::Ignored;
        }
        if event.inverted {
            delta = delta.saturating_neg();
        }
        if self.scroll_by_delta(model, orientation, event.modifiers, delta) {
            SliderResponse::Scrolled
        } else {
            SliderResponse::Ignored
        }
    }

    /// Turn a raw wheel delta into stepped value changes.
    ///
    /// Returns `true` when the scroll was consumed: either the value changed
    /// or a partial line step was banked with room left to move.
    pub fn scroll_by_delta<M>(
        &mut self,
        model: &mut M,
        orientation: Orientation,
        modifiers: Modifiers,
        delta: i32,
    ) -> bool
    where
        M: HandleModel + ?Sized,
    {
        let mut offset = f64::from(delta) / self.config.notch();
        if orientation == Orientation::Horizontal {
            // Scrolling right reports a negative delta.
            offset = -offset;
        }
        let page = model.page_step_f64();

        let mut steps = if modifiers.contains(Modifiers::SHIFT) {
            self.state.wheel_accumulator = 0.0;
            qbound(-page, page, offset * page)
        } else if modifiers.contains(Modifiers::CTRL) {
            self.state.wheel_accumulator = 0.0;
            let (min, max) = model.bounds_f64();
            offset * (max - min) * self.config.control_fraction
        } else {
            let lines = f64::from(self.config.wheel_scroll_lines) * offset;
            let acc = self.state.wheel_accumulator;
            if acc != 0.0 && (lines < 0.0) != (acc < 0.0) {
                self.state.wheel_accumulator = 0.0;
            }
            self.state.wheel_accumulator += lines;
            let whole = self.state.wheel_accumulator.trunc();
            self.state.wheel_accumulator -= whole;
            let steps = qbound(-page, page, whole * model.single_step_f64());
            if steps == 0.0 {
                // Less than a line so far; keep the remainder if it can
                // still go somewhere.
                let mut sign = self.state.wheel_accumulator;
                if model.inverted_controls() {
                    sign = -sign;
                }
                if sign != 0.0 && model.has_scroll_room(sign) {
                    return true;
                }
                self.state.wheel_accumulator = 0.0;
                return false;
            }
            steps
        };

        if model.inverted_controls() {
            steps = -steps;
        }

        let before = model.committed_f64();
        model.apply_scroll(steps, modifiers, &self.config);
        let changed = model.committed_f64() != before;

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "slider.scroll", delta, steps, changed);

        if !changed {
            self.state.wheel_accumulator = 0.0;
        }
        changed
    }

    // -----------------------------------------------------------------------
    // Keyboard
    // -----------------------------------------------------------------------

    /// Feed a key event.
    ///
    /// The arrow pointing at the maximum's end of the groove adds a single
    /// step; cross-axis arrows add on Up/Right. Page keys move a page,
    /// Home/End jump to the boundaries. Inverted controls swap add and
    /// subtract.
    pub fn handle_key<M, G>(&mut self, model: &mut M, geometry: &G, event: &KeyEvent) -> SliderResponse
    where
        M: HandleModel + ?Sized,
        G: SliderGeometry + ?Sized,
    {
        if event.kind == KeyEventKind::Release {
            return SliderResponse::Ignored;
        }
        let Some(action) = key_action(event.code, geometry.orientation(), geometry.upside_down())
        else {
            return SliderResponse::Ignored;
        };
        let action = if model.inverted_controls() {
            action.inverted()
        } else {
            action
        };
        model.dispatch_action(action);
        SliderResponse::Stepped
    }
}

fn key_action(code: KeyCode, orientation: Orientation, upside_down: bool) -> Option<SliderAction> {
    let step = |increase: bool| {
        if increase {
            SliderAction::SingleStepAdd
        } else {
            SliderAction::SingleStepSub
        }
    };
    let action = match (orientation, code) {
        (Orientation::Horizontal, KeyCode::Right | KeyCode::Left) => {
            step((code == KeyCode::Right) != upside_down)
        }
        (Orientation::Vertical, KeyCode::Up | KeyCode::Down) => {
            step((code == KeyCode::Up) == upside_down)
        }
        (_, KeyCode::Up | KeyCode::Right) => SliderAction::SingleStepAdd,
        (_, KeyCode::Down | KeyCode::Left) => SliderAction::SingleStepSub,
        (_, KeyCode::PageUp) => SliderAction::PageStepAdd,
        (_, KeyCode::PageDown) => SliderAction::PageStepSub,
        (_, KeyCode::Home) => SliderAction::ToMinimum,
        (_, KeyCode::End) => SliderAction::ToMaximum,
        _ => return None,
    };
    Some(action)
}

fn handle_under<M, G>(positions: &[f64], model: &M, geometry: &G, point: Point) -> Option<usize>
where
    M: HandleModel + ?Sized,
    G: SliderGeometry + ?Sized,
{
    let (min, max) = model.bounds_f64();
    positions
        .iter()
        .position(|&p| geometry.handle_rect(p, min, max).contains_point(point))
}

/// Value of a handle centered under `point`.
fn value_under_center<M, G>(model: &M, geometry: &G, point: Point) -> f64
where
    M: HandleModel + ?Sized,
    G: SliderGeometry + ?Sized,
{
    let (min, max) = model.bounds_f64();
    let pixel = geometry
        .orientation()
        .pick(point)
        .saturating_sub(geometry.handle_length() / 2);
    geometry.value_at(pixel, min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_actions_swap_direction_only() {
        assert_eq!(
            SliderAction::SingleStepAdd.inverted(),
            SliderAction::SingleStepSub
        );
        assert_eq!(SliderAction::PageStepSub.inverted(), SliderAction::PageStepAdd);
        assert_eq!(SliderAction::ToMinimum.inverted(), SliderAction::ToMinimum);
        assert_eq!(SliderAction::Move.inverted(), SliderAction::Move);
    }

    #[test]
    fn arrows_follow_the_maximum_end() {
        use KeyCode::*;
        use Orientation::*;
        assert_eq!(key_action(Right, Horizontal, false), Some(SliderAction::SingleStepAdd));
        assert_eq!(key_action(Left, Horizontal, false), Some(SliderAction::SingleStepSub));
        assert_eq!(key_action(Right, Horizontal, true), Some(SliderAction::SingleStepSub));
        assert_eq!(key_action(Up, Horizontal, false), Some(SliderAction::SingleStepAdd));
        // Vertical sliders are upside down by default: maximum on top.
        assert_eq!(key_action(Up, Vertical, true), Some(SliderAction::SingleStepAdd));
        assert_eq!(key_action(Down, Vertical, true), Some(SliderAction::SingleStepSub));
        assert_eq!(key_action(Down, Vertical, false), Some(SliderAction::SingleStepAdd));
        assert_eq!(key_action(PageUp, Vertical, true), Some(SliderAction::PageStepAdd));
        assert_eq!(key_action(End, Horizontal, false), Some(SliderAction::ToMaximum));
        assert_eq!(key_action(Char('x'), Horizontal, false), None);
    }

    #[test]
    fn response_consumption() {
        assert!(!SliderResponse::Ignored.is_consumed());
        assert!(SliderResponse::Pressed(SliderControl::Bar).is_consumed());
    }
}
