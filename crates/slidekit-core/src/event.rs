#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! This module defines the input events a slider consumes: keys, pointer
//! presses/moves, and wheel rotation. All events derive `Clone`, `PartialEq`,
//! and `Eq` for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Pointer coordinates are widget-local pixels (origin at top-left).
//! - `KeyEventKind` defaults to `Press` when the host does not distinguish.
//! - `Modifiers` and `MouseButtons` use bitflags for easy combination.
//! - Wheel deltas are in eighths of a degree; one notch is 120 units.

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer event.
    Mouse(MouseEvent),

    /// A wheel rotation.
    Wheel(WheelEvent),

    /// Focus gained or lost.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt modifier is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes the slider models react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,

    /// Right mouse button.
    Right,

    /// Middle mouse button (scroll wheel click).
    Middle,
}

bitflags! {
    /// Set of mouse buttons held down at the time of an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        /// Nothing held.
        const NONE   = 0b000;
        /// Left button.
        const LEFT   = 0b001;
        /// Right button.
        const RIGHT  = 0b010;
        /// Middle button.
        const MIDDLE = 0b100;
    }
}

impl Default for MouseButtons {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::LEFT,
            MouseButton::Right => Self::RIGHT,
            MouseButton::Middle => Self::MIDDLE,
        }
    }
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// The type of pointer event.
    pub kind: MouseEventKind,

    /// X coordinate in widget pixels.
    pub x: i32,

    /// Y coordinate in widget pixels.
    pub y: i32,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// Buttons held *after* the event was applied.
    ///
    /// For a `Down` this includes the pressed button; for an `Up` it no
    /// longer does.
    pub buttons: MouseButtons,
}

impl MouseEvent {
    /// Create a new pointer event.
    ///
    /// The held-button set is derived from `kind`: `Down`/`Drag` hold their
    /// button, everything else holds nothing.
    #[must_use]
    pub fn new(kind: MouseEventKind, x: i32, y: i32) -> Self {
        let buttons = match kind {
            MouseEventKind::Down(button) | MouseEventKind::Drag(button) => button.into(),
            _ => MouseButtons::NONE,
        };
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
            buttons,
        }
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Override the set of held buttons.
    #[must_use]
    pub const fn with_buttons(mut self, buttons: MouseButtons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Mouse button pressed down.
    Down(MouseButton),

    /// Mouse button released.
    Up(MouseButton),

    /// Mouse dragged while button held.
    Drag(MouseButton),

    /// Pointer moved with no button held (hover).
    Moved,

    /// Pointer left the widget.
    Leave,
}

/// Wheel units per notch on a standard mouse.
pub const WHEEL_DELTA: i32 = 120;

/// A wheel rotation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelEvent {
    /// Horizontal rotation in eighths of a degree.
    pub delta_x: i32,

    /// Vertical rotation in eighths of a degree (positive = away from user).
    pub delta_y: i32,

    /// Whether the platform reports "natural" (inverted) scrolling.
    pub inverted: bool,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl WheelEvent {
    /// Vertical rotation by `delta` units.
    #[must_use]
    pub const fn vertical(delta: i32) -> Self {
        Self {
            delta_x: 0,
            delta_y: delta,
            inverted: false,
            modifiers: Modifiers::NONE,
        }
    }

    /// Horizontal rotation by `delta` units.
    #[must_use]
    pub const fn horizontal(delta: i32) -> Self {
        Self {
            delta_x: delta,
            delta_y: 0,
            inverted: false,
            modifiers: Modifiers::NONE,
        }
    }

    /// Rotation by whole notches on the vertical axis.
    #[must_use]
    pub const fn notches(count: i32) -> Self {
        Self::vertical(count * WHEEL_DELTA)
    }

    /// Create a wheel event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mark the delta as platform-inverted.
    #[must_use]
    pub const fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// True when the vertical component carries the rotation.
    ///
    /// Matches hosts that report both axes: vertical wins when non-zero.
    #[must_use]
    pub const fn is_vertical(&self) -> bool {
        self.delta_y != 0
    }
}
