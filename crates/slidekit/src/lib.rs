#![forbid(unsafe_code)]

//! slidekit public facade crate.
//!
//! Re-exports the stable surface of the slider models and their input types,
//! plus a prelude for day-to-day usage.
//!
//! ```
//! use slidekit::prelude::*;
//!
//! let mut slider = IntRangeSlider::new();
//! slider.set_range(0, 100);
//! let geometry = LinearGeometry::horizontal(Rect::new(0, 0, 110, 20), 10);
//! slider.handle_key(&KeyEvent::new(KeyCode::End), &geometry);
//! assert_eq!(slider.value(), &[40, 100]);
//! ```

// --- Core re-exports -------------------------------------------------------

pub use slidekit_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseButtons, MouseEvent,
    MouseEventKind, WHEEL_DELTA, WheelEvent,
};
pub use slidekit_core::geometry::{Point, Rect};
pub use slidekit_core::signal::{Signal, Subscription};

// --- Widget re-exports -----------------------------------------------------

pub use slidekit_widgets::SliderInput;
pub use slidekit_widgets::config::SliderConfig;
pub use slidekit_widgets::error::{Result, SliderError};
pub use slidekit_widgets::float::{DecimalScale, FloatSlider, FloatState};
pub use slidekit_widgets::geometry::{LinearGeometry, Orientation, SliderGeometry};
pub use slidekit_widgets::interaction::{SliderAction, SliderControl, SliderResponse};
pub use slidekit_widgets::labeled::{
    LabelPosition, LabeledFloatSlider, LabeledRangeSlider, LabeledSlider, SpinLabel,
};
pub use slidekit_widgets::notify::{SliderNotification, SliderSignals};
pub use slidekit_widgets::range::{
    DoubleRangeSlider, IntRangeSlider, RangeSlider, RangeState,
};
pub use slidekit_widgets::scalar::{DoubleSlider, IntSlider, ScalarState, Slider};
pub use slidekit_widgets::value::SliderValue;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DoubleRangeSlider, DoubleSlider, Event, FloatSlider, IntRangeSlider, IntSlider, KeyCode,
        KeyEvent, LinearGeometry, Modifiers, MouseButton, MouseEvent, MouseEventKind, Orientation,
        RangeSlider, Rect, Result, Slider, SliderConfig, SliderError, SliderGeometry, SliderInput,
        SliderResponse, Subscription, WheelEvent,
    };

    pub use crate::{core, widgets};
}

pub use slidekit_core as core;
pub use slidekit_widgets as widgets;
