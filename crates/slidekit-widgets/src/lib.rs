#![forbid(unsafe_code)]

//! Slider and range-slider models for slidekit.
//!
//! # Role in slidekit
//! `slidekit-widgets` holds every slider model: the pure value mapper, the
//! scalar and multi-handle cores, the decimal float adapter, the shared
//! interaction controller and the labeled composites. None of it paints;
//! the host renderer reads state and supplies geometry.
//!
//! # Layout
//! - [`mapper`]: pixel ↔ value functions.
//! - [`scalar`]: [`Slider`](scalar::Slider) over `i32` or `f64`.
//! - [`float`]: [`FloatSlider`](float::FloatSlider), decimals over `i64`.
//! - [`range`]: [`RangeSlider`](range::RangeSlider) with any number of handles.
//! - [`interaction`]: hit testing, drag, wheel and keyboard translation.
//! - [`labeled`]: sliders with editable numeric labels.
//!
//! # Feature flags
//! - `tracing`: debug events for presses, scrolls and decimal changes.
//! - `state-persistence`: serde derives for saved slider state.

pub mod config;
pub mod error;
pub mod float;
pub mod geometry;
pub mod interaction;
pub mod labeled;
pub mod mapper;
pub mod notify;
pub mod range;
pub mod scalar;
pub mod value;

use slidekit_core::event::{Event, KeyEvent, MouseEvent, WheelEvent};

use crate::float::FloatSlider;
use crate::geometry::SliderGeometry;
use crate::interaction::SliderResponse;
use crate::range::RangeSlider;
use crate::scalar::Slider;
use crate::value::SliderValue;

/// A slider model that consumes input events.
///
/// Lets hosts route events to any slider variant through one object-safe
/// interface.
pub trait SliderInput {
    /// Feed a pointer event.
    fn handle_mouse(&mut self, event: &MouseEvent, geometry: &dyn SliderGeometry) -> SliderResponse;

    /// Feed a wheel event.
    fn handle_wheel(&mut self, event: &WheelEvent) -> SliderResponse;

    /// Feed a key event.
    fn handle_key(&mut self, event: &KeyEvent, geometry: &dyn SliderGeometry) -> SliderResponse;

    /// Route a canonical event. Focus changes are ignored.
    fn handle_event(&mut self, event: &Event, geometry: &dyn SliderGeometry) -> SliderResponse {
        match event {
            Event::Mouse(mouse) => self.handle_mouse(mouse, geometry),
            Event::Wheel(wheel) => self.handle_wheel(wheel),
            Event::Key(key) => self.handle_key(key, geometry),
            Event::Focus(_) => SliderResponse::Ignored,
        }
    }
}

impl<T: SliderValue> SliderInput for Slider<T> {
    fn handle_mouse(&mut self, event: &MouseEvent, geometry: &dyn SliderGeometry) -> SliderResponse {
        Slider::handle_mouse(self, event, geometry)
    }

    fn handle_wheel(&mut self, event: &WheelEvent) -> SliderResponse {
        Slider::handle_wheel(self, event)
    }

    fn handle_key(&mut self, event: &KeyEvent, geometry: &dyn SliderGeometry) -> SliderResponse {
        Slider::handle_key(self, event, geometry)
    }
}

impl SliderInput for FloatSlider {
    fn handle_mouse(&mut self, event: &MouseEvent, geometry: &dyn SliderGeometry) -> SliderResponse {
        FloatSlider::handle_mouse(self, event, geometry)
    }

    fn handle_wheel(&mut self, event: &WheelEvent) -> SliderResponse {
        FloatSlider::handle_wheel(self, event)
    }

    fn handle_key(&mut self, event: &KeyEvent, geometry: &dyn SliderGeometry) -> SliderResponse {
        FloatSlider::handle_key(self, event, geometry)
    }
}

impl<T: SliderValue> SliderInput for RangeSlider<T> {
    fn handle_mouse(&mut self, event: &MouseEvent, geometry: &dyn SliderGeometry) -> SliderResponse {
        RangeSlider::handle_mouse(self, event, geometry)
    }

    fn handle_wheel(&mut self, event: &WheelEvent) -> SliderResponse {
        RangeSlider::handle_wheel(self, event)
    }

    fn handle_key(&mut self, event: &KeyEvent, geometry: &dyn SliderGeometry) -> SliderResponse {
        RangeSlider::handle_key(self, event, geometry)
    }
}
