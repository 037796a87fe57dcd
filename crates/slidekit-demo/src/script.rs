//! Synthetic gesture scripts and signal printing.

use std::fmt::Debug;

use slidekit::SliderSignals;
use slidekit::prelude::*;

/// One synthetic input. Coordinates run along the slider's axis.
#[derive(Debug, Clone, Copy)]
pub enum Gesture {
    Press(i32),
    Drag(i32),
    Release(i32),
    Hover(i32),
    Wheel(i32),
    WheelWith(i32, Modifiers),
    Key(KeyCode),
}

impl Gesture {
    fn to_event(self, geometry: &LinearGeometry) -> Event {
        let at = |along: i32, kind: MouseEventKind| {
            let groove = geometry.groove_rect();
            let mid = groove.center();
            let (x, y) = match geometry.orientation() {
                Orientation::Horizontal => (along, mid.y),
                Orientation::Vertical => (mid.x, along),
            };
            Event::Mouse(MouseEvent::new(kind, x, y))
        };
        match self {
            Self::Press(p) => at(p, MouseEventKind::Down(MouseButton::Left)),
            Self::Drag(p) => at(p, MouseEventKind::Drag(MouseButton::Left)),
            Self::Release(p) => at(p, MouseEventKind::Up(MouseButton::Left)),
            Self::Hover(p) => at(p, MouseEventKind::Moved),
            Self::Wheel(delta) => Event::Wheel(WheelEvent::vertical(delta)),
            Self::WheelWith(delta, modifiers) => {
                Event::Wheel(WheelEvent::vertical(delta).with_modifiers(modifiers))
            }
            Self::Key(code) => Event::Key(KeyEvent::new(code)),
        }
    }
}

/// A press, a drag through `path`, and a release at its last point.
pub fn drag_path(from: i32, path: &[i32]) -> Vec<Gesture> {
    let mut script = vec![Gesture::Press(from)];
    script.extend(path.iter().map(|&p| Gesture::Drag(p)));
    script.push(Gesture::Release(path.last().copied().unwrap_or(from)));
    script
}

/// Feed `script` to `slider`. Returns how many gestures were consumed.
pub fn replay(
    name: &str,
    slider: &mut dyn SliderInput,
    geometry: &LinearGeometry,
    script: &[Gesture],
) -> usize {
    let mut consumed = 0;
    for gesture in script {
        let response = slider.handle_event(&gesture.to_event(geometry), geometry);
        tracing::debug!(slider = name, ?gesture, ?response, "demo.gesture");
        if response.is_consumed() {
            consumed += 1;
        }
    }
    tracing::info!(slider = name, consumed, total = script.len(), "demo.replayed");
    consumed
}

/// Print every notification of `signals`, prefixed with `name`.
#[must_use = "dropping the subscriptions stops printing"]
pub fn watch<T, V>(name: &'static str, signals: &SliderSignals<T, V>) -> Vec<Subscription>
where
    T: Debug + 'static,
    V: Debug + 'static,
{
    vec![
        signals
            .value_changed
            .connect(move |v| println!("{name}.valueChanged {v:?}")),
        signals
            .range_changed
            .connect(move |r| println!("{name}.rangeChanged {r:?}")),
        signals
            .slider_moved
            .connect(move |p| println!("{name}.sliderMoved {p:?}")),
        signals
            .slider_pressed
            .connect(move |_| println!("{name}.sliderPressed")),
        signals
            .slider_released
            .connect(move |_| println!("{name}.sliderReleased")),
    ]
}
