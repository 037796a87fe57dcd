//! Property-based invariant tests for the slider models.
//!
//! These tests verify structural invariants that must hold for any inputs:
//!
//! 1. pixel_to_value is monotone and pinned at both ends.
//! 2. value_to_pixel inverts pixel_to_value inside the travel.
//! 3. A scalar slider's value stays inside its range under any operations.
//! 4. Without a held handle, value and position agree.
//! 5. bound_sequence output is ordered, bounded and gap-spaced.
//! 6. Range handles stay ordered and bounded under any operations.
//! 7. Rigid bar moves preserve handle spacing.
//! 8. Decimal encoding is within half a unit.
//! 9. Changing decimals never leaves the value outside the range.
//! 10. No panics on arbitrary event sequences.

use proptest::prelude::*;
use slidekit_core::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind, WheelEvent};
use slidekit_core::geometry::Rect;
use slidekit_widgets::float::{DecimalScale, FloatSlider};
use slidekit_widgets::geometry::LinearGeometry;
use slidekit_widgets::interaction::SliderAction;
use slidekit_widgets::mapper::{pixel_to_value, value_to_pixel};
use slidekit_widgets::range::{RangeSlider, bound_sequence, neighbor_gap};
use slidekit_widgets::scalar::Slider;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Range(i32, i32),
    Value(i32),
    Position(i32),
    Action(SliderAction),
    Down(bool),
    Tracking(bool),
}

fn action() -> impl Strategy<Value = SliderAction> {
    prop_oneof![
        Just(SliderAction::SingleStepAdd),
        Just(SliderAction::SingleStepSub),
        Just(SliderAction::PageStepAdd),
        Just(SliderAction::PageStepSub),
        Just(SliderAction::ToMinimum),
        Just(SliderAction::ToMaximum),
        Just(SliderAction::Move),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-500i32..500, -500i32..500).prop_map(|(a, b)| Op::Range(a, b)),
        (-1000i32..1000).prop_map(Op::Value),
        (-1000i32..1000).prop_map(Op::Position),
        action().prop_map(Op::Action),
        any::<bool>().prop_map(Op::Down),
        any::<bool>().prop_map(Op::Tracking),
    ]
}

fn apply_scalar(slider: &mut Slider<i32>, op: &Op) {
    match *op {
        Op::Range(a, b) => slider.set_range(a, b),
        Op::Value(v) => slider.set_value(v),
        Op::Position(p) => slider.set_slider_position(p),
        Op::Action(a) => slider.trigger_action(a),
        Op::Down(d) => slider.set_slider_down(d),
        Op::Tracking(t) => slider.set_tracking(t),
    }
}

fn apply_range(slider: &mut RangeSlider<i32>, op: &Op) {
    match *op {
        Op::Range(a, b) => slider.set_range(a, b),
        Op::Value(v) => {
            let index = v.unsigned_abs() as usize % slider.handle_count();
            slider.set_value_at(index, v).unwrap();
        }
        Op::Position(p) => {
            let index = p.unsigned_abs() as usize % slider.handle_count();
            slider.set_slider_position_at(index, p).unwrap();
        }
        Op::Action(a) => slider.trigger_action(a),
        Op::Down(d) => slider.set_slider_down(d),
        Op::Tracking(t) => slider.set_tracking(t),
    }
}

fn assert_ordered(values: &[i32], min: i32, max: i32, gap: f64) -> Result<(), TestCaseError> {
    for &v in values {
        prop_assert!(v >= min && v <= max, "{} outside [{}, {}]", v, min, max);
    }
    for pair in values.windows(2) {
        prop_assert!(
            f64::from(pair[1] - pair[0]) >= gap,
            "handles {:?} closer than {}",
            values,
            gap
        );
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Mapper
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pixel_to_value_is_monotone(
        a in 0.0f64..400.0,
        b in 0.0f64..400.0,
        min in -1e6f64..1e6,
        width in 0.0f64..1e6,
        upside_down in any::<bool>(),
    ) {
        let max = min + width;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let v_lo = pixel_to_value(lo, 400.0, min, max, upside_down);
        let v_hi = pixel_to_value(hi, 400.0, min, max, upside_down);
        if upside_down {
            prop_assert!(v_lo >= v_hi);
        } else {
            prop_assert!(v_lo <= v_hi);
        }
        prop_assert!(v_lo >= min && v_lo <= max);
        prop_assert!(v_hi >= min && v_hi <= max);
    }

    #[test]
    fn pixel_round_trip_within_travel(
        pixel in 0.0f64..=250.0,
        min in -1e4f64..1e4,
        width in 1.0f64..1e4,
        upside_down in any::<bool>(),
    ) {
        let max = min + width;
        let value = pixel_to_value(pixel, 250.0, min, max, upside_down);
        let back = value_to_pixel(value, min, max, 250.0, upside_down);
        prop_assert!((back - pixel).abs() < 1e-6, "{} -> {} -> {}", pixel, value, back);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3–4. Scalar core
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn scalar_value_stays_in_range(ops in proptest::collection::vec(op(), 1..60)) {
        let mut slider = Slider::<i32>::new();
        for op in &ops {
            apply_scalar(&mut slider, op);
            prop_assert!(slider.minimum() <= slider.maximum());
            prop_assert!(slider.value() >= slider.minimum());
            prop_assert!(slider.value() <= slider.maximum());
            prop_assert!(slider.slider_position() >= slider.minimum());
            prop_assert!(slider.slider_position() <= slider.maximum());
        }
    }

    #[test]
    fn released_slider_has_no_pending_position(ops in proptest::collection::vec(op(), 1..60)) {
        let mut slider = Slider::<i32>::new();
        for op in &ops {
            apply_scalar(&mut slider, op);
        }
        slider.set_slider_down(false);
        prop_assert_eq!(slider.value(), slider.slider_position());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5–7. Range core
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bound_sequence_is_ordered_and_spaced(
        values in proptest::collection::vec(-2000.0f64..2000.0, 1..8),
        min in -1000i32..1000,
        width in 0i32..1000,
        step in 0.0f64..50.0,
    ) {
        let (min, max) = (f64::from(min), f64::from(min + width));
        let gap = neighbor_gap(min, max, step, values.len(), false);
        let out = bound_sequence(&values, min, max, gap);
        prop_assert_eq!(out.len(), values.len());
        for &v in &out {
            prop_assert!(v >= min && v <= max);
        }
        for pair in out.windows(2) {
            prop_assert!(pair[1] - pair[0] >= gap - 1e-6, "{:?} gap {}", out, gap);
        }
    }

    #[test]
    fn range_handles_stay_ordered(
        handles in proptest::collection::vec(-1000i32..1000, 2..6),
        ops in proptest::collection::vec(op(), 1..40),
    ) {
        let mut slider = RangeSlider::<i32>::new();
        slider.replace_handles(&handles).unwrap();
        for op in &ops {
            apply_range(&mut slider, op);
            let gap = slider.core().gap();
            assert_ordered(slider.value(), slider.minimum(), slider.maximum(), gap)?;
            assert_ordered(slider.slider_position(), slider.minimum(), slider.maximum(), gap)?;
        }
    }

    #[test]
    fn rigid_offset_preserves_spacing(
        delta in -300i32..300,
    ) {
        let mut slider = RangeSlider::<i32>::new();
        slider.set_range(0, 200);
        slider.set_value(&[30, 50]).unwrap();
        slider.set_slider_down(true);
        slider.offset_all_positions(delta);
        let p = slider.slider_position();
        prop_assert_eq!(p[1] - p[0], 20);
        prop_assert!(p[0] >= 0 && p[1] <= 200);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8–9. Float adapter
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn encode_within_half_a_unit(value in -1e6f64..1e6, decimals in 0i32..=3) {
        let scale = DecimalScale::new(decimals).unwrap();
        let unit = 10f64.powi(-decimals);
        let decoded = scale.decode(scale.encode(value));
        prop_assert!((decoded - value).abs() <= unit / 2.0 + 1e-9);
    }

    #[test]
    fn decimals_change_keeps_value_in_range(
        min in -1000.0f64..1000.0,
        width in 0.0f64..1000.0,
        value in -3000.0f64..3000.0,
        decimals in -2i32..=5,
    ) {
        let mut slider = FloatSlider::new();
        slider.set_range(min, min + width);
        slider.set_value(value);
        if slider.set_decimals(decimals).is_ok() {
            prop_assert_eq!(slider.decimals(), decimals);
        }
        prop_assert!(slider.value() >= slider.minimum());
        prop_assert!(slider.value() <= slider.maximum());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 10. Event sequences never panic
// ═════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
enum Input {
    Down(i32),
    Drag(i32),
    Up(i32),
    Wheel(i32),
    Key(KeyCode),
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        (-50i32..200).prop_map(Input::Down),
        (-50i32..200).prop_map(Input::Drag),
        (-50i32..200).prop_map(Input::Up),
        (-480i32..480).prop_map(Input::Wheel),
        prop_oneof![
            Just(KeyCode::Left),
            Just(KeyCode::Right),
            Just(KeyCode::PageUp),
            Just(KeyCode::PageDown),
            Just(KeyCode::Home),
            Just(KeyCode::End),
        ]
        .prop_map(Input::Key),
    ]
}

proptest! {
    #[test]
    fn arbitrary_gestures_keep_range_invariants(
        inputs in proptest::collection::vec(input(), 1..80),
        rigid in any::<bool>(),
    ) {
        let geometry = LinearGeometry::horizontal(Rect::new(0, 0, 110, 20), 10);
        let mut slider = RangeSlider::<i32>::new();
        slider.set_range(0, 100);
        slider.replace_handles(&[10, 40, 70]).unwrap();
        slider.set_bar_is_rigid(rigid);
        for input in &inputs {
            match *input {
                Input::Down(x) => {
                    slider.handle_mouse(&MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, 10), &geometry);
                }
                Input::Drag(x) => {
                    slider.handle_mouse(&MouseEvent::new(MouseEventKind::Drag(MouseButton::Left), x, 10), &geometry);
                }
                Input::Up(x) => {
                    slider.handle_mouse(&MouseEvent::new(MouseEventKind::Up(MouseButton::Left), x, 10), &geometry);
                }
                Input::Wheel(delta) => {
                    slider.handle_wheel(&WheelEvent::vertical(delta));
                }
                Input::Key(code) => {
                    slider.handle_key(&KeyEvent::new(code), &geometry);
                }
            }
            let gap = slider.core().gap();
            assert_ordered(slider.value(), 0, 100, gap)?;
            prop_assert_eq!(slider.handle_count(), 3);
        }
    }
}
