//! Demo scenes, one per slider family.

use slidekit::prelude::*;
use slidekit::{FloatState, LabeledFloatSlider, LabeledRangeSlider, LabeledSlider, RangeState};

use crate::script::{Gesture, drag_path, replay, watch};

/// A named, self-contained demo.
pub struct Scene {
    pub name: &'static str,
    pub run: fn() -> Result<()>,
}

pub const SCENES: &[Scene] = &[
    Scene {
        name: "double_sliders",
        run: double_sliders,
    },
    Scene {
        name: "float",
        run: float,
    },
    Scene {
        name: "labeled",
        run: labeled,
    },
    Scene {
        name: "persist",
        run: persist,
    },
];

fn vertical() -> LinearGeometry {
    LinearGeometry::vertical(Rect::new(0, 0, 24, 210), 10)
}

fn horizontal() -> LinearGeometry {
    LinearGeometry::horizontal(Rect::new(0, 0, 210, 24), 10)
}

fn keys_and_wheel() -> Vec<Gesture> {
    vec![
        Gesture::Key(KeyCode::Up),
        Gesture::Key(KeyCode::PageDown),
        Gesture::Wheel(120),
        Gesture::Wheel(40),
        Gesture::Wheel(40),
        Gesture::Wheel(40),
        Gesture::WheelWith(-120, Modifiers::SHIFT),
    ]
}

// ---------------------------------------------------------------------------
// double_sliders
// ---------------------------------------------------------------------------

fn double_sliders() -> Result<()> {
    let geometry = vertical();

    let mut sld0 = FloatSlider::new();
    sld0.set_value(50.0);
    sld0.set_page_step(1.0);

    let mut sld1 = LabeledFloatSlider::new();
    sld1.set_range(0.0, 1.0);
    sld1.set_value(0.5);
    sld1.update_slider(|slider| slider.set_single_step(0.01));

    let mut sld2 = DoubleRangeSlider::new();
    sld2.set_range(0.0, 1.0);
    sld2.set_value(&[0.2, 0.8])?;
    sld2.set_single_step(0.01);

    let mut sld3 = LabeledRangeSlider::<f64>::new();

    let _w0 = watch("FloatSlider", sld0.signals());
    let _w1 = watch("LabeledFloatSlider", sld1.slider().signals());
    let _w2 = watch("DoubleRangeSlider", sld2.signals());
    let _w3 = watch("LabeledRangeSlider", sld3.slider().signals());

    let mut script = drag_path(104, &[80, 40, 4, 60]);
    script.extend(keys_and_wheel());

    replay("FloatSlider", &mut sld0, &geometry, &script);
    sld1.update_slider(|slider| replay("LabeledFloatSlider", slider, &geometry, &script));
    replay("DoubleRangeSlider", &mut sld2, &geometry, &script);
    replay("LabeledRangeSlider", sld3.slider_mut(), &geometry, &script);

    // Grab the bar between the two handles and push it to the top.
    let bar = drag_path(100, &[60, 0]);
    replay("DoubleRangeSlider", &mut sld2, &geometry, &bar);

    tracing::info!(value = sld0.value(), "FloatSlider");
    tracing::info!(value = sld1.slider().value(), label = sld1.label().text(), "LabeledFloatSlider");
    tracing::info!(value = ?sld2.value(), "DoubleRangeSlider");
    tracing::info!(
        value = ?sld3.slider().value(),
        labels = ?sld3.handle_label_texts(),
        "LabeledRangeSlider"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// float
// ---------------------------------------------------------------------------

fn float() -> Result<()> {
    let mut slider = FloatSlider::new();
    let _watch = watch("FloatSlider", slider.signals());

    slider.set_range(0.0, 1.0);
    slider.set_decimals(8)?;
    slider.set_value(0.72644353);
    println!("decimals 8 holds {}", slider.value());

    // Dropping digits rounds the value and reports the change once.
    slider.set_decimals(2)?;
    println!("decimals 2 holds {}", slider.value());

    slider.set_range(-1e12, 1e12);
    match slider.set_decimals(8) {
        Ok(()) => println!("decimals 8 accepted for a wide range"),
        Err(err) => {
            tracing::warn!(%err, "demo.decimals_refused");
            println!("still at {} decimals: {err}", slider.decimals());
        }
    }

    let geometry = horizontal();
    slider.set_range(0.0, 1.0);
    replay("FloatSlider", &mut slider, &geometry, &drag_path(5, &[55, 105, 150]));
    println!("dragged to {}", slider.value());
    Ok(())
}

// ---------------------------------------------------------------------------
// labeled
// ---------------------------------------------------------------------------

fn labeled() -> Result<()> {
    let mut ints = LabeledSlider::<i32>::new();
    let _w0 = watch("LabeledSlider", ints.slider().signals());
    ints.edit_label("42");
    println!("commit '42' -> {:?}", ints.commit_label());
    ints.edit_label("forty");
    println!("commit 'forty' -> {:?}, label {}", ints.commit_label(), ints.label().text());
    ints.edit_label("500");
    println!("commit '500' -> {:?}", ints.commit_label());

    let mut floats = LabeledFloatSlider::new();
    let _w1 = watch("LabeledFloatSlider", floats.slider().signals());
    floats.set_range(0.0, 1.0);
    floats.set_decimals(3)?;
    floats.edit_label("0.1237");
    println!("commit '0.1237' -> {:?}, label {}", floats.commit_label(), floats.label().text());

    let mut range = LabeledRangeSlider::<i32>::new();
    let _w2 = watch("LabeledRangeSlider", range.slider().signals());
    range.edit_handle_label(0, "90")?;
    println!("handle 0 '90' -> {:?}", range.commit_handle_label(0)?);
    range.edit_min_label("10");
    println!("min '10' -> {:?}", range.commit_min_label());
    println!(
        "edges {} .. {}, handles {:?}",
        range.min_label_text(),
        range.max_label_text(),
        range.handle_label_texts()
    );

    range.slider_mut().replace_handles(&[15, 40, 65, 90])?;
    range.set_edges_show_range(false);
    println!(
        "{} handle labels, edges {} .. {}",
        range.handle_label_count(),
        range.min_label_text(),
        range.max_label_text()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// persist
// ---------------------------------------------------------------------------

fn persist() -> Result<()> {
    let mut range = DoubleRangeSlider::new();
    range.set_range(-1.0, 1.0);
    range.replace_handles(&[-0.5, 0.0, 0.5])?;
    range.set_bar_is_rigid(false);
    round_trip_range(&range.state())?;

    let mut precise = FloatSlider::new();
    precise.set_range(0.0, 10.0);
    precise.set_decimals(3)?;
    precise.set_value(std::f64::consts::PI);
    round_trip_float(&precise.state())?;
    Ok(())
}

fn round_trip_range(state: &RangeState<f64>) -> Result<()> {
    let json = match serde_json::to_string(state) {
        Ok(json) => json,
        Err(err) => {
            tracing::error!(%err, "demo.encode_failed");
            return Ok(());
        }
    };
    println!("range state {json}");
    let decoded: RangeState<f64> = match serde_json::from_str(&json) {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::error!(%err, "demo.decode_failed");
            return Ok(());
        }
    };
    let mut restored = DoubleRangeSlider::new();
    restored.restore(&decoded)?;
    tracing::info!(values = ?restored.value(), rigid = restored.bar_is_rigid(), "demo.restored");
    Ok(())
}

fn round_trip_float(state: &FloatState) -> Result<()> {
    let json = match serde_json::to_string(state) {
        Ok(json) => json,
        Err(err) => {
            tracing::error!(%err, "demo.encode_failed");
            return Ok(());
        }
    };
    println!("float state {json}");
    let decoded: FloatState = match serde_json::from_str(&json) {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::error!(%err, "demo.decode_failed");
            return Ok(());
        }
    };
    let mut restored = FloatSlider::new();
    restored.restore(&decoded)?;
    tracing::info!(
        value = restored.value(),
        decimals = restored.decimals(),
        "demo.restored"
    );
    Ok(())
}
