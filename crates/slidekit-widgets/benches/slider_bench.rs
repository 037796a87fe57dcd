//! Benchmark: pixel mapping and drag throughput.
//!
//! Run with: `cargo bench -p slidekit-widgets --bench slider_bench`
//!
//! Measures the pure mapper, a full press/drag/release gesture on single
//! and range sliders, and wheel scrolling through the accumulator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use slidekit_core::event::{MouseButton, MouseEvent, MouseEventKind, WheelEvent};
use slidekit_core::geometry::Rect;
use slidekit_widgets::geometry::LinearGeometry;
use slidekit_widgets::mapper::{pixel_to_value, value_to_pixel};
use slidekit_widgets::range::RangeSlider;
use slidekit_widgets::scalar::Slider;

const GROOVE: Rect = Rect::new(0, 0, 1010, 24);

// ===========================================================================
// Mapper
// ===========================================================================

fn bench_mapper(c: &mut Criterion) {
    let mut group = c.benchmark_group("mapper");

    group.bench_function("pixel_to_value", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for px in 0..1000 {
                acc += pixel_to_value(black_box(f64::from(px)), 1000.0, -50.0, 50.0, false);
            }
            acc
        });
    });
    group.bench_function("value_to_pixel", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for v in 0..1000 {
                acc += value_to_pixel(black_box(f64::from(v)), 0.0, 1000.0, 1000.0, true);
            }
            acc
        });
    });
    group.bench_function("pixel_to_value/extreme_range", |b| {
        b.iter(|| pixel_to_value(black_box(333.0), 1000.0, f64::MIN, f64::MAX, false));
    });

    group.finish();
}

// ===========================================================================
// Drag gestures
// ===========================================================================

fn drag_events(steps: i32) -> Vec<MouseEvent> {
    let mut events = Vec::with_capacity(steps as usize + 2);
    events.push(MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 5, 12));
    for i in 0..steps {
        let x = 5 + (i * 7) % 1000;
        events.push(MouseEvent::new(MouseEventKind::Drag(MouseButton::Left), x, 12));
    }
    events.push(MouseEvent::new(MouseEventKind::Up(MouseButton::Left), 500, 12));
    events
}

fn bench_drag(c: &mut Criterion) {
    let geometry = LinearGeometry::horizontal(GROOVE, 10);
    let mut group = c.benchmark_group("drag");

    for steps in [16, 256] {
        let events = drag_events(steps);

        group.bench_with_input(BenchmarkId::new("slider_i32", steps), &events, |b, events| {
            let mut slider = Slider::<i32>::new();
            slider.set_range(0, 1000);
            let _sub = slider.signals().value_changed.connect(|v| {
                black_box(*v);
            });
            b.iter(|| {
                slider.set_value(0);
                for event in events {
                    slider.handle_mouse(event, &geometry);
                }
                slider.value()
            });
        });

        group.bench_with_input(BenchmarkId::new("range_4_handles", steps), &events, |b, events| {
            let mut slider = RangeSlider::<f64>::new();
            slider.set_range(0.0, 1000.0);
            b.iter(|| {
                let _ = slider.replace_handles(&[0.0, 250.0, 500.0, 750.0]);
                for event in events {
                    slider.handle_mouse(event, &geometry);
                }
                slider.value()[0]
            });
        });
    }

    group.finish();
}

// ===========================================================================
// Wheel
// ===========================================================================

fn bench_wheel(c: &mut Criterion) {
    let mut group = c.benchmark_group("wheel");

    group.bench_function("partial_notches", |b| {
        let mut slider = Slider::<i32>::new();
        slider.set_range(0, 1_000_000);
        b.iter(|| {
            slider.set_value(500_000);
            for _ in 0..64 {
                slider.handle_wheel(black_box(&WheelEvent::vertical(15)));
            }
            slider.value()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_mapper, bench_drag, bench_wheel);
criterion_main!(benches);
