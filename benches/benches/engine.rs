// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use floorgrid::{EngineConfig, ViewportEngine};
use floorgrid_event_state::{PointerEvent, PointerPhase};
use floorgrid_grid::RecordingSurface;
use kurbo::{Point, Size};

fn engine() -> ViewportEngine {
    let mut engine = ViewportEngine::new(EngineConfig::default()).unwrap();
    engine.set_view_size(Size::new(1_280.0, 800.0));
    engine
}

/// A two-finger pinch that zooms in and back out, one event per frame.
fn pinch_stream() -> Vec<PointerEvent> {
    let a = Point::new(400.0, 400.0);
    let mut events = vec![
        PointerEvent::down(a, 0),
        PointerEvent::new(PointerPhase::Down, &[a, Point::new(500.0, 400.0)], 8),
    ];
    let mut t = 16;
    for step in (0..60).chain((0..60).rev()) {
        let b = Point::new(500.0 + f64::from(step) * 10.0, 400.0);
        events.push(PointerEvent::new(PointerPhase::Move, &[a, b], t));
        t += 16;
    }
    events
}

fn bench_pinch_frames(c: &mut Criterion) {
    let events = pinch_stream();
    c.bench_function("engine/pinch_frames", |b| {
        b.iter_batched(
            engine,
            |mut engine| {
                let mut surface = RecordingSurface::new();
                for event in &events {
                    engine.handle_pointer_event(event);
                    engine.advance(event.timestamp_ms);
                    surface.clear();
                    engine.render(&mut surface);
                }
                black_box(engine.scale());
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_zoom_animation(c: &mut Criterion) {
    c.bench_function("engine/zoom_animation", |b| {
        b.iter_batched(
            engine,
            |mut engine| {
                engine.zoom_to(2.0, Point::new(640.0, 400.0), 0);
                let mut t = 0;
                while engine.is_animating() {
                    t += 16;
                    engine.advance(t);
                }
                black_box(engine.scale());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_pinch_frames, bench_zoom_animation);
criterion_main!(benches);
