//! Benchmarks for the per-tick CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use particle_field::prelude::*;

fn field_for(width: u32, height: u32) -> ParticleField {
    let mut field = ParticleField::new().with_seed(7);
    field.mount(SurfaceSize::from((width, height))).unwrap();
    field.start().unwrap();
    field.pointer_moved(Vec2::new(width as f32 * 0.4, height as f32 * 0.6));
    field
}

const SIZES: [(u32, u32); 3] = [(800, 600), (1920, 1080), (3840, 2160)];

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");

    for (width, height) in SIZES {
        let mut field = field_for(width, height);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", width, height)),
            &(),
            |b, _| b.iter(|| black_box(field.advance())),
        );
    }

    group.finish();
}

fn bench_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");

    for (width, height) in SIZES {
        let field = field_for(width, height);
        let mut frame = Frame::new();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", width, height)),
            &(),
            |b, _| {
                b.iter(|| {
                    field.render(&mut frame);
                    black_box(frame.line_count())
                })
            },
        );
    }

    group.finish();
}

fn bench_tick_canvas(c: &mut Criterion) {
    let mut field = field_for(1920, 1080);
    let mut canvas = Canvas::new(1920, 1080).with_background(Color::BLACK);

    c.bench_function("tick_canvas_1080p", |b| {
        b.iter(|| black_box(field.tick(&mut canvas)))
    });
}

criterion_group!(benches, bench_advance, bench_render_frame, bench_tick_canvas);
criterion_main!(benches);
