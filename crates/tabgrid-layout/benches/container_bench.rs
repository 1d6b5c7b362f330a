//! Benchmarks for layout switching, resize and separator drags.
//!
//! Run with: cargo bench -p tabgrid-layout

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tabgrid_core::Size;
use tabgrid_layout::{Container, EngineConfig, LayoutId, instantiate};

const LARGEST: [LayoutId; 4] = [
    LayoutId::QuadSqV,
    LayoutId::QuadLeft,
    LayoutId::QuadBottom,
    LayoutId::QuadVert,
];

fn sized(layout: LayoutId) -> Container {
    let mut container = Container::new(EngineConfig::default());
    container.set_layout(layout);
    container.resize(Size::new(1920.0, 1080.0));
    container
}

fn bench_instantiate(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabgrid/instantiate");
    group.bench_function("all_templates", |b| {
        b.iter(|| {
            for layout in LayoutId::ALL {
                black_box(instantiate(black_box(layout)));
            }
        })
    });
    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabgrid/resize");
    for layout in LARGEST {
        let mut container = sized(layout);
        let mut width = 1200.0;
        group.bench_function(BenchmarkId::new("window_drag", layout.name()), |b| {
            b.iter(|| {
                width = if width > 2400.0 { 1200.0 } else { width + 7.0 };
                black_box(container.resize(Size::new(width, 900.0)))
            })
        });
    }
    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabgrid/drag");
    for layout in LARGEST {
        group.bench_function(BenchmarkId::new("pointer_stream", layout.name()), |b| {
            b.iter_batched(
                || sized(layout),
                |mut container| {
                    let separators: Vec<_> = container.separators().map(|n| n.id).collect();
                    for step in 0..64i32 {
                        let id = separators[(step as usize) % separators.len()];
                        let delta = if step % 2 == 0 { 13 } else { -11 };
                        let _ = black_box(container.pointer_drag(id, delta, delta));
                    }
                    container
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_layout_switch(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabgrid/set_layout");
    group.bench_function("cycle_all", |b| {
        let mut container = sized(LayoutId::Single);
        b.iter(|| {
            for layout in LayoutId::ALL {
                black_box(container.set_layout(layout));
            }
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_instantiate,
    bench_resize,
    bench_drag,
    bench_layout_switch
);
criterion_main!(benches);
