use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dqtool_testing::NinePatchBuilder;
use dqtool_ui_graphics::nine_patch::{content_insets, slice, stretch_insets};
use dqtool_ui_graphics::{Color, DEFAULT_NINE_PATCH_SCALE};

const SIDES: &[u32] = &[16, 128, 1024];

fn bench_scans(c: &mut Criterion) {
    let mut group = c.benchmark_group("nine_patch_scan");
    for &side in SIDES {
        let bitmap = NinePatchBuilder::new(side, side)
            .stretch_x(side / 3..side - side / 3)
            .stretch_y(side / 3..side - side / 3)
            .content_x(2..side - 2)
            .content_y(2..side - 2)
            .fill_interior(Color::WHITE)
            .build();
        group.bench_with_input(BenchmarkId::new("stretch", side), &bitmap, |b, bitmap| {
            b.iter(|| stretch_insets(black_box(bitmap), DEFAULT_NINE_PATCH_SCALE))
        });
        group.bench_with_input(BenchmarkId::new("content", side), &bitmap, |b, bitmap| {
            b.iter(|| content_insets(black_box(bitmap), DEFAULT_NINE_PATCH_SCALE))
        });
    }
    group.finish();
}

fn bench_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("nine_patch_slice");
    for &side in SIDES {
        let bitmap = NinePatchBuilder::new(side, side)
            .stretch_x(side / 2..side / 2 + 1)
            .stretch_y(side / 2..side / 2 + 1)
            .fill_interior(Color::BLACK)
            .build();
        group.bench_with_input(BenchmarkId::from_parameter(side), &bitmap, |b, bitmap| {
            b.iter(|| slice(black_box(bitmap), DEFAULT_NINE_PATCH_SCALE))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scans, bench_slice);
criterion_main!(benches);
