use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use vstab_frame::{Frame, FrameInfo, PixelFormat};
use vstab_transform::{
    interpolation::{bicubic_interpolation, bilinear_interpolation},
    AffineTransform, ExecutionStrategy, InterpolationMode, TransformConfig, Transformer,
};

fn gradient_frame(info: FrameInfo) -> Frame {
    let mut frame = Frame::new(info).unwrap();
    for p in 0..info.planes() {
        let mut plane = frame.plane_mut(p);
        for y in 0..plane.height() {
            for (x, v) in plane.row_mut(y).iter_mut().enumerate() {
                *v = ((x * 3 + y * 5) % 256) as u8;
            }
        }
    }
    frame
}

fn bench_warp_planar(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarpPlanar");
    let transform = AffineTransform::new(3.5, -2.25, 0.05, 2.0);

    for (width, height) in [(640, 360), (1280, 720), (1920, 1080)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);
        let info = FrameInfo::new(*width, *height, PixelFormat::Yuv420p).unwrap();
        let src = gradient_frame(info);
        let dst = Frame::new(info).unwrap();

        for (name, mode, execution) in [
            ("bilinear_par", InterpolationMode::Bilinear, ExecutionStrategy::Parallel),
            ("bilinear_serial", InterpolationMode::Bilinear, ExecutionStrategy::Serial),
            (
                "bicubic_luma_par",
                InterpolationMode::BicubicLumaBilinearChroma,
                ExecutionStrategy::Parallel,
            ),
            ("bicubic_par", InterpolationMode::Bicubic, ExecutionStrategy::Parallel),
        ] {
            let transformer = Transformer::new(
                TransformConfig::default()
                    .with_interpolation(mode)
                    .with_execution(execution),
            );
            group.bench_with_input(
                BenchmarkId::new(name, &parameter_string),
                &(&src, &dst),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| {
                        transformer.apply(
                            black_box(&src.view()),
                            black_box(&mut dst.view_mut()),
                            black_box(&transform),
                        )
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_warp_packed(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarpPacked");
    let transform = AffineTransform::new(3.5, -2.25, 0.05, 2.0);

    for (width, height) in [(640, 360), (1280, 720)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);
        let info = FrameInfo::new(*width, *height, PixelFormat::Rgb24).unwrap();
        let src = gradient_frame(info);
        let dst = Frame::new(info).unwrap();
        let transformer = Transformer::default();

        group.bench_with_input(
            BenchmarkId::new("rgb24_par", &parameter_string),
            &(&src, &dst),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| {
                    transformer.apply(
                        black_box(&src.view()),
                        black_box(&mut dst.view_mut()),
                        black_box(&transform),
                    )
                })
            },
        );
    }
    group.finish();
}

fn bench_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("Kernels");
    let info = FrameInfo::new(64, 64, PixelFormat::Gray8).unwrap();
    let frame = gradient_frame(info);
    let plane = frame.plane(0);
    let (x, y) = ((20 << 16) + 12345, (31 << 16) + 54321);

    group.bench_function("bilinear", |b| {
        b.iter(|| bilinear_interpolation(black_box(&plane), black_box(x), black_box(y), 0))
    });
    group.bench_function("bicubic", |b| {
        b.iter(|| bicubic_interpolation(black_box(&plane), black_box(x), black_box(y), 0))
    });
    group.finish();
}

criterion_group!(benches, bench_warp_planar, bench_warp_packed, bench_kernels);
criterion_main!(benches);
