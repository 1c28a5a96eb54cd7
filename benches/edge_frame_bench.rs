use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use edgecam::edge_frame_into;
use edgecam::filters::blur::gaussian_blur_gray_u8;
use edgecam::filters::edge::canny_u8;
use edgecam::filters::grayscale::rgba_to_gray_u8;
use ndarray::Array3;

fn test_frame(height: usize, width: usize) -> Array3<u8> {
    Array3::from_shape_fn((height, width, 4), |(y, x, c)| {
        if c == 3 {
            255
        } else {
            (((x / 16) ^ (y / 16)) as u8 & 1) * 200 + (x % 7) as u8
        }
    })
}

fn bench_edge_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_frame");
    for (width, height) in [(320, 240), (640, 480), (1280, 720)] {
        let input = test_frame(height, width);
        let mut output = Array3::<u8>::zeros((height, width, 4));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &input,
            |b, input| {
                b.iter(|| edge_frame_into(black_box(input.view()), output.view_mut()))
            },
        );
    }
    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let input = test_frame(480, 640);
    let gray = rgba_to_gray_u8(input.view());
    let smoothed = gaussian_blur_gray_u8(gray.view(), 5, 0.0).unwrap();

    c.bench_function("grayscale_640x480", |b| {
        b.iter(|| rgba_to_gray_u8(black_box(input.view())))
    });
    c.bench_function("gaussian_5x5_640x480", |b| {
        b.iter(|| gaussian_blur_gray_u8(black_box(gray.view()), 5, 0.0))
    });
    c.bench_function("canny_640x480", |b| {
        b.iter(|| canny_u8(black_box(smoothed.view()), 50.0, 150.0))
    });
}

criterion_group!(benches, bench_edge_frame, bench_stages);
criterion_main!(benches);
