use clipfall::image::{encode_dib, ImageNormalizer};
use clipfall::{CanonicalImage, ImageInput, RawPixels, SampleBuffer};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn bench_encode_dib(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_dib");
    for size in [100u32, 1080] {
        let image = CanonicalImage::filled(size, size, [30, 60, 90]).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &image, |b, image| {
            b.iter(|| encode_dib(black_box(image)).unwrap())
        });
    }
    group.finish();
}

fn bench_normalize_float(c: &mut Criterion) {
    let normalizer = ImageNormalizer::default();
    let samples: Vec<f32> = (0..512 * 512 * 3).map(|i| (i % 400) as f32 - 50.5).collect();

    c.bench_function("normalize_f32_512", |b| {
        b.iter(|| {
            let raw = RawPixels {
                width: 512,
                height: 512,
                channels: 3,
                samples: SampleBuffer::F32(samples.clone()),
            };
            normalizer.normalize(black_box(ImageInput::Raw(raw))).unwrap()
        })
    });
}

criterion_group!(benches, bench_encode_dib, bench_normalize_float);
criterion_main!(benches);
