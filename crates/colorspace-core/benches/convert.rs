//! Conversion Benchmarks

use colorspace_core::{
    AnyColorSpace, ChromaticAdaptationMethod, ColorSpaceBase, ConversionOptions, IccProfile,
    Rational, RenderingIntent, Rgb, space,
};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn generate_rgb_data(count: usize) -> Vec<f64> {
    (0..count)
        .flat_map(|i| {
            let t = i as f64 / count as f64;
            [t, (t * 2.0) % 1.0, (t * 3.0) % 1.0]
        })
        .collect()
}

fn bench_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("single");
    let color = Rgb::new(0.5, 0.3, 0.7);

    group.bench_function("srgb_to_xyz", |b| {
        b.iter(|| space::srgb().convert_to_xyz(black_box(color)))
    });
    group.bench_function("srgb_to_p3", |b| {
        b.iter(|| space::srgb().convert_to(space::display_p3(), black_box(color)))
    });
    group.bench_function("srgb_to_adobe_adapted", |b| {
        let options =
            ConversionOptions::adapted(ChromaticAdaptationMethod::Bradford, RenderingIntent::Perceptual);
        b.iter(|| {
            space::srgb()
                .convert_to_with(space::adobe_rgb(), black_box(color), &options)
                .unwrap()
        })
    });

    group.finish();
}

fn bench_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("slice");

    for size in [1024usize, 65536].iter() {
        let src = generate_rgb_data(*size);
        let mut dst = vec![0.0; src.len()];
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("srgb_to_p3", size), size, |b, _| {
            b.iter(|| {
                space::srgb()
                    .convert_slice(
                        space::display_p3(),
                        black_box(&src),
                        &mut dst,
                        &ConversionOptions::default(),
                    )
                    .unwrap()
            })
        });

        let rgb = AnyColorSpace::from(space::srgb().clone());
        let gray = AnyColorSpace::from(space::generic_gamma22_gray().clone());
        group.bench_with_input(BenchmarkId::new("any_srgb_to_gray", size), size, |b, _| {
            b.iter(|| {
                for px in black_box(&src).chunks_exact(3) {
                    black_box(rgb.convert_to(&gray, px, &ConversionOptions::default()).unwrap());
                }
            })
        });
    }

    group.finish();
}

fn bench_icc(c: &mut Criterion) {
    let mut group = c.benchmark_group("icc");
    let bytes = space::display_p3().icc_profile("Display P3").unwrap();

    group.bench_function("parse", |b| {
        b.iter(|| IccProfile::from_bytes(black_box(&bytes)).unwrap())
    });
    group.bench_function("import", |b| {
        b.iter(|| AnyColorSpace::from_icc(black_box(&bytes)).unwrap())
    });
    group.bench_function("export", |b| {
        b.iter(|| space::display_p3().icc_profile(black_box("Display P3")).unwrap())
    });

    group.finish();
}

fn bench_rational(c: &mut Criterion) {
    let mut group = c.benchmark_group("rational");
    let values: Vec<f64> = (1..=256).map(|i| 1.0 / i as f64 + i as f64 * 0.37).collect();

    group.bench_function("from_f64", |b| {
        b.iter(|| {
            for v in black_box(&values) {
                black_box(Rational::from_f64(*v));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_single, bench_slice, bench_icc, bench_rational);
criterion_main!(benches);
