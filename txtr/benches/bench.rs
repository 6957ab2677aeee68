use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::Rgba;
use txtr::{DecodeOptions, EncodeOptions, RgbaImage, TextureFormat};

const SIZE: u32 = 256;

fn test_image() -> RgbaImage {
    RgbaImage::from_fn(SIZE, SIZE, |x, y| {
        Rgba([
            x as u8,
            y as u8,
            ((x ^ y) & 0xFF) as u8,
            if (x / 16 + y / 16) % 4 == 0 { 0 } else { 0xFF },
        ])
    })
}

fn encode(c: &mut Criterion) {
    let image = test_image();
    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Elements(u64::from(SIZE * SIZE)));

    for format in TextureFormat::ALL {
        let options = EncodeOptions::new(format);
        group.bench_with_input(BenchmarkId::from_parameter(format), &options, |b, options| {
            b.iter(|| txtr::encode(&image, options).unwrap())
        });
    }
    group.finish();
}

fn decode(c: &mut Criterion) {
    let image = test_image();
    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(u64::from(SIZE * SIZE)));

    for format in TextureFormat::ALL {
        let encoded = txtr::encode(&image, &EncodeOptions::new(format)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(format), &encoded, |b, input| {
            b.iter(|| txtr::decode(&input[..], &DecodeOptions::default()).unwrap())
        });
    }
    group.finish();
}

fn mipmaps(c: &mut Criterion) {
    let image = test_image();
    let options = EncodeOptions {
        generate_mipmaps: true,
        ..EncodeOptions::new(TextureFormat::RGB5A3)
    };
    c.bench_function("encode RGB5A3 with mipmaps", |b| {
        b.iter(|| txtr::encode(&image, &options).unwrap())
    });
}

criterion_group!(benches, encode, decode, mipmaps);
criterion_main!(benches);
