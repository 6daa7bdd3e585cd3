use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pixelart::codec::{self, PIXEL_COUNT};
use pixelart::metadata;
use pixelart::render;

fn checker() -> Vec<u8> {
    (0..PIXEL_COUNT).map(|i| ((i % 16) ^ (i / 16)) as u8 & 0x0F).collect()
}

fn bench_codec(c: &mut Criterion) {
    let indices = checker();
    let packed = codec::encode(&indices).unwrap();

    c.bench_function("encode", |b| b.iter(|| codec::encode(black_box(&indices))));
    c.bench_function("decode", |b| {
        b.iter(|| codec::decode(black_box(packed.as_bytes())))
    });
    c.bench_function("to_hex", |b| b.iter(|| black_box(&packed).to_hex()));
}

fn bench_metadata(c: &mut Criterion) {
    let grid = codec::decode(codec::encode(&checker()).unwrap().as_bytes()).unwrap();
    let uri = metadata::encode_token_uri("Bench", "checker", &render::render_svg(&grid, 10));

    c.bench_function("decode_token_uri", |b| {
        b.iter(|| metadata::decode_token_uri(black_box(&uri)))
    });
}

criterion_group!(benches, bench_codec, bench_metadata);
criterion_main!(benches);
