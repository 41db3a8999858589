use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hex2file_core::codec::decode_parallel;
use hex2file_core::config::ConvertConfig;
use hex2file_core::stream::convert_bytes;

fn sample_hex(bytes: usize) -> Vec<u8> {
    let data: Vec<u8> = (0..bytes).map(|i| ((i * 31 + 7) % 256) as u8).collect();
    hex::encode(data).into_bytes()
}

fn bench_decode(c: &mut Criterion) {
    let text = sample_hex(4 * 1024 * 1024);

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(text.len() as u64 / 2));

    for workers in [1, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::new("parallel-4mb", workers), &workers, |b, &w| {
            b.iter(|| decode_parallel(black_box(&text), w))
        });
    }

    group.finish();
}

fn bench_stream(c: &mut Criterion) {
    // 64-column lines, the usual dump layout.
    let mut text = Vec::new();
    for line in sample_hex(1024 * 1024).chunks(64) {
        text.extend_from_slice(line);
        text.push(b'\n');
    }

    let mut group = c.benchmark_group("stream");
    group.throughput(Throughput::Bytes(1024 * 1024));
    group.bench_function("convert-1mb-lines", |b| {
        b.iter(|| convert_bytes(black_box(&text), ConvertConfig::default()))
    });
    group.finish();
}

criterion_group!(benches, bench_decode, bench_stream);
criterion_main!(benches);
