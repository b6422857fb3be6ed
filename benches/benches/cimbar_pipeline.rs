//! Benchmarks for the cimbar-rs encode/decode pipeline.

use cimbar_benches::{generate_test_payload, sizes};
use cimbar_types::codec::Codec;
use cimbar_types::lattice::CellDrift;
use cimbar_types::compression;
use cimbar_types::config::Config;
use cimbar_types::ecc::RsStream;
use cimbar_types::fountain::FountainEncoder;
use cimbar_types::frame::{FrameReader, FrameWriter};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn bench_tile_round_trip(c: &mut Criterion) {
	let config = Config::baseline();
	let codec = Codec::new(&config);
	let bits = codec.tile_index(3, 2) as u32;
	let tile = codec.encode_tile(bits);

	c.bench_function("codec_encode_tile", |b| {
		b.iter(|| codec.encode_tile(black_box(bits)));
	});
	c.bench_function("codec_decode_tile", |b| {
		b.iter(|| codec.decode_tile(black_box(&tile), CellDrift::ZERO));
	});
}

fn bench_reed_solomon(c: &mut Criterion) {
	let config = Config::baseline();
	let rs = RsStream::new(&config);
	let data = generate_test_payload(rs.data_size());
	let encoded = rs.encode(&data);

	c.bench_function("rs_encode_block", |b| {
		b.iter(|| rs.encode(black_box(&data)));
	});
	c.bench_function("rs_decode_block", |b| {
		b.iter(|| rs.decode(black_box(&encoded)));
	});
}

fn bench_frame_round_trip(c: &mut Criterion) {
	let config = Config::baseline();
	let codec = Codec::new(&config);
	let writer = FrameWriter::new(&config);
	let reader = FrameReader::new(&config);
	let payload = generate_test_payload(writer.capacity_bytes());
	let frame = writer.write(&codec, &payload);

	c.bench_function("frame_write", |b| {
		b.iter(|| writer.write(&codec, black_box(&payload)));
	});
	c.bench_function("frame_read", |b| {
		b.iter(|| reader.read(&codec, black_box(&frame)).expect("decode"));
	});
}

fn bench_fountain_encode(c: &mut Criterion) {
	let config = Config::baseline();

	let mut group = c.benchmark_group("fountain_source_packets");
	for &size in &[sizes::SMALL, sizes::MEDIUM, sizes::LARGE] {
		let payload = generate_test_payload(size);
		group.bench_function(format!("{size}_bytes"), |b| {
			b.iter(|| {
				let mut encoder = FountainEncoder::new(&config, 0, black_box(&payload));
				encoder.source_packets()
			});
		});
	}
	group.finish();
}

fn bench_compression(c: &mut Criterion) {
	let config = Config::baseline();

	let mut group = c.benchmark_group("compression_round_trip");
	for &size in &[sizes::SMALL, sizes::MEDIUM, sizes::LARGE] {
		let payload = generate_test_payload(size);
		let compressed = compression::compress(&config, &payload).expect("compress");
		group.bench_function(format!("compress_{size}_bytes"), |b| {
			b.iter(|| compression::compress(&config, black_box(&payload)));
		});
		group.bench_function(format!("decompress_{size}_bytes"), |b| {
			b.iter(|| compression::decompress(&config, black_box(&compressed)));
		});
	}
	group.finish();
}

criterion_group!(
	benches,
	bench_tile_round_trip,
	bench_reed_solomon,
	bench_frame_round_trip,
	bench_fountain_encode,
	bench_compression
);
criterion_main!(benches);
