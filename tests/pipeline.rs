//! End-to-end round trip: compress, fountain-encode, reed-solomon wrap,
//! paint a frame, scan it back, and recover the original bytes.

use cimbar_rs::cimbar_types::codec::Codec;
use cimbar_rs::cimbar_types::compression;
use cimbar_rs::cimbar_types::config::Config;
use cimbar_rs::cimbar_types::ecc::{Chunk, RsStream};
use cimbar_rs::cimbar_types::extractor::{ExtractResult, Extractor};
use cimbar_rs::cimbar_types::fountain::{FountainDecoderSink, FountainEncoder};
use cimbar_rs::cimbar_types::frame::{FrameReader, FrameWriter};

fn frame_payload(rs: &RsStream, codec: &Codec, writer: &FrameWriter, chunk: &[u8]) -> image::RgbImage {
	writer.write(codec, &rs.encode(chunk))
}

#[test]
fn encode_frame_then_extract_and_decode_round_trips() {
	let config = Config::baseline();
	let original = b"the quick brown fox jumps over the lazy dog".repeat(20);

	let compressed = compression::compress(&config, &original).expect("compress");

	let rs = RsStream::new(&config);
	let codec = Codec::new(&config);
	let writer = FrameWriter::new(&config);
	let reader = FrameReader::new(&config);
	let extractor = Extractor::new(config.image_size, true);
	let mut sink = FountainDecoderSink::new(&config);

	let mut encoder = FountainEncoder::new(&config, 0, &compressed);
	let mut chunks = encoder.source_packets();
	chunks.extend(encoder.repair_packets(4));

	let mut recovered_payload = None;
	for chunk in &chunks {
		let frame = frame_payload(&rs, &codec, &writer, chunk);

		let rectified = match extractor.extract(&frame) {
			ExtractResult::Success(rectified) => rectified,
			ExtractResult::NeedsSharpen | ExtractResult::Failure(_) => continue,
		};

		let (payload, _readouts) = reader.read(&codec, &rectified).expect("decode");
		let blocks = rs.decode(&payload);
		if !blocks.iter().all(Chunk::is_good) {
			continue;
		}
		let mut good = Vec::new();
		for block in blocks {
			if let Chunk::Good(data) = block {
				good.extend(data);
			}
		}

		if let Some(assembled) = sink.ingest(&good) {
			recovered_payload = Some(assembled);
			break;
		}
	}

	let assembled = recovered_payload.expect("fountain stream should reassemble from painted frames");
	let decompressed = compression::decompress(&config, &assembled).expect("decompress");
	assert_eq!(decompressed, original);
}

#[test]
fn scanning_a_blank_image_reports_failure() {
	let config = Config::baseline();
	let extractor = Extractor::new(config.image_size, true);
	let blank = image::RgbImage::from_pixel(config.image_size, config.image_size, image::Rgb([255, 255, 255]));

	assert!(matches!(extractor.extract(&blank), ExtractResult::Failure(_)));
}
