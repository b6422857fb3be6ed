//! cimbar_recv - decode a sequence of barcode frame images back into a file.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example cimbar_recv -- frames_dir/ output.bin
//! ```

use anyhow::{Context, Result, bail};
use cimbar_rs::cimbar_types::codec::Codec;
use cimbar_rs::cimbar_types::compression;
use cimbar_rs::cimbar_types::config::Config;
use cimbar_rs::cimbar_types::ecc::RsStream;
use cimbar_rs::cimbar_types::extractor::{ExtractResult, Extractor};
use cimbar_rs::cimbar_types::fountain::FountainDecoderSink;
use cimbar_rs::cimbar_types::frame::FrameReader;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cimbar_recv")]
#[command(author = "cimbar-rs project")]
#[command(about = "Decode a sequence of barcode frame images back into a file", long_about = None)]
struct Cli {
	/// Directory of captured frame images (processed in filename order)
	frames_dir: PathBuf,

	/// Output file to write the recovered payload to
	output: PathBuf,

	/// Optional config file overriding baseline geometry
	#[arg(short, long)]
	config: Option<PathBuf>,
}

fn main() -> Result<()> {
	env_logger::init();
	let cli = Cli::parse();

	let config = Config::load(cli.config.as_deref()).context("loading config")?;
	let codec = Codec::new(&config);
	let reader = FrameReader::new(&config);
	let extractor = Extractor::new(config.image_size, true);
	let rs = RsStream::new(&config);
	let mut sink = FountainDecoderSink::new(&config);

	let mut paths: Vec<PathBuf> = fs::read_dir(&cli.frames_dir)
		.context("reading frames directory")?
		.filter_map(|entry| entry.ok().map(|e| e.path()))
		.collect();
	paths.sort();

	for (frame_index, path) in paths.iter().enumerate() {
		let captured = image::open(path).with_context(|| format!("opening {}", path.display()))?.to_rgb8();
		let rectified = match extractor.extract(&captured) {
			ExtractResult::Success(frame) => frame,
			ExtractResult::NeedsSharpen => {
				log::warn!("{}: anchors found but rectification failed, skipping", path.display());
				continue;
			}
			ExtractResult::Failure(reason) => {
				log::warn!("{}: {reason}, skipping", path.display());
				continue;
			}
		};

		let (payload, _readouts) = reader.read(&codec, &rectified).context("decoding frame")?;
		let chunks = rs.decode(&payload);
		if !chunks.iter().all(cimbar_rs::cimbar_types::ecc::Chunk::is_good) {
			log::warn!("{}: unrecoverable reed-solomon block, skipping frame", path.display());
			continue;
		}
		let mut recovered = Vec::new();
		for chunk in chunks {
			if let cimbar_rs::cimbar_types::ecc::Chunk::Good(data) = chunk {
				recovered.extend(data);
			}
		}

		if let Some(compressed) = sink.ingest(&recovered) {
			let data = compression::decompress(&config, &compressed).context("decompressing payload")?;
			fs::write(&cli.output, &data).context("writing output file")?;
			log::info!("recovered {} bytes after {} frames", data.len(), frame_index + 1);
			return Ok(());
		}
	}

	bail!("exhausted {} frames without a complete fountain reassembly", paths.len());
}
