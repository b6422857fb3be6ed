//! cimbar_send - encode a file into a sequence of barcode frame images.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example cimbar_send -- input.bin out_dir/ --repeat 3
//! ```

use anyhow::{Context, Result};
use cimbar_rs::cimbar_types::codec::Codec;
use cimbar_rs::cimbar_types::compression;
use cimbar_rs::cimbar_types::config::Config;
use cimbar_rs::cimbar_types::ecc::RsStream;
use cimbar_rs::cimbar_types::fountain::FountainEncoder;
use cimbar_rs::cimbar_types::frame::FrameWriter;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cimbar_send")]
#[command(author = "cimbar-rs project")]
#[command(about = "Encode a file into a sequence of barcode frame images", long_about = None)]
struct Cli {
	/// Input file to send
	input: PathBuf,

	/// Directory to write frame PNGs into
	out_dir: PathBuf,

	/// How many fountain frames to emit beyond the source packets
	#[arg(short, long, default_value_t = 4)]
	repeat: u32,

	/// Optional config file overriding baseline geometry
	#[arg(short, long)]
	config: Option<PathBuf>,
}

fn main() -> Result<()> {
	env_logger::init();
	let cli = Cli::parse();

	let config = Config::load(cli.config.as_deref()).context("loading config")?;
	let data = fs::read(&cli.input).context("reading input file")?;
	let compressed = compression::compress(&config, &data).context("compressing payload")?;

	fs::create_dir_all(&cli.out_dir).context("creating output directory")?;

	let rs = RsStream::new(&config);
	let mut encoder = FountainEncoder::new(&config, 0, &compressed);
	let codec = Codec::new(&config);
	let writer = FrameWriter::new(&config);

	let mut frame_index = 0;
	for chunk in encoder.source_packets() {
		write_frame(&cli.out_dir, frame_index, &writer, &codec, &rs.encode(&chunk))?;
		frame_index += 1;
	}
	for chunk in encoder.repair_packets(cli.repeat) {
		write_frame(&cli.out_dir, frame_index, &writer, &codec, &rs.encode(&chunk))?;
		frame_index += 1;
	}

	log::info!("wrote {frame_index} frames to {}", cli.out_dir.display());
	Ok(())
}

fn write_frame(
	out_dir: &std::path::Path,
	index: u32,
	writer: &FrameWriter,
	codec: &Codec,
	payload: &[u8],
) -> Result<()> {
	let frame = writer.write(codec, payload);
	let path = out_dir.join(format!("frame_{index:04}.png"));
	frame.save(&path).with_context(|| format!("saving {}", path.display()))?;
	Ok(())
}
