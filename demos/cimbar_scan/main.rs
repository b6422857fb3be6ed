//! cimbar_scan - diagnose anchor detection on a single captured image,
//! without attempting to decode any payload.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example cimbar_scan -- photo.png --rectified-out rectified.png
//! ```

use anyhow::{Context, Result};
use cimbar_rs::cimbar_types::config::Config;
use cimbar_rs::cimbar_types::extractor::{ExtractResult, Extractor};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cimbar_scan")]
#[command(author = "cimbar-rs project")]
#[command(about = "Diagnose anchor detection on a captured image", long_about = None)]
struct Cli {
	/// Captured image to scan for anchors
	input: PathBuf,

	/// If anchors are found, write the rectified frame here
	#[arg(long)]
	rectified_out: Option<PathBuf>,

	/// Treat anchors as light marks on a dark background
	#[arg(long)]
	light_anchors: bool,

	/// Optional config file overriding baseline geometry
	#[arg(short, long)]
	config: Option<PathBuf>,
}

fn main() -> Result<()> {
	env_logger::init();
	let cli = Cli::parse();

	let config = Config::load(cli.config.as_deref()).context("loading config")?;
	let captured = image::open(&cli.input).context("opening input image")?.to_rgb8();
	let extractor = Extractor::new(config.image_size, !cli.light_anchors);

	match extractor.extract(&captured) {
		ExtractResult::Success(rectified) => {
			println!("anchors found, frame rectified");
			if let Some(out) = &cli.rectified_out {
				rectified.save(out).context("saving rectified frame")?;
				println!("wrote rectified frame to {}", out.display());
			}
		}
		ExtractResult::NeedsSharpen => {
			println!("anchors found but rectification failed; image likely needs sharpening");
			std::process::exit(1);
		}
		ExtractResult::Failure(reason) => {
			println!("{reason}");
			std::process::exit(1);
		}
	}

	Ok(())
}
