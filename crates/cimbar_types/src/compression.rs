//! Optional zstd pass applied to the payload before fountain-encoding it,
//! trading a little CPU for fewer chunks (and thus a shorter capture) on
//! compressible input.

use crate::config::Config;
use crate::error::Result;
use std::io::{Read, Write};

/// Compress `data` at `config.compression_level`. A level of `0` disables
/// compression and returns `data` unchanged.
///
/// # Errors
///
/// Returns an error if the underlying zstd stream fails.
pub fn compress(config: &Config, data: &[u8]) -> Result<Vec<u8>> {
    if config.compression_level <= 0 {
        return Ok(data.to_vec());
    }
    let mut encoder = zstd::Encoder::new(Vec::new(), config.compression_level)?;
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress `data` produced by [`compress`] at the same compression
/// setting. A disabled (`0`) compression level returns `data` unchanged.
///
/// # Errors
///
/// Returns an error if `data` isn't a valid zstd stream.
pub fn decompress(config: &Config, data: &[u8]) -> Result<Vec<u8>> {
    if config.compression_level <= 0 {
        return Ok(data.to_vec());
    }
    let mut decoder = zstd::Decoder::new(data)?;
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}
