//! Core data types and algorithms behind the cimbar optical codec: a
//! lattice of color/shape tiles packed into a single still image, with
//! Reed-Solomon and fountain coding layered on top so a payload survives a
//! handful of dropped or smudged frames.
//!
//! # Pipeline
//!
//! ```text
//! bytes -> compression -> fountain -> ecc -> lattice/codec -> frame -> (camera) -> extractor -> frame -> lattice/codec -> ecc -> fountain -> compression -> bytes
//! ```
//!
//! # Examples
//!
//! ```rust
//! use cimbar_types::config::Config;
//! use cimbar_types::codec::Codec;
//! use cimbar_types::lattice::CellDrift;
//!
//! let config = Config::baseline();
//! let codec = Codec::new(&config);
//! let tile = codec.encode_tile(0);
//! assert_eq!(codec.decode_tile(&tile, CellDrift::ZERO).symbol, 0);
//! ```

pub mod bitstream;
pub mod codec;
pub mod compression;
pub mod concurrent;
pub mod config;
pub mod ecc;
pub mod error;
pub mod extractor;
pub mod fountain;
pub mod frame;
pub mod imagehash;
pub mod lattice;

pub mod prelude;

pub use config::Config;
pub use error::{CimbarError, Result};
