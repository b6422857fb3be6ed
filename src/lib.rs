#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `cimbar-rs` encodes and decodes high-density 2D color barcodes for
//! optical air-gapped data transfer: a payload goes in one end as bytes,
//! comes out the other as a still image dense enough to carry several
//! kilobytes per frame, and survives a round trip through a camera.
//!
//! This crate is a thin facade over [`cimbar_internal`]; most of the
//! useful surface lives in [`cimbar_internal::prelude`].

pub use cimbar_internal::*;
