//! # Formats Module
//!
//! Byte-level snapshot formats. File I/O operations are in the app layer.

mod snapshot;

pub use snapshot::*;
