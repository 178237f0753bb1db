#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// binary planes decoded from RGBA buffers.
pub mod binary;

/// binary morphology module.
pub mod morphology;

/// module containing parallization utilities.
pub mod parallel;
