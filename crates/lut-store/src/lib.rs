//! Persisted lookup-table artifacts.
//!
//! One run produces one `.lut` file holding exactly the
//! `(labels, coords, values)` 3-tuple: a fixed magic, a little-endian
//! length-prefixed JSON header with the axis metadata, then the dense value
//! payload as little-endian floats in the configured precision. Reading the
//! artifact back reproduces the table bit-for-bit for `f64`, and within
//! storage precision for `f32`. NaN missing-value sentinels survive the
//! round trip.

pub mod artifact;
pub mod error;

pub use artifact::{read_table, write_table, ArtifactMeta, Precision};
pub use error::{StoreError, StoreResult};
