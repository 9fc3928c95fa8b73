//! SBDART solver adapter.
//!
//! Bridges the sweep engine to the SBDART radiative-transfer program: the
//! whitelisted parameter table with defaults, the Fortran-namelist `INPUT`
//! writer, the sandboxed per-invocation subprocess runner, and the parsers
//! for the IOUT=1 (spectral flux) and IOUT=10 (integrated flux) stdout
//! record formats.

pub mod error;
pub mod namelist;
pub mod output;
pub mod params;
pub mod runner;

pub use error::{DriverError, DriverResult};
pub use output::{OutputFormat, FLUX_CHANNELS};
pub use runner::{SbdartConfig, SbdartSolver};
