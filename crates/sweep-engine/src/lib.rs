//! Grid-sweep orchestration engine.
//!
//! Turns "solve this for every point in this grid" into one consistent
//! labeled array: enumerates the Cartesian grid, dispatches one isolated
//! solver invocation per point under bounded concurrency, parses each
//! response, and places every result into its slot by index tuple before
//! packaging the immutable `LookupTable`.
//!
//! The external solver is abstracted behind the [`PointSolver`] trait so the
//! engine stays independent of any particular radiative-transfer code.

pub mod assemble;
pub mod error;
pub mod materialize;
pub mod record;
pub mod scheduler;
pub mod solver;

pub use assemble::{Assembler, SweepOutput, SweepReport};
pub use error::{FailureReason, PointFailure, SweepError, SweepResult};
pub use materialize::{materialize, validate_axis_labels};
pub use record::{OutputRecord, ShapeSignature};
pub use scheduler::{run_sweep, DEFAULT_WORKERS};
pub use solver::{InvocationErrorKind, ParseError, PointSolver, SolverResponse};
