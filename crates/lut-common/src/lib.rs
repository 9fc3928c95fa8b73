//! Shared data model for the radlut workspace.
//!
//! Defines the coordinate axes and Cartesian grid swept by the engine, the
//! solver parameter sets, and the final `LookupTable` artifact type.

pub mod error;
pub mod grid;
pub mod params;
pub mod table;

pub use error::{LutError, LutResult};
pub use grid::{Axis, Grid, GridPoint};
pub use params::{ParamValue, ParameterSet};
pub use table::{CoordValues, LookupTable, OutputAxis};
