//! Shared test utilities for the radlut workspace.
//!
//! Provides canned SBDART output fixtures and fake-solver scripts so
//! runner and service tests never need the real radiative-transfer
//! executable.

pub mod fixtures;
pub mod scripts;

pub use fixtures::*;
pub use scripts::*;
