//! Test helpers shared across the envshape crates.
//!
//! Provides process environment guards, a recording template sink, and the
//! schemas and maps that several test suites share.

pub mod env;
pub mod fixtures;
mod sink;

pub use sink::RecordingSink;
