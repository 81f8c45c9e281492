//! Library interface for the `envshape` command-line tool.
//!
//! A manifest file declares a schema, the environment key behind each field,
//! and example values. The commands in [`commands`] render example `.env`
//! files from it and check the running environment against it.

pub mod cli;
pub mod commands;
pub mod error;
pub mod manifest;
