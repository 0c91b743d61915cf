//! CLI interface for libcompletion
//!
//! Builds a vocabulary from text files and runs completion queries against it.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, EngineArgs};
