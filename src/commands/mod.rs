//! Command handlers.
//!
//! This module contains handlers for the run and generate commands.

pub mod generate;
pub mod run;

pub use generate::{run_generate, GenerateArgs};
pub use run::run_publish;
