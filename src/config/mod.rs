//! Configuration model for promptforge.
//!
//! This module defines the Config struct that represents
//! `<data_dir>/config.yaml`. Every field has a default, so an empty or
//! partial file is valid, and unknown fields are ignored.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

pub use model::Config;
pub use types::{
    CompletionConfig, DEFAULT_TIMEOUT_MS, MAX_TIMEOUT_MS, MIN_TIMEOUT_MS, OptimizerConfig,
};
