//! Promptforge: deterministic structuring, rendering and heuristic
//! optimization of rough task prompts.
//!
//! The primary path is [`forge::forge`]: variables are resolved, the input
//! is parsed into a canonical prompt, rendered for a [`prompt::PromptTarget`]
//! and checked for quality. [`optimize::optimize`] is an independent path
//! that rewrites raw text for a model family and scenario. Saved prompts,
//! templates and history live behind a [`storage::StorageBackend`].

pub mod canonical;
pub mod completion;
pub mod config;
pub mod context;
pub mod diff;
pub mod error;
pub mod exit_codes;
pub mod forge;
pub mod fs;
pub mod history;
pub mod library;
pub mod logging;
pub mod optimize;
pub mod parse;
pub mod prompt;
pub mod quality;
pub mod render;
pub mod storage;
pub mod variables;

pub use error::{ForgeError, Result};
pub use forge::{ForgeOutput, ForgeSession, forge};
