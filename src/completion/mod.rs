//! Optional text-completion collaborator.
//!
//! The core never depends on a completion succeeding. Callers that have no
//! helper configured use [`NoCompletion`], which always fails fast.

mod process;

pub use process::ProcessCompletion;

use crate::error::{ForgeError, Result};

/// What the helper is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    /// Spans the helper must reproduce verbatim.
    pub preserve: Vec<String>,
}

/// A bounded-latency, may-fail text generator.
pub trait TextCompletion {
    fn generate(&self, request: &CompletionRequest) -> Result<String>;
}

/// The absent helper.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCompletion;

impl TextCompletion for NoCompletion {
    fn generate(&self, _request: &CompletionRequest) -> Result<String> {
        Err(ForgeError::CompletionError(
            "no completion helper is configured".to_string(),
        ))
    }
}
