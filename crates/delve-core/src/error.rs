//! Layout errors

use thiserror::Error;

use crate::layout::Stage;

/// Errors surfaced by the layout pipeline.
///
/// Failing to route a corridor is not an error: those outcomes are counted
/// in the [`LayoutReport`](crate::layout::LayoutReport) instead.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid grid dimensions {width}x{height}")]
    InvalidGrid { width: i32, height: i32 },

    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Generation cancelled before stage {stage}")]
    Cancelled { stage: Stage },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LayoutError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        LayoutError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    /// True if the run was stopped by a cancellation request
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LayoutError::Cancelled { .. })
    }
}
