use thiserror::Error;

/// Errors surfaced by the engine boundary.
///
/// Upstream failures (search, LLM) never appear here: the enricher degrades
/// to fallback snippets and the chat responder degrades to an apology, so
/// only structurally invalid input or a genuine local fault reaches the
/// caller.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required field is absent or empty. Client error, never retried.
    #[error("{0}")]
    Validation(String),

    /// Upload MIME type is neither PDF nor PPTX. Rejected before any
    /// extraction attempt.
    #[error("Invalid file type for '{filename}'. Only PDF and PPTX files are allowed.")]
    UnsupportedMedia { filename: String },

    /// Anything else. Detail is logged server-side; callers get a generic
    /// message.
    #[error("internal error")]
    Unexpected(#[from] anyhow::Error),
}

impl EngineError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True for errors the client caused (4xx-equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::UnsupportedMedia { .. })
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
