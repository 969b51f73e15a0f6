pub mod analysis;
pub mod chat;
pub mod config;
pub mod engine;
pub mod error;
pub mod llm;
pub mod processing;
pub mod search;
pub mod types;
pub mod visual;

// Re-export primary types for convenience
pub use config::EngineConfig;
pub use engine::PitchEngine;
pub use error::{EngineError, Result};
pub use types::{
    Analysis, ChatReply, Message, Score, SlideData, UploadReport, VisualAnalysis,
    WebSearchResult,
};
