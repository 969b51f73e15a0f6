pub mod features;
pub mod recommend;
pub mod score;

pub use features::{DeckClassifier, KeywordClassifier};
pub use recommend::recommend_questions;
pub use score::synthesize_score;
