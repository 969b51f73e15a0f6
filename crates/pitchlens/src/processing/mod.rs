pub mod parser;

pub use parser::{DeckParser, MediaType};
