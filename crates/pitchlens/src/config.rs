use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub llm: LlmConfig,
    pub search: SearchConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model id sent to the completions endpoint.
    pub model: String,
    /// Sampling temperature for chat and visual critique calls.
    pub temperature: f64,
    /// Output token ceiling. Responses cut at this limit get a marked-partial
    /// notice appended rather than a retry.
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// When false the enricher skips the network entirely and goes straight
    /// to the fallback records.
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Character budget for the deck excerpt embedded in the chat context.
    pub excerpt_budget: usize,
    /// Character budget per web snippet embedded in the chat context.
    pub snippet_budget: usize,
}

impl EngineConfig {
    /// Validate config values, returning errors for clearly broken configurations.
    pub fn validate(&self) -> Result<(), String> {
        if self.llm.model.trim().is_empty() {
            return Err("llm.model must not be empty".into());
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err("llm.temperature must be in [0.0, 2.0]".into());
        }
        if self.llm.max_tokens == 0 {
            return Err("llm.max_tokens must be > 0".into());
        }
        if self.chat.excerpt_budget < 100 {
            return Err("chat.excerpt_budget must be >= 100".into());
        }
        if self.chat.snippet_budget == 0 {
            return Err("chat.snippet_budget must be > 0".into());
        }
        Ok(())
    }

    /// Load config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                model: "gpt-4o-mini".to_string(),
                temperature: 0.7,
                max_tokens: 500,
            },
            search: SearchConfig { enabled: true },
            chat: ChatConfig {
                excerpt_budget: 2000,
                snippet_budget: 150,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_model() {
        let mut config = EngineConfig::default();
        config.llm.model = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_budgets() {
        let mut config = EngineConfig::default();
        config.llm.max_tokens = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.chat.excerpt_budget = 10;
        assert!(config.validate().is_err());
    }
}
