use crate::types::ExtractedFeatures;

/// Ordered industry vocabulary. First case-insensitive substring match wins.
const INDUSTRIES: &[&str] = &[
    "SaaS",
    "Fintech",
    "Healthtech",
    "Edtech",
    "E-commerce",
    "AI/ML",
    "Biotech",
    "Clean Energy",
    "Cybersecurity",
    "Marketplace",
    "B2B",
    "B2C",
];

/// Ordered funding-stage vocabulary.
const STAGES: &[&str] = &["Idea", "MVP", "Seed", "Series A", "Series B", "Growth"];

const VALUE_PROP_KEYWORDS: &[&str] = &["solve", "problem", "value", "benefit"];

pub const DEFAULT_INDUSTRY: &str = "Technology";
pub const DEFAULT_STAGE: &str = "Seed";
pub const VALUE_PROP_PLACEHOLDER: &str = "Value proposition not clearly stated";

/// Classification seam: keyword matching today, a real model later, without
/// touching callers.
pub trait DeckClassifier: Send + Sync {
    fn classify(&self, text: &str) -> ExtractedFeatures;
}

/// Vocabulary-driven classifier. Pure and deterministic.
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    fn extract_industry(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        INDUSTRIES
            .iter()
            .find(|industry| lower.contains(&industry.to_lowercase()))
            .map(|s| s.to_string())
            .unwrap_or_else(|| DEFAULT_INDUSTRY.to_string())
    }

    fn extract_stage(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        STAGES
            .iter()
            .find(|stage| lower.contains(&stage.to_lowercase()))
            .map(|s| s.to_string())
            .unwrap_or_else(|| DEFAULT_STAGE.to_string())
    }

    fn extract_value_proposition(&self, text: &str) -> String {
        text.split(['.', '!', '?'])
            .find(|sentence| {
                let lower = sentence.to_lowercase();
                VALUE_PROP_KEYWORDS.iter().any(|kw| lower.contains(kw))
            })
            .map(|sentence| sentence.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| VALUE_PROP_PLACEHOLDER.to_string())
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> ExtractedFeatures {
        ExtractedFeatures {
            industry: self.extract_industry(text),
            stage: self.extract_stage(text),
            value_proposition: self.extract_value_proposition(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_industry_match_is_case_insensitive() {
        let classifier = KeywordClassifier::new();
        let features = classifier.classify("We are a FINTECH company for banks");
        assert_eq!(features.industry, "Fintech");
    }

    #[test]
    fn test_industry_first_match_wins() {
        let classifier = KeywordClassifier::new();
        // Both SaaS and B2B present; SaaS is earlier in the vocabulary.
        let features = classifier.classify("A B2B SaaS product");
        assert_eq!(features.industry, "SaaS");
    }

    #[test]
    fn test_industry_defaults_to_technology() {
        let classifier = KeywordClassifier::new();
        let features = classifier.classify("We sell artisanal cheese");
        assert_eq!(features.industry, "Technology");
    }

    #[test]
    fn test_stage_match_and_default() {
        let classifier = KeywordClassifier::new();
        assert_eq!(classifier.classify("raising our Series A round").stage, "Series A");
        assert_eq!(classifier.classify("no stage mentioned here").stage, "Seed");
    }

    #[test]
    fn test_value_proposition_first_matching_sentence() {
        let classifier = KeywordClassifier::new();
        let features =
            classifier.classify("We are great. We solve payment fraud for merchants! More text.");
        assert_eq!(features.value_proposition, "We solve payment fraud for merchants");
    }

    #[test]
    fn test_value_proposition_placeholder() {
        let classifier = KeywordClassifier::new();
        let features = classifier.classify("Nothing relevant here. At all.");
        assert_eq!(features.value_proposition, VALUE_PROP_PLACEHOLDER);
    }

    #[test]
    fn test_empty_text_uses_all_defaults() {
        let classifier = KeywordClassifier::new();
        let features = classifier.classify("");
        assert_eq!(features.industry, "Technology");
        assert_eq!(features.stage, "Seed");
        assert_eq!(features.value_proposition, VALUE_PROP_PLACEHOLDER);
    }
}
