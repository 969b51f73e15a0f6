use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coarse signals pulled out of the raw deck text by the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFeatures {
    pub industry: String,
    pub stage: String,
    pub value_proposition: String,
}

/// One labeled snippet produced by the web-context enricher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchResult {
    pub query: String,
    pub title: String,
    pub snippet: String,
    pub url: String,
    #[serde(rename = "type")]
    pub result_type: String,
}

/// Qualitative label derived from the numeric rating by a step function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallLabel {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl OverallLabel {
    /// rating >= 4.0 Excellent, >= 3.0 Good, >= 2.0 Fair, else Needs Improvement.
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 4.0 {
            Self::Excellent
        } else if rating >= 3.0 {
            Self::Good
        } else if rating >= 2.0 {
            Self::Fair
        } else {
            Self::NeedsImprovement
        }
    }
}

/// Investor readiness score returned to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub rating: f64,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub overall: OverallLabel,
}

/// Top-level analysis aggregate. The caller holds this between requests and
/// resubmits it to the chat, recommendation, and visual endpoints; there is
/// no server-side session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub industry: String,
    pub stage: String,
    pub value_proposition: String,
    pub score: Score,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_search_results: Option<Vec<WebSearchResult>>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_analysis: Option<VisualAnalysis>,
}

/// Chat transcript entry. Append-only, never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Assistant,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageKind::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageKind::Assistant, content)
    }

    fn new(kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Caller-supplied slide metadata for the visual critique.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideData {
    pub total_slides: usize,
    pub slide_types: Vec<String>,
    pub has_images: bool,
    pub has_charts: bool,
    pub color_scheme: String,
    pub typography: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualAnalysis {
    pub overall_visual_score: f64,
    pub slides: Vec<SlideAnalysis>,
    pub design_principles: DesignPrinciples,
    pub recommendations: VisualRecommendationSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideAnalysis {
    pub slide_number: usize,
    pub slide_title: String,
    pub score: f64,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub visual_recommendations: Vec<VisualRecommendation>,
    pub content_analysis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualRecommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: String,
    pub description: String,
    pub suggestion: String,
    pub element: String,
    pub position: RecommendationPosition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationPosition {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignPrinciples {
    pub consistency: f64,
    pub hierarchy: f64,
    pub readability: f64,
    pub branding: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualRecommendationSet {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

/// Result of a successful upload: extraction stats plus the fresh analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReport {
    pub filename: String,
    pub text_length: usize,
    pub analysis: Analysis,
}

/// Chat turn result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_label_step_function() {
        assert_eq!(OverallLabel::from_rating(4.0), OverallLabel::Excellent);
        assert_eq!(OverallLabel::from_rating(4.9), OverallLabel::Excellent);
        assert_eq!(OverallLabel::from_rating(3.0), OverallLabel::Good);
        assert_eq!(OverallLabel::from_rating(3.9), OverallLabel::Good);
        assert_eq!(OverallLabel::from_rating(2.0), OverallLabel::Fair);
        assert_eq!(OverallLabel::from_rating(1.5), OverallLabel::NeedsImprovement);
    }

    #[test]
    fn test_overall_label_serializes_with_space() {
        let json = serde_json::to_string(&OverallLabel::NeedsImprovement).unwrap();
        assert_eq!(json, "\"Needs Improvement\"");
    }

    #[test]
    fn test_web_search_result_type_field_name() {
        let result = WebSearchResult {
            query: "q".into(),
            title: "t".into(),
            snippet: "s".into(),
            url: "u".into(),
            result_type: "investor_criteria".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], "investor_criteria");
    }

    #[test]
    fn test_message_kind_serializes_lowercase() {
        let message = Message::user("How do I improve my deck?");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["type"], "user");
        assert_eq!(json["content"], "How do I improve my deck?");

        let reply = Message::assistant("Start with traction.");
        assert_ne!(message.id, reply.id);
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["type"], "assistant");
    }

    #[test]
    fn test_analysis_round_trips_camel_case() {
        let analysis = Analysis {
            industry: "SaaS".into(),
            stage: "Seed".into(),
            value_proposition: "We solve churn".into(),
            score: Score {
                rating: 3.3,
                strengths: vec!["s".into()],
                improvements: vec!["i".into()],
                overall: OverallLabel::Good,
            },
            web_search_results: None,
            timestamp: Utc::now(),
            visual_analysis: None,
        };

        let json = serde_json::to_value(&analysis).unwrap();
        assert!(json.get("valueProposition").is_some());
        assert!(json.get("webSearchResults").is_none());

        let back: Analysis = serde_json::from_value(json).unwrap();
        assert_eq!(back.industry, "SaaS");
        assert_eq!(back.score.overall, OverallLabel::Good);
    }
}
