use crate::types::{Analysis, WebSearchResult};

const MAX_RECOMMENDATIONS: usize = 5;

/// Produce up to 5 suggested follow-up questions for the current analysis,
/// skipping anything the user already asked.
///
/// Candidates come from five groups in a fixed order: score tier, industry,
/// stage, web-search triggers, improvement triggers. Selection first takes
/// the leading surviving candidate of each non-empty group so every group is
/// represented, then fills the remaining slots in concatenation order.
pub fn recommend_questions(analysis: &Analysis, previous_questions: &[String]) -> Vec<String> {
    let mut groups: Vec<Vec<String>> = vec![
        tier_questions(analysis.score.rating),
        industry_questions(&analysis.industry),
        stage_questions(&analysis.stage),
    ];

    if let Some(results) = &analysis.web_search_results {
        let web = web_search_questions(results);
        if !web.is_empty() {
            groups.push(web);
        }
    }

    let improvement = improvement_questions(&analysis.score.improvements);
    if !improvement.is_empty() {
        groups.push(improvement);
    }

    // Approximate "already asked" suppression: a candidate is dropped when
    // its first-three-words prefix appears inside any previous question.
    let surviving: Vec<Vec<String>> = groups
        .into_iter()
        .map(|group| {
            group
                .into_iter()
                .filter(|candidate| !already_asked(candidate, previous_questions))
                .collect()
        })
        .collect();

    let mut picked: Vec<String> = Vec::new();

    for group in &surviving {
        if picked.len() == MAX_RECOMMENDATIONS {
            break;
        }
        if let Some(first) = group.iter().find(|c| !picked.contains(*c)) {
            picked.push(first.clone());
        }
    }

    'fill: for group in &surviving {
        for candidate in group {
            if picked.len() == MAX_RECOMMENDATIONS {
                break 'fill;
            }
            if !picked.contains(candidate) {
                picked.push(candidate.clone());
            }
        }
    }

    picked
}

fn already_asked(candidate: &str, previous_questions: &[String]) -> bool {
    let prefix = candidate
        .to_lowercase()
        .split_whitespace()
        .take(3)
        .collect::<Vec<_>>()
        .join(" ");
    if prefix.is_empty() {
        return false;
    }
    previous_questions
        .iter()
        .any(|q| q.to_lowercase().contains(&prefix))
}

fn tier_questions(rating: f64) -> Vec<String> {
    let set: &[&str] = if rating < 3.0 {
        &[
            "How can I strengthen my financial projections and metrics?",
            "What specific traction metrics should I include for my industry?",
            "How can I better articulate my competitive advantage?",
        ]
    } else if rating < 4.0 {
        &[
            "What are the key investor criteria for my specific industry?",
            "How can I improve my go-to-market strategy presentation?",
            "What additional team credentials would strengthen my pitch?",
        ]
    } else {
        &[
            "How can I optimize my pitch for Series A investors?",
            "What advanced metrics would impress sophisticated investors?",
            "How can I better position my company against larger competitors?",
        ]
    };
    set.iter().map(|s| s.to_string()).collect()
}

fn industry_questions(industry: &str) -> Vec<String> {
    let set: &[&str] = match industry {
        "SaaS" => &[
            "What are the key SaaS metrics investors look for?",
            "How should I present my customer acquisition strategy?",
            "What churn rate is acceptable for my stage?",
        ],
        "Fintech" => &[
            "What regulatory considerations should I address?",
            "How can I demonstrate compliance readiness?",
            "What security measures are investors looking for?",
        ],
        "Healthtech" => &[
            "What FDA approval processes should I mention?",
            "How can I demonstrate clinical validation?",
            "What healthcare partnerships are valuable?",
        ],
        "AI/ML" => &[
            "How can I demonstrate technical differentiation?",
            "What AI ethics considerations should I address?",
            "How do I prove my AI model's accuracy?",
        ],
        "E-commerce" => &[
            "What customer lifetime value metrics matter most?",
            "How can I show scalable customer acquisition?",
            "What inventory management strategies work?",
        ],
        _ => &[
            "What are the key success metrics for my industry?",
            "How can I demonstrate market fit in my sector?",
        ],
    };
    set.iter().map(|s| s.to_string()).collect()
}

fn stage_questions(stage: &str) -> Vec<String> {
    let set: &[&str] = match stage {
        "Idea" => &[
            "How can I validate my problem-solution fit?",
            "What early traction indicators should I focus on?",
            "How should I present my MVP development plan?",
        ],
        "MVP" => &[
            "What user feedback metrics are most compelling?",
            "How can I show product-market fit?",
            "What early revenue models work best?",
        ],
        "Seed" => &[
            "What traction metrics do seed investors expect?",
            "How can I demonstrate scalable growth?",
            "What team expansion plans should I present?",
        ],
        "Series A" => &[
            "What unit economics should I highlight?",
            "How can I show path to profitability?",
            "What expansion strategies are most compelling?",
        ],
        _ => &[
            "What metrics are most important for my current stage?",
            "How can I demonstrate readiness for the next funding round?",
        ],
    };
    set.iter().map(|s| s.to_string()).collect()
}

/// One question per trigger hit, per snippet. Unlike the score synthesizer's
/// improvement triggers, duplicates are possible here.
fn web_search_questions(results: &[WebSearchResult]) -> Vec<String> {
    const TRIGGERS: &[(&str, &str)] = &[
        ("unit economics", "How can I better present my unit economics to investors?"),
        ("market size", "What market size analysis would be most compelling for my industry?"),
        ("competitive", "How can I better differentiate from competitors in my market?"),
        ("team", "What team credentials are most important for my industry and stage?"),
        ("traction", "What traction metrics are most relevant for my industry?"),
        ("go-to-market", "How can I improve my go-to-market strategy presentation?"),
    ];

    let mut questions = Vec::new();
    for result in results {
        let snippet = result.snippet.to_lowercase();
        for (trigger, question) in TRIGGERS {
            if snippet.contains(trigger) {
                questions.push(question.to_string());
            }
        }
    }
    questions
}

/// First matching trigger per improvement entry; entries can repeat a
/// question across the list.
fn improvement_questions(improvements: &[String]) -> Vec<String> {
    let mut questions = Vec::new();
    for improvement in improvements {
        if improvement.contains("financial") {
            questions.push("Can you help me create compelling financial projections?".to_string());
        } else if improvement.contains("team") {
            questions
                .push("How should I present my team's background and expertise?".to_string());
        } else if improvement.contains("market") {
            questions.push("What market size analysis would be most compelling?".to_string());
        } else if improvement.contains("competitive") {
            questions.push("How can I better differentiate from competitors?".to_string());
        }
    }
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OverallLabel, Score};
    use chrono::Utc;

    fn analysis(rating: f64, industry: &str, stage: &str) -> Analysis {
        Analysis {
            industry: industry.to_string(),
            stage: stage.to_string(),
            value_proposition: "We solve things".into(),
            score: Score {
                rating,
                strengths: Vec::new(),
                improvements: Vec::new(),
                overall: OverallLabel::from_rating(rating),
            },
            web_search_results: None,
            timestamp: Utc::now(),
            visual_analysis: None,
        }
    }

    #[test]
    fn test_never_more_than_five() {
        let mut a = analysis(2.5, "Fintech", "Seed");
        a.score.improvements = vec![
            "financial story weak".into(),
            "team slide thin".into(),
            "market sizing missing".into(),
        ];
        let recs = recommend_questions(&a, &[]);
        assert!(recs.len() <= 5);
    }

    #[test]
    fn test_weak_pitch_covers_all_groups() {
        let recs = recommend_questions(&analysis(2.5, "Fintech", "Seed"), &[]);
        assert!(recs.len() <= 5);
        assert!(recs
            .iter()
            .any(|r| r == "How can I strengthen my financial projections and metrics?"));
        assert!(recs
            .iter()
            .any(|r| r == "What regulatory considerations should I address?"));
        assert!(recs
            .iter()
            .any(|r| r == "What traction metrics do seed investors expect?"));
    }

    #[test]
    fn test_tier_selection_boundaries() {
        let weak = recommend_questions(&analysis(2.9, "Technology", "Growth"), &[]);
        assert!(weak.iter().any(|r| r.contains("financial projections and metrics")));

        let mid = recommend_questions(&analysis(3.0, "Technology", "Growth"), &[]);
        assert!(mid.iter().any(|r| r.contains("key investor criteria")));

        let strong = recommend_questions(&analysis(4.0, "Technology", "Growth"), &[]);
        assert!(strong.iter().any(|r| r.contains("Series A investors")));
    }

    #[test]
    fn test_unknown_industry_and_stage_use_generic_sets() {
        let recs = recommend_questions(&analysis(3.5, "Quantum Basket Weaving", "Series C"), &[]);
        assert!(recs
            .iter()
            .any(|r| r == "What are the key success metrics for my industry?"));
        assert!(recs
            .iter()
            .any(|r| r == "What metrics are most important for my current stage?"));
    }

    #[test]
    fn test_previously_asked_prefix_suppression() {
        let previous =
            vec!["Earlier you told me what are the key SaaS metrics to track".to_string()];
        let recs = recommend_questions(&analysis(3.5, "SaaS", "Seed"), &previous);
        assert!(!recs
            .iter()
            .any(|r| r == "What are the key SaaS metrics investors look for?"));
        for rec in &recs {
            let prefix = rec
                .to_lowercase()
                .split_whitespace()
                .take(3)
                .collect::<Vec<_>>()
                .join(" ");
            assert!(!previous.iter().any(|q| q.to_lowercase().contains(&prefix)));
        }
    }

    #[test]
    fn test_web_search_triggers_contribute() {
        let mut a = analysis(3.5, "Technology", "Growth");
        a.web_search_results = Some(vec![WebSearchResult {
            query: "q".into(),
            title: "t".into(),
            snippet: "Investors weigh unit economics and go-to-market maturity".into(),
            url: "u".into(),
            result_type: "investor_criteria".into(),
        }]);
        let recs = recommend_questions(&a, &[]);
        assert!(recs
            .iter()
            .any(|r| r == "How can I better present my unit economics to investors?"));
    }

    #[test]
    fn test_improvement_trigger_first_match_wins() {
        let questions =
            improvement_questions(&["Add financial detail and team bios".to_string()]);
        assert_eq!(
            questions,
            vec!["Can you help me create compelling financial projections?".to_string()]
        );
    }
}
