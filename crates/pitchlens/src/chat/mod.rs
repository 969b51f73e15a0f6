//! Conversation context assembly and the LLM-backed chat responder.

use std::sync::Arc;

use crate::config::{ChatConfig, LlmConfig};
use crate::llm::{CompletionProvider, GenerationConfig};
use crate::types::Analysis;

const SYSTEM_PROMPT: &str = "You are an expert startup advisor and investor relations \
specialist. You help founders improve their pitch decks and investor readiness. Always \
provide specific, actionable advice based on the context provided. Be encouraging but \
honest about areas that need improvement.";

const FALLBACK_REPLY: &str = "I apologize, but I encountered an error while processing \
your question. Please try again.";

const CUTOFF_NOTICE: &str = "\n\n[Note: the response was cut off at the length limit.]";

/// Assemble the bounded-length context string that accompanies each question.
///
/// Deterministic concatenation: analysis summary, up to 3 strengths, up to 3
/// improvements, up to 2 web snippets, a truncated deck excerpt, and a fixed
/// instruction suffix.
pub fn build_context(deck_text: &str, analysis: Option<&Analysis>, config: &ChatConfig) -> String {
    let mut context = String::from("Pitch Deck Analysis Context:\n\n");

    if let Some(analysis) = analysis {
        context.push_str(&format!("Industry: {}\n", analysis.industry));
        context.push_str(&format!("Company Stage: {}\n", analysis.stage));
        context.push_str(&format!("Value Proposition: {}\n", analysis.value_proposition));
        context.push_str(&format!(
            "Investor Readiness Score: {}/5.0\n",
            analysis.score.rating
        ));
        context.push_str(&format!(
            "Overall Assessment: {}\n\n",
            serde_json::to_value(analysis.score.overall)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default()
        ));

        if !analysis.score.strengths.is_empty() {
            context.push_str("Strengths:\n");
            for strength in analysis.score.strengths.iter().take(3) {
                context.push_str(&format!("- {}\n", strength));
            }
            context.push('\n');
        }

        if !analysis.score.improvements.is_empty() {
            context.push_str("Areas for Improvement:\n");
            for improvement in analysis.score.improvements.iter().take(3) {
                context.push_str(&format!("- {}\n", improvement));
            }
            context.push('\n');
        }

        if let Some(results) = &analysis.web_search_results {
            if !results.is_empty() {
                context.push_str("Investor Research:\n");
                for result in results.iter().take(2) {
                    context.push_str(&format!(
                        "- {}\n",
                        truncate_chars(&result.snippet, config.snippet_budget)
                    ));
                }
                context.push('\n');
            }
        }
    }

    if !deck_text.is_empty() {
        context.push_str(&format!(
            "Pitch Deck Content (excerpt):\n{}...\n\n",
            truncate_chars(deck_text, config.excerpt_budget)
        ));
    }

    context.push_str(
        "Instructions: Provide specific, actionable advice based on the pitch deck \
         analysis. Focus on practical recommendations that can improve investor readiness.",
    );

    context
}

fn truncate_chars(text: &str, budget: usize) -> String {
    text.chars().take(budget).collect()
}

/// Forwards context + question to the LLM. Always produces a reply body:
/// provider failures degrade to a fixed apology, truncation gets a marker
/// appended, and neither surfaces as an error.
pub struct ChatResponder {
    provider: Arc<dyn CompletionProvider>,
    generation: GenerationConfig,
}

impl ChatResponder {
    pub fn new(provider: Arc<dyn CompletionProvider>, llm: &LlmConfig) -> Self {
        Self {
            provider,
            generation: GenerationConfig {
                model: llm.model.clone(),
                temperature: llm.temperature,
                max_tokens: llm.max_tokens,
            },
        }
    }

    pub async fn respond(&self, question: &str, context: &str) -> String {
        let user = format!("Context:\n{}\n\nQuestion: {}", context, question);

        match self
            .provider
            .complete(SYSTEM_PROMPT, &user, &self.generation)
            .await
        {
            Ok(completion) => {
                tracing::info!(chars = completion.text.len(), "chat completion received");
                if completion.truncated {
                    format!("{}{}", completion.text, CUTOFF_NOTICE)
                } else {
                    completion.text
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "chat completion failed, returning fallback");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}
