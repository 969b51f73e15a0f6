//! The engine facade: one constructed-once object owning the classifier and
//! the external providers, exposed to the HTTP layer by dependency injection.

use chrono::Utc;
use std::sync::Arc;

use crate::analysis::{recommend_questions, synthesize_score, DeckClassifier, KeywordClassifier};
use crate::chat::{build_context, ChatResponder};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::llm::{CompletionProvider, OpenAiProvider};
use crate::processing::{DeckParser, MediaType};
use crate::search::{fallback_results, DuckDuckGoProvider, SearchProvider, WebEnricher};
use crate::types::{Analysis, ChatReply, SlideData, UploadReport, VisualAnalysis};
use crate::visual::VisualCritic;

pub struct PitchEngine {
    config: EngineConfig,
    parser: DeckParser,
    classifier: Arc<dyn DeckClassifier>,
    enricher: WebEnricher<Arc<dyn SearchProvider>>,
    responder: ChatResponder,
    critic: VisualCritic,
}

impl PitchEngine {
    pub fn new(
        config: EngineConfig,
        classifier: Arc<dyn DeckClassifier>,
        search: Arc<dyn SearchProvider>,
        completion: Arc<dyn CompletionProvider>,
    ) -> Result<Self> {
        config
            .validate()
            .map_err(|e| EngineError::Unexpected(anyhow::anyhow!("invalid config: {}", e)))?;

        let responder = ChatResponder::new(completion.clone(), &config.llm);
        let critic = VisualCritic::new(completion, &config.llm);

        Ok(Self {
            config,
            parser: DeckParser::new(),
            classifier,
            enricher: WebEnricher::new(search),
            responder,
            critic,
        })
    }

    /// Default wiring: keyword classifier, DuckDuckGo search, OpenAI
    /// completions keyed from `OPENAI_API_KEY`.
    pub fn with_defaults(config: EngineConfig) -> Result<Self> {
        let search: Arc<dyn SearchProvider> = Arc::new(
            DuckDuckGoProvider::new().map_err(EngineError::Unexpected)?,
        );
        let completion: Arc<dyn CompletionProvider> = Arc::new(
            OpenAiProvider::from_env().map_err(EngineError::Unexpected)?,
        );
        Self::new(config, Arc::new(KeywordClassifier::new()), search, completion)
    }

    /// Upload pipeline: media gate, text extraction, then the analysis
    /// pipeline. Extraction failure downgrades to a placeholder string and
    /// the pipeline continues; only an unsupported MIME type aborts.
    pub async fn analyze_upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<UploadReport> {
        let media_type = MediaType::from_mime(content_type).ok_or_else(|| {
            EngineError::UnsupportedMedia {
                filename: filename.to_string(),
            }
        })?;

        let text = match self.parser.extract_text(media_type, bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(filename = %filename, error = %e, "text extraction failed, using placeholder");
                media_type.extraction_failed_placeholder().to_string()
            }
        };

        tracing::info!(filename = %filename, chars = text.chars().count(), "deck text extracted");

        let analysis = self.analyze_text(&text).await;

        Ok(UploadReport {
            filename: filename.to_string(),
            text_length: text.chars().count(),
            analysis,
        })
    }

    /// Post-extraction pipeline: classify, enrich, score.
    pub async fn analyze_text(&self, text: &str) -> Analysis {
        let features = self.classifier.classify(text);
        tracing::info!(
            industry = %features.industry,
            stage = %features.stage,
            "deck features extracted"
        );

        let web_results = if self.config.search.enabled {
            self.enricher.enrich(&features.industry, &features.stage).await
        } else {
            fallback_results(&features.industry, &features.stage)
        };

        let score = synthesize_score(text, &features.industry, &features.stage, &web_results);
        tracing::info!(rating = score.rating, "readiness score synthesized");

        Analysis {
            industry: features.industry,
            stage: features.stage,
            value_proposition: features.value_proposition,
            score,
            web_search_results: Some(web_results),
            timestamp: Utc::now(),
            visual_analysis: None,
        }
    }

    /// Chat turn. Validates the question up front; after that the responder
    /// always produces a body, so this cannot fail on upstream trouble.
    pub async fn chat(
        &self,
        question: &str,
        deck_text: &str,
        analysis: Option<&Analysis>,
    ) -> Result<ChatReply> {
        if question.trim().is_empty() {
            return Err(EngineError::validation("No question provided"));
        }

        let context = build_context(deck_text, analysis, &self.config.chat);
        let response = self.responder.respond(question, &context).await;

        Ok(ChatReply {
            response,
            timestamp: Utc::now(),
        })
    }

    pub fn recommendations(&self, analysis: &Analysis, previous_questions: &[String]) -> Vec<String> {
        recommend_questions(analysis, previous_questions)
    }

    pub async fn visual_analysis(
        &self,
        analysis: &Analysis,
        slide_data: &SlideData,
    ) -> VisualAnalysis {
        self.critic.critique(analysis, slide_data).await
    }
}
