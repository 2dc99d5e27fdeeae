//! One user message in, one annotated reply out.

use std::collections::BTreeMap;

use log::{debug, info};
use serde::Serialize;

use crate::bias::BiasDetector;
use crate::completion::CompletionProvider;
use crate::data::{DataIntegrator, Record};
use crate::error::Result;
use crate::query::{QueryMap, extract_search_queries};
use crate::types::Category;

use super::session::Session;

/// Rows fetched per extracted category.
pub type DataResults = BTreeMap<Category, Vec<Record>>;

/// Everything the host needs to show for a completed turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledTurn {
    /// Reply text, already mitigated when the reply was flagged
    pub response: String,
    /// Bias in the user message or the original reply
    pub has_bias: bool,
    /// User findings first, then reply findings
    pub detected_patterns: Vec<String>,
    pub is_positive: bool,
    pub data_results: Option<DataResults>,
    /// Whether `response` differs from what the model returned
    pub mitigated: bool,
}

/// The response assembler: bias checks, data lookups and the completion call.
pub struct Assistant<P> {
    detector: BiasDetector,
    integrator: DataIntegrator,
    provider: P,
}

impl<P: CompletionProvider> Assistant<P> {
    #[must_use]
    pub fn new(detector: BiasDetector, integrator: DataIntegrator, provider: P) -> Self {
        Self {
            detector,
            integrator,
            provider,
        }
    }

    #[must_use]
    pub fn detector(&self) -> &BiasDetector {
        &self.detector
    }

    #[must_use]
    pub fn integrator(&self) -> &DataIntegrator {
        &self.integrator
    }

    /// Run one turn against the session's prior history.
    ///
    /// The session is only read; the caller records the turn on success.
    ///
    /// # Errors
    ///
    /// Fails only when the completion call fails. Bias checks and lookups
    /// cannot fail.
    pub async fn respond(&self, session: &Session, message: &str) -> Result<AssembledTurn> {
        let user_bias = self.detector.detect_bias(message);
        let user_positive = self.detector.check_positive_reinforcement(message);
        if user_bias.has_bias {
            info!(
                "Session {}: user message flagged for bias: {:?}",
                session.id(),
                user_bias.matched_phrases()
            );
        }

        let queries = extract_search_queries(message);
        let data_results = self.fetch_data(&queries);

        let history = session.prior_messages();
        debug!(
            "Session {}: requesting completion with {} prior turns",
            session.id(),
            history.len()
        );
        let reply = self.provider.complete(&history, message).await?;

        let reply_bias = self.detector.detect_bias(&reply);
        let reply_positive = self.detector.check_positive_reinforcement(&reply);

        let (response, mitigated) = if reply_bias.has_bias {
            info!(
                "Session {}: reply flagged for bias, applying mitigation: {:?}",
                session.id(),
                reply_bias.matched_phrases()
            );
            (self.detector.suggest_mitigation(&reply), true)
        } else {
            (reply, false)
        };

        let mut detected_patterns = user_bias.matched_phrases();
        detected_patterns.extend(reply_bias.matched_phrases());

        Ok(AssembledTurn {
            response,
            has_bias: user_bias.has_bias || reply_bias.has_bias,
            detected_patterns,
            is_positive: user_positive || reply_positive,
            data_results,
            mitigated,
        })
    }

    /// Look up every extracted category. Absent when nothing was extracted.
    fn fetch_data(&self, queries: &QueryMap) -> Option<DataResults> {
        if queries.is_empty() {
            return None;
        }

        let results: DataResults = queries
            .iter()
            .map(|(category, term)| {
                let rows = match category {
                    Category::Jobs => self.integrator.search_jobs(term),
                    Category::Events => self.integrator.search_events(term),
                    Category::Mentorship => self.integrator.get_mentorship_programs(),
                };
                (*category, rows.into_iter().cloned().collect())
            })
            .collect();

        Some(results)
    }
}
