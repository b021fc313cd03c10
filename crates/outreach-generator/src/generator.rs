//! Core Generator implementation

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::grounding::extract_resources;
use crate::knowledge::KnowledgeBase;
use crate::parser::{parse_email_response, MAX_EMAILS};
use crate::prompt::PromptBuilder;
use crate::types::{LogOutcome, OutreachResult};
use outreach_domain::traits::{GenerationGateway, RequestLog};
use outreach_domain::{EffortLevel, InputSnapshot, LogEntry, OutputSnapshot, ProspectQuery};
use std::fmt::Display;
use tracing::{debug, info, warn};

/// The Generator turns a prospect query into researched outreach emails
pub struct Generator<G, L>
where
    G: GenerationGateway,
    L: RequestLog,
{
    gateway: G,
    log: L,
    config: GeneratorConfig,
}

impl<G, L> Generator<G, L>
where
    G: GenerationGateway,
    L: RequestLog,
    G::Error: Display,
    L::Error: Display,
{
    /// Create a new Generator
    pub fn new(gateway: G, log: L, config: GeneratorConfig) -> Self {
        Self {
            gateway,
            log,
            config,
        }
    }

    /// The request log
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Generate three outreach emails for a prospect
    ///
    /// Validation, configuration and gateway failures abort the request.
    /// A short or empty email list, missing citations and a failed log write
    /// are all reported inside the successful result.
    pub fn generate(
        &self,
        query: &ProspectQuery,
        effort: EffortLevel,
    ) -> Result<OutreachResult, GeneratorError> {
        query.validate()?;
        let word_limit = self.resolve_word_limit(query)?;

        let knowledge = KnowledgeBase::load(&self.config.knowledge_path)?;
        let prompt = PromptBuilder::new(query, &knowledge)
            .with_word_limit(word_limit)
            .build();

        info!(
            "Generating outreach for '{}' (effort: {}, model: {})",
            query.person_name.trim(),
            effort,
            self.gateway.model_name()
        );
        debug!("Prompt length: {} chars", prompt.len());

        let response = self
            .gateway
            .generate(&prompt, effort)
            .map_err(|e| GeneratorError::Gateway(e.to_string()))?;

        debug!("Response length: {} chars", response.text.len());

        let emails = parse_email_response(&response.text);
        if emails.len() < MAX_EMAILS {
            warn!(
                "Parsed {} of {} emails; the response did not follow the requested format",
                emails.len(),
                MAX_EMAILS
            );
        }

        let resources = extract_resources(response.grounding_metadata.as_ref());

        info!(
            "Generation complete: {} emails, {} sources, {} tokens",
            emails.len(),
            resources.len(),
            response.usage.total
        );

        let entry = LogEntry::new(
            InputSnapshot::capture(query, word_limit, effort),
            OutputSnapshot {
                generated_emails: emails.clone(),
                token_usage: response.usage,
                resources: resources.clone(),
            },
        );

        let log = match self.log.append(&entry) {
            Ok(id) => LogOutcome::Recorded(id),
            Err(e) => {
                warn!("Failed to write request log entry {}: {}", entry.id, e);
                LogOutcome::Failed(e.to_string())
            }
        };

        Ok(OutreachResult {
            emails,
            resources,
            token_usage: response.usage,
            model: self.gateway.model_name().to_string(),
            log,
        })
    }

    /// Effective word limit: the query's, bounded by configuration, or the default
    fn resolve_word_limit(&self, query: &ProspectQuery) -> Result<u32, GeneratorError> {
        let Some(limit) = query.word_limit else {
            return Ok(self.config.default_word_limit);
        };

        if !(self.config.min_word_limit..=self.config.max_word_limit).contains(&limit) {
            return Err(GeneratorError::Validation(format!(
                "Word limit {} must be between {} and {}",
                limit, self.config.min_word_limit, self.config.max_word_limit
            )));
        }
        Ok(limit)
    }
}
