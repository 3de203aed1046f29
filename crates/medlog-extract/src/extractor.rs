//! Extraction client with the batch-then-per-item degrade policy

use crate::client::CompletionClient;
use crate::error::{BatchRejection, ExtractError};
use crate::fallback::fallback_fields;
use crate::prompt::{build_batch_prompt, build_prompt, decode_batch, decode_single};
use medlog_core::FieldMap;
use tracing::{info, warn};

/// Turns free text into field maps
pub trait FieldExtractor {
    /// Never fails; unusable replies resolve to a fallback map
    fn extract(&self, text: &str) -> FieldMap;

    /// One field map per text, in input order
    fn extract_batch(&self, texts: &[String]) -> Result<Vec<FieldMap>, ExtractError>;
}

/// First stage: all texts in one request, reply used only if fully valid
#[derive(Debug, Clone)]
pub struct BatchStrategy {
    max_tokens: u32,
}

impl BatchStrategy {
    pub fn new(max_tokens: u32) -> Self {
        Self { max_tokens }
    }

    pub fn attempt<C: CompletionClient + ?Sized>(
        &self,
        client: &C,
        texts: &[String],
    ) -> Result<Vec<FieldMap>, BatchRejection> {
        info!(count = texts.len(), "requesting batch extraction");
        let prompt = build_batch_prompt(texts);
        let reply = client
            .complete(&prompt, self.max_tokens)
            .map_err(BatchRejection::Transport)?;
        let fields = decode_batch(&reply, texts.len())?;
        info!(count = fields.len(), "batch extraction succeeded");
        Ok(fields)
    }
}

/// Second stage: one single-text extraction per input
#[derive(Debug, Clone, Default)]
pub struct PerItemFallbackStrategy;

impl PerItemFallbackStrategy {
    pub fn run<E: FieldExtractor + ?Sized>(&self, extractor: &E, texts: &[String]) -> Vec<FieldMap> {
        texts.iter().map(|t| extractor.extract(t)).collect()
    }
}

pub struct Extractor<C> {
    client: C,
    max_tokens: u32,
    batch: BatchStrategy,
    per_item: PerItemFallbackStrategy,
}

impl<C: CompletionClient> Extractor<C> {
    /// Batch requests get twice `max_tokens`
    pub fn new(client: C, max_tokens: u32) -> Self {
        Self {
            client,
            max_tokens,
            batch: BatchStrategy::new(max_tokens.saturating_mul(2)),
            per_item: PerItemFallbackStrategy,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: CompletionClient> FieldExtractor for Extractor<C> {
    fn extract(&self, text: &str) -> FieldMap {
        let prompt = build_prompt(text);
        let reply = match self.client.complete(&prompt, self.max_tokens) {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "extraction request failed");
                return fallback_fields(text);
            }
        };

        match decode_single(&reply) {
            Ok(fields) => {
                info!(drug_name = %fields.drug_name, "extracted fields");
                fields
            }
            Err(e) => {
                warn!(error = %e, "extraction reply did not decode");
                fallback_fields(text)
            }
        }
    }

    /// Always `Ok`: a rejected batch degrades to per-item extraction
    fn extract_batch(&self, texts: &[String]) -> Result<Vec<FieldMap>, ExtractError> {
        let fields = match texts {
            [] => Vec::new(),
            [single] => vec![self.extract(single)],
            _ => match self.batch.attempt(&self.client, texts) {
                Ok(fields) => fields,
                Err(rejection) => {
                    warn!(reason = %rejection, "batch rejected, extracting one by one");
                    self.per_item.run(self, texts)
                }
            },
        };
        Ok(fields)
    }
}
