//! SuggestCriteriaHandler - Ask the model for evaluation criteria

use std::sync::Arc;

use tracing::debug;

use super::batch::SuggestionError;
use super::completion::complete_text;
use super::prompts::{criteria_user_prompt, CRITERIA_SYSTEM_PROMPT, CRITERIA_TEMPERATURE};
use crate::domain::decision::{Criterion, ProductSet, Topic};
use crate::domain::normalization::criteria_from_completion;
use crate::ports::{AIProvider, CompletionRequest, MessageRole, Operation, RequestMetadata};

/// Command to suggest criteria for a decision
#[derive(Debug, Clone)]
pub struct SuggestCriteriaCommand {
    pub topic: String,
    /// Options under consideration, used as prompt context. May be empty.
    pub products: Vec<String>,
}

/// Suggested criteria, all at the default weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestCriteriaResult {
    pub criteria: Vec<Criterion>,
}

/// Handler for criteria suggestion
pub struct SuggestCriteriaHandler<P: ?Sized + AIProvider> {
    ai_provider: Arc<P>,
}

impl<P: ?Sized + AIProvider> SuggestCriteriaHandler<P> {
    pub fn new(ai_provider: Arc<P>) -> Self {
        Self { ai_provider }
    }

    pub async fn handle(
        &self,
        cmd: SuggestCriteriaCommand,
    ) -> Result<SuggestCriteriaResult, SuggestionError> {
        let topic = Topic::new(&cmd.topic)?;
        let products = ProductSet::new(cmd.products)?;

        let request = CompletionRequest::new(RequestMetadata::new(Operation::SuggestCriteria))
            .with_system_prompt(CRITERIA_SYSTEM_PROMPT)
            .with_message(
                MessageRole::User,
                criteria_user_prompt(topic.as_str(), products.as_slice()),
            )
            .with_temperature(CRITERIA_TEMPERATURE);

        let content = complete_text(self.ai_provider.as_ref(), request, "[]").await?;

        let criteria = criteria_from_completion(&content);
        debug!(
            topic = %topic.as_str(),
            suggested = criteria.len(),
            "criteria suggested"
        );

        Ok(SuggestCriteriaResult { criteria })
    }
}
