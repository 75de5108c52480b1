//! SuggestScoresHandler - Per-product 1-10 ratings on every criterion

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use super::batch::{run_sequential, BatchPolicy, ProductFailure, SuggestionError};
use super::completion::complete_text;
use super::prompts::{scores_user_prompt, SCORES_SYSTEM_PROMPT, SCORES_TEMPERATURE};
use crate::domain::decision::{CriteriaSet, Criterion, ProductSet, ScoreMatrix, Topic};
use crate::domain::normalization::{scores_from_completion, ProductScores};
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole, Operation, RequestMetadata};

/// Command to rate each product against each criterion
#[derive(Debug, Clone)]
pub struct SuggestScoresCommand {
    pub topic: String,
    pub products: Vec<String>,
    pub criteria: Vec<Criterion>,
}

/// Suggested score matrix. Failed products have no row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestScoresResult {
    pub scores: ScoreMatrix,
    pub failures: Vec<ProductFailure>,
}

/// Handler for score suggestion
pub struct SuggestScoresHandler<P: ?Sized + AIProvider> {
    ai_provider: Arc<P>,
    policy: BatchPolicy,
    deadline: Option<Duration>,
}

impl<P: ?Sized + AIProvider> SuggestScoresHandler<P> {
    pub fn new(ai_provider: Arc<P>, policy: BatchPolicy) -> Self {
        Self {
            ai_provider,
            policy,
            deadline: None,
        }
    }

    /// Bounds the whole batch. Products not finished in time become failures.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub async fn handle(
        &self,
        cmd: SuggestScoresCommand,
    ) -> Result<SuggestScoresResult, SuggestionError> {
        let topic = Topic::new(&cmd.topic)?;
        let products = ProductSet::non_empty(cmd.products)?;
        let criteria = CriteriaSet::new(cmd.criteria)?;
        let names = criteria.names();

        let deadline = self.deadline.map(|budget| Instant::now() + budget);
        let outcome = run_sequential(products.as_slice(), self.policy, deadline, |product| {
            self.rate(topic.as_str(), product, &names)
        })
        .await?;

        let scores = outcome
            .results
            .into_iter()
            .fold(ScoreMatrix::new(), |mut matrix, row| {
                matrix.insert_product(row.product, row.scores);
                matrix
            });

        debug!(
            products = products.len(),
            failed = outcome.failures.len(),
            "scores suggested"
        );

        Ok(SuggestScoresResult {
            scores,
            failures: outcome.failures,
        })
    }

    async fn rate(
        &self,
        topic: &str,
        product: &str,
        names: &[String],
    ) -> Result<ProductScores, AIError> {
        let request = CompletionRequest::new(
            RequestMetadata::new(Operation::SuggestScores).with_product(product),
        )
        .with_system_prompt(SCORES_SYSTEM_PROMPT)
        .with_message(MessageRole::User, scores_user_prompt(topic, product, names))
        .with_temperature(SCORES_TEMPERATURE);

        let content = complete_text(self.ai_provider.as_ref(), request, "{}").await?;

        Ok(scores_from_completion(&content, product, names))
    }
}
