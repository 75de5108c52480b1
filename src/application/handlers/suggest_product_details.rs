//! SuggestProductDetailsHandler - Per-product, per-criterion descriptions

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use super::batch::{run_sequential, BatchPolicy, ProductFailure, SuggestionError};
use super::completion::complete_text;
use super::prompts::{details_user_prompt, DETAILS_SYSTEM_PROMPT, DETAILS_TEMPERATURE};
use crate::domain::decision::{CriteriaSet, Criterion, ProductDetail, ProductSet, Topic};
use crate::domain::normalization::detail_from_completion;
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole, Operation, RequestMetadata};

/// Command to describe each product against each criterion
#[derive(Debug, Clone)]
pub struct SuggestProductDetailsCommand {
    pub topic: String,
    pub products: Vec<String>,
    pub criteria: Vec<Criterion>,
}

/// One detail per successful product, in product order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestProductDetailsResult {
    pub details: Vec<ProductDetail>,
    pub failures: Vec<ProductFailure>,
}

/// Handler for product detail suggestion
pub struct SuggestProductDetailsHandler<P: ?Sized + AIProvider> {
    ai_provider: Arc<P>,
    policy: BatchPolicy,
    deadline: Option<Duration>,
}

impl<P: ?Sized + AIProvider> SuggestProductDetailsHandler<P> {
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
        cmd: SuggestProductDetailsCommand,
    ) -> Result<SuggestProductDetailsResult, SuggestionError> {
        let topic = Topic::new(&cmd.topic)?;
        let products = ProductSet::non_empty(cmd.products)?;
        let criteria = CriteriaSet::new(cmd.criteria)?;
        let names = criteria.names();

        let deadline = self.deadline.map(|budget| Instant::now() + budget);
        let outcome = run_sequential(products.as_slice(), self.policy, deadline, |product| {
            self.describe(topic.as_str(), product, &names)
        })
        .await?;

        debug!(
            products = products.len(),
            described = outcome.results.len(),
            failed = outcome.failures.len(),
            "product details suggested"
        );

        Ok(SuggestProductDetailsResult {
            details: outcome.results,
            failures: outcome.failures,
        })
    }

    async fn describe(
        &self,
        topic: &str,
        product: &str,
        names: &[String],
    ) -> Result<ProductDetail, AIError> {
        let request = CompletionRequest::new(
            RequestMetadata::new(Operation::ProductDetails).with_product(product),
        )
        .with_system_prompt(DETAILS_SYSTEM_PROMPT)
        .with_message(MessageRole::User, details_user_prompt(topic, product, names))
        .with_temperature(DETAILS_TEMPERATURE);

        let content = complete_text(self.ai_provider.as_ref(), request, "{}").await?;

        Ok(detail_from_completion(&content, product, names))
    }
}
