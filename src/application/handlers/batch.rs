//! Sequential per-product batches and their failure policy.
//!
//! Detail and score suggestion issue one completion per product, one at a
//! time. Each request is fully awaited before the next begins, and results
//! are accumulated with a fold rather than in-place mutation.
//!
//! A batch may carry a deadline. A request still running when it passes is
//! cancelled, and that product and every later one count as failed under the
//! batch policy, so the results gathered so far are still returned.

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tokio::time::{timeout_at, Instant};
use tracing::warn;

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::ports::AIError;

/// What a per-product batch does when one product's request fails.
///
/// Applies identically to every per-product operation. An authentication
/// failure aborts under either policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Record the failure, skip the product and keep going.
    #[default]
    ContinueOnError,
    /// Stop at the first failure and discard partial results.
    AbortOnError,
}

/// A product whose request failed under [`BatchPolicy::ContinueOnError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFailure {
    pub product: String,
    pub message: String,
}

/// Failure message for products the batch deadline cut off.
pub const DEADLINE_MESSAGE: &str = "batch deadline reached before this product completed";

/// Results of a per-product batch, in product order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome<T> {
    pub results: Vec<T>,
    pub failures: Vec<ProductFailure>,
}

impl<T> Default for BatchOutcome<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Error type shared by the suggestion handlers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuggestionError {
    /// Input rejected before any gateway call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The completion service rejected the credentials.
    #[error("Invalid or missing API key")]
    Unauthorized,

    /// Any other completion service failure.
    #[error("{message}")]
    Service {
        /// Product being processed, for per-product operations.
        product: Option<String>,
        message: String,
    },
}

impl SuggestionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SuggestionError::Validation(err) => err.code(),
            SuggestionError::Unauthorized => ErrorCode::Unauthorized,
            SuggestionError::Service { .. } => ErrorCode::AIProviderError,
        }
    }
}

impl From<AIError> for SuggestionError {
    fn from(err: AIError) -> Self {
        match err {
            AIError::AuthenticationFailed => SuggestionError::Unauthorized,
            other => SuggestionError::Service {
                product: None,
                message: other.to_string(),
            },
        }
    }
}

impl<T> BatchOutcome<T> {
    fn record_failure(
        &mut self,
        policy: BatchPolicy,
        product: &str,
        message: String,
    ) -> Result<(), SuggestionError> {
        match policy {
            BatchPolicy::AbortOnError => Err(SuggestionError::Service {
                product: Some(product.to_string()),
                message,
            }),
            BatchPolicy::ContinueOnError => {
                warn!(product = %product, error = %message, "product request failed, continuing");
                self.failures.push(ProductFailure {
                    product: product.to_string(),
                    message,
                });
                Ok(())
            }
        }
    }
}

/// How one product's request ended.
enum Step<T> {
    Done(Result<T, AIError>),
    Expired,
}

/// Runs `call` for each product in order, applying `policy` to failures.
///
/// With a `deadline`, products not finished by then are not requested and
/// are recorded as failures with [`DEADLINE_MESSAGE`].
pub(crate) async fn run_sequential<'a, T, F, Fut>(
    products: &'a [String],
    policy: BatchPolicy,
    deadline: Option<Instant>,
    mut call: F,
) -> Result<BatchOutcome<T>, SuggestionError>
where
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = Result<T, AIError>>,
{
    stream::iter(products)
        .then(|product| {
            let pending = match deadline {
                Some(at) if Instant::now() >= at => None,
                _ => Some(call(product.as_str())),
            };
            async move {
                let step = match (pending, deadline) {
                    (None, _) => Step::Expired,
                    (Some(pending), Some(at)) => match timeout_at(at, pending).await {
                        Ok(result) => Step::Done(result),
                        Err(_) => Step::Expired,
                    },
                    (Some(pending), None) => Step::Done(pending.await),
                };
                (product, step)
            }
        })
        .map(Ok::<_, SuggestionError>)
        .try_fold(BatchOutcome::default(), move |mut outcome, (product, step)| async move {
            match step {
                Step::Done(Ok(value)) => outcome.results.push(value),
                Step::Done(Err(AIError::AuthenticationFailed)) => {
                    return Err(SuggestionError::Unauthorized)
                }
                Step::Done(Err(err)) => outcome.record_failure(policy, product, err.to_string())?,
                Step::Expired => {
                    outcome.record_failure(policy, product, DEADLINE_MESSAGE.to_string())?
                }
            }
            Ok(outcome)
        })
        .await
}
