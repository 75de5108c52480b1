//! One completion round-trip, shared by the suggestion handlers.

use tracing::{debug, warn};

use crate::ports::{AIError, AIProvider, CompletionRequest, FinishReason};

/// Sends `request` and returns the completion text.
///
/// A blank completion reads as `empty`, the caller's "nothing suggested"
/// document. A completion cut off by the token limit or a content filter is
/// still returned; extraction copes with partial JSON as best it can.
pub(crate) async fn complete_text<P: ?Sized + AIProvider>(
    provider: &P,
    request: CompletionRequest,
    empty: &str,
) -> Result<String, AIError> {
    let operation = request.metadata.operation;
    let trace_id = request.metadata.trace_id.clone();
    let product = request.metadata.product.clone();

    let response = provider.complete(request).await?;

    debug!(
        %operation,
        trace_id = %trace_id,
        product = product.as_deref().unwrap_or("-"),
        model = %response.model,
        prompt_tokens = response.usage.prompt_tokens,
        completion_tokens = response.usage.completion_tokens,
        "completion received"
    );

    match response.finish_reason {
        FinishReason::Length => warn!(
            %operation,
            trace_id = %trace_id,
            product = product.as_deref().unwrap_or("-"),
            "completion hit the token limit; output may be truncated"
        ),
        FinishReason::ContentFilter => warn!(
            %operation,
            trace_id = %trace_id,
            product = product.as_deref().unwrap_or("-"),
            "completion stopped by content filter"
        ),
        FinishReason::Stop => {}
    }

    if response.content.trim().is_empty() {
        Ok(empty.to_string())
    } else {
        Ok(response.content)
    }
}
