//! Retry policy for bulk submissions.

use std::time::Duration;
use tracing::{debug, info, warn};

use super::BatchIndexer;
use search_reindexer_repository::SearchError;
use search_reindexer_shared::BulkOperation;

impl BatchIndexer {
    /// Submit a bulk write with exponential backoff retry logic.
    pub(super) async fn bulk_write_with_retry(
        &self,
        operations: &[BulkOperation],
    ) -> Result<(), SearchError> {
        let retry = &self.config.retry;
        let mut delay_ms = retry.initial_retry_delay_ms;
        let mut last_error: Option<SearchError> = None;

        for attempt in 0..=retry.max_retries {
            match self.client.bulk_write(operations).await {
                Ok(()) => {
                    if attempt > 0 {
                        info!(
                            attempt = attempt,
                            count = operations.len(),
                            "Bulk write succeeded after retry"
                        );
                    }
                    return Ok(());
                }
                Err(e) => {
                    if !is_retryable_error(&e) {
                        debug!(error = %e, "Non-retryable error encountered");
                        return Err(e);
                    }

                    // Don't wait after the last attempt
                    if attempt < retry.max_retries {
                        warn!(
                            attempt = attempt + 1,
                            max_retries = retry.max_retries,
                            delay_ms = delay_ms,
                            error = %e,
                            "Bulk write failed, retrying"
                        );

                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

                        delay_ms = std::cmp::min(delay_ms * 2, retry.max_retry_delay_ms);
                    }

                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            SearchError::bulk_index("Unknown error after retries")
        }))
    }
}

/// Determine if an error is retryable (transient failures).
pub(crate) fn is_retryable_error(error: &SearchError) -> bool {
    match error {
        // Connection errors are retryable
        SearchError::ConnectionError(_) => true,
        // Parse errors might be transient (e.g., server temporarily unavailable)
        SearchError::ParseError(_) => true,
        // Bulk and index errors are retryable when rate limited or timed out
        SearchError::BulkIndexError(msg) | SearchError::IndexError(msg) => {
            let msg_lower = msg.to_lowercase();
            msg_lower.contains("rate limit")
                || msg_lower.contains("timeout")
                || msg_lower.contains("connection")
                || msg_lower.contains("503")
                || msg_lower.contains("429")
        }
        SearchError::DeleteError(_)
        | SearchError::IndexNotFound(_)
        | SearchError::IndexDeletionError(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(is_retryable_error(&SearchError::connection("refused")));
        assert!(is_retryable_error(&SearchError::bulk_index(
            "Bulk request failed with status 429 Too Many Requests"
        )));
        assert!(is_retryable_error(&SearchError::bulk_index("request timeout")));
        assert!(!is_retryable_error(&SearchError::bulk_index(
            "2 of 10 documents failed: failed to parse field [employees]"
        )));
        assert!(!is_retryable_error(&SearchError::index_not_found("main")));
    }
}
