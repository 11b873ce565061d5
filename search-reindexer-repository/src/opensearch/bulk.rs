//! Bulk request body construction and response inspection.

use opensearch::http::request::JsonBody;
use serde_json::{json, Value};

use search_reindexer_shared::BulkOperation;

/// Build the NDJSON body of a bulk request: one action line followed by the
/// document source, per operation, in slice order.
pub(crate) fn build_bulk_body(operations: &[BulkOperation]) -> Vec<JsonBody<Value>> {
    let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(operations.len() * 2);

    for operation in operations {
        body.push(action_line(operation).into());
        body.push(Value::Object(operation.document.clone()).into());
    }

    body
}

fn action_line(operation: &BulkOperation) -> Value {
    json!({
        "index": {
            "_index": operation.address.index,
            "_id": operation.address.document_id()
        }
    })
}

/// Failures reported inside a bulk response.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct BulkFailures {
    pub failed: usize,
    pub first_reason: Option<String>,
}

/// Inspect a bulk response body for per-item failures.
///
/// Returns `None` when the engine reported no errors.
pub(crate) fn bulk_failures(response_body: &Value) -> Option<BulkFailures> {
    let has_errors = response_body
        .get("errors")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !has_errors {
        return None;
    }

    let mut failures = BulkFailures::default();
    let items = response_body
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for item in items {
        let Some(error) = item.get("index").and_then(|i| i.get("error")) else {
            continue;
        };
        failures.failed += 1;
        if failures.first_reason.is_none() {
            failures.first_reason = Some(
                error
                    .get("reason")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| error.to_string()),
            );
        }
    }

    Some(failures)
}
