//! Result object for one executed query.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::compact::compact_memory;
use crate::normalize::normalize;
use crate::table::Table;

/// Outcome of a query: a table, or a result-level error for display.
///
/// Normalization failures and non-2xx responses never surface as `Err`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResults {
    pub status: u16,
    pub table: Option<Table>,
    /// `"<status> <reason>"` for remote errors, or a normalization message.
    pub error: Option<String>,
    pub error_details: Option<String>,
    pub response_size_bytes: Option<usize>,
    body: String,
}

/// Summary suitable for JSON output.
#[derive(Debug, Serialize)]
pub struct ResultsSummary<'a> {
    pub status: u16,
    pub rows: usize,
    pub columns: usize,
    pub error: Option<&'a str>,
    pub error_details: Option<&'a str>,
    pub response_size_bytes: Option<usize>,
}

impl QueryResults {
    /// Build results from a raw response.
    ///
    /// 2xx bodies are normalized and, when `compact` is set, dictionary
    /// encoded. Anything else yields `error` and `error_details`.
    #[must_use]
    pub fn from_response(status: u16, reason: &str, body: impl Into<String>, compact: bool) -> Self {
        let body = body.into();
        let mut results = Self {
            status,
            body,
            ..Self::default()
        };

        if !(200..300).contains(&status) {
            let parsed = serde_json::from_str::<Value>(&results.body).unwrap_or(Value::Null);
            results.error = Some(format!("{status} {reason}"));
            results.error_details = Some(error_details(&parsed));
            tracing::warn!(status, reason, "remote API returned an error");
            return results;
        }

        let outcome = serde_json::from_str::<Value>(&results.body)
            .map_err(crate::FrameError::from)
            .and_then(|value| normalize(&value));
        match outcome {
            Ok(mut table) => {
                if compact {
                    compact_memory(&mut table);
                }
                results.response_size_bytes = Some(results.body.len());
                results.table = Some(table);
            }
            Err(error) => {
                tracing::info!(%error, "response could not be normalized");
                results.error = Some(error.to_string());
                results.error_details = Some(String::new());
            }
        }
        results
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The untouched response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The response body re-indented with keys sorted, if it is JSON.
    #[must_use]
    pub fn pretty_json(&self) -> Option<String> {
        let value: Value = serde_json::from_str(&self.body).ok()?;
        serde_json::to_string_pretty(&sort_keys(value)).ok()
    }

    #[must_use]
    pub fn summary(&self) -> ResultsSummary<'_> {
        ResultsSummary {
            status: self.status,
            rows: self.table.as_ref().map_or(0, Table::len),
            columns: self.table.as_ref().map_or(0, Table::width),
            error: self.error.as_deref(),
            error_details: self.error_details.as_deref(),
            response_size_bytes: self.response_size_bytes,
        }
    }
}

/// Newline-joined `detail` of every entry in `errors`; empty when `errors`
/// or any `detail` is missing.
#[must_use]
pub fn error_details(response: &Value) -> String {
    let Some(errors) = response.get("errors").and_then(Value::as_array) else {
        return String::new();
    };
    errors
        .iter()
        .map(|error| error.get("detail").and_then(Value::as_str))
        .collect::<Option<Vec<_>>>()
        .map(|details| details.join("\n"))
        .unwrap_or_default()
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn error_details_join_every_detail() {
        let body = json!({"errors": [
            {"status": "400", "detail": "Unsupported include"},
            {"status": "400", "detail": "Bad filter"}
        ]});
        assert_eq!(error_details(&body), "Unsupported include\nBad filter");
    }

    #[test]
    fn error_details_missing_pieces_give_empty_string() {
        assert_eq!(error_details(&json!({})), "");
        assert_eq!(error_details(&json!({"errors": [{"detail": "x"}, {"code": "y"}]})), "");
        assert_eq!(error_details(&Value::Null), "");
    }

    #[test]
    fn remote_errors_become_result_level_errors() {
        let body = r#"{"errors": [{"detail": "Filter required"}]}"#;
        let results = QueryResults::from_response(400, "Bad Request", body, true);
        assert!(!results.is_ok());
        assert!(results.table.is_none());
        assert_eq!(results.error.as_deref(), Some("400 Bad Request"));
        assert_eq!(results.error_details.as_deref(), Some("Filter required"));
        assert_eq!(results.response_size_bytes, None);
    }

    #[test]
    fn normalization_failures_are_reported_not_raised() {
        let results = QueryResults::from_response(200, "OK", r#"{"data": []}"#, true);
        assert_eq!(results.error.as_deref(), Some("response contained no data"));

        let results = QueryResults::from_response(200, "OK", "<html>", true);
        assert!(results.error.unwrap().starts_with("response body is not valid JSON"));
    }

    #[test]
    fn successful_responses_carry_a_table_and_size() {
        let body = r#"{"data": [{"id": "1", "type": "stop", "attributes": {"name": "A"}}]}"#;
        let results = QueryResults::from_response(200, "OK", body, false);
        assert!(results.is_ok());
        assert_eq!(results.response_size_bytes, Some(body.len()));
        assert_eq!(
            results.table.unwrap().column_names(),
            vec!["stop_id", "stop_name"]
        );
    }

    #[test]
    fn pretty_json_sorts_keys() {
        let results = QueryResults::from_response(500, "Server Error", r#"{"b": 1, "a": {"d": 2, "c": 3}}"#, false);
        assert_eq!(
            results.pretty_json().unwrap(),
            "{\n  \"a\": {\n    \"c\": 3,\n    \"d\": 2\n  },\n  \"b\": 1\n}"
        );
    }
}
