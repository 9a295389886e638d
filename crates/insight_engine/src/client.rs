use std::sync::Arc;

use engine_logging::{engine_debug, engine_info, engine_warn, log_preview};
use serde_json::Value;

use crate::fetch::request_url;
use crate::{FailureKind, FetchError, Fetcher};

/// Document shown when the service answers without usable insights.
pub const NO_INSIGHTS: &str = "No insights available.";
/// Document shown when the request or its response could not be processed.
pub const FAILED_TO_FETCH: &str = "⚠️ Failed to fetch insights.";

/// Turns a query into an insight document, absorbing every failure into fallback text.
#[derive(Clone)]
pub struct InsightClient {
    fetcher: Arc<dyn Fetcher>,
    base_url: String,
}

impl InsightClient {
    pub fn new(fetcher: Arc<dyn Fetcher>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    /// Fetches the document for `query`.
    ///
    /// Returns `None` without touching the network when the query is blank;
    /// otherwise always yields a displayable document.
    pub async fn fetch_document(&self, query: &str) -> Option<String> {
        let query = query.trim();
        if query.is_empty() {
            engine_debug!("Skipping fetch for blank query");
            return None;
        }
        match self.try_fetch(query).await {
            Ok(document) => {
                engine_info!(
                    "Insights for query={} len={} preview={}",
                    query,
                    document.len(),
                    log_preview(&document)
                );
                Some(document)
            }
            Err(err) => {
                engine_warn!("Fetching insights for query={} failed: {}", query, err);
                Some(FAILED_TO_FETCH.to_string())
            }
        }
    }

    async fn try_fetch(&self, query: &str) -> Result<String, FetchError> {
        let url = request_url(&self.base_url, query)?;
        engine_debug!("GET {}", url);
        let output = self.fetcher.fetch(&url).await?;
        if !(200..300).contains(&output.status) {
            engine_warn!("Insight service answered {} for query={}", output.status, query);
        }
        parse_insights(&output.bytes)
    }
}

/// Reads the `insights` field of a response envelope.
///
/// Missing or falsy values map to [`NO_INSIGHTS`]; a body that is not JSON,
/// a `null` envelope or a truthy non-string field is an error.
fn parse_insights(body: &[u8]) -> Result<String, FetchError> {
    let envelope: Value = serde_json::from_slice(body)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
    let field = match &envelope {
        Value::Null => {
            return Err(FetchError::new(FailureKind::Decode, "null response envelope"));
        }
        Value::Object(map) => map.get("insights"),
        _ => None,
    };
    match field {
        Some(Value::String(text)) if !text.is_empty() => Ok(text.clone()),
        None | Some(Value::Null) | Some(Value::Bool(false)) | Some(Value::String(_)) => {
            Ok(NO_INSIGHTS.to_string())
        }
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(NO_INSIGHTS.to_string()),
        Some(other) => Err(FetchError::new(
            FailureKind::Decode,
            format!("insights is not text: {other}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_insights, NO_INSIGHTS};
    use crate::FailureKind;

    fn parse(body: &str) -> Result<String, FailureKind> {
        parse_insights(body.as_bytes()).map_err(|err| err.kind)
    }

    #[test]
    fn insights_string_is_returned_verbatim() {
        assert_eq!(parse(r##"{"problem":"1","insights":"# Hi\n"}"##).unwrap(), "# Hi\n");
    }

    #[test]
    fn missing_or_falsy_field_falls_back() {
        for body in [
            r#"{"error":"Failed to fetch data"}"#,
            r#"{"insights":null}"#,
            r#"{"insights":""}"#,
            r#"{"insights":false}"#,
            r#"{"insights":0}"#,
            r#"[1,2]"#,
            r#""text""#,
        ] {
            assert_eq!(parse(body).unwrap(), NO_INSIGHTS, "body {body}");
        }
    }

    #[test]
    fn unusable_bodies_are_errors() {
        for body in ["<html>oops</html>", "", "null", r#"{"insights":["a"]}"#, r#"{"insights":3}"#] {
            assert_eq!(parse(body).unwrap_err(), FailureKind::Decode, "body {body}");
        }
    }
}
