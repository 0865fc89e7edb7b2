//! Generic REST API proxy tool.
//!
//! Issues one outbound HTTP request through the shared session and reports
//! whatever happened as tool content. A remote 4xx/5xx is a normal result;
//! connection-level failures are reported as an error object, never raised
//! to the protocol layer.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Client, RequestBuilder};
use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, instrument};

use super::common::{describe_error, json_result, panic_message};
use crate::core::session::OutboundSession;

const DEFAULT_CONTENT_TYPE: &str = "application/json";

// ============================================================================
// Tool Parameters
// ============================================================================

/// HTTP methods the proxy accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    #[serde(alias = "get")]
    Get,
    #[serde(alias = "post")]
    Post,
    #[serde(alias = "put")]
    Put,
    #[serde(alias = "delete")]
    Delete,
}

impl HttpMethod {
    /// Canonical upper-case spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether a caller-supplied body is forwarded for this method.
    pub fn sends_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// Parameters for the fetch API data tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FetchApiDataParams {
    /// Endpoint to call.
    #[schemars(description = "API endpoint URL")]
    pub url: String,

    /// HTTP method (default: GET).
    #[serde(default)]
    #[schemars(description = "HTTP method")]
    pub method: HttpMethod,

    /// Extra request headers.
    #[serde(default)]
    #[schemars(description = "Optional HTTP headers")]
    pub headers: HashMap<String, String>,

    /// Raw request body, sent for POST and PUT only.
    #[serde(default)]
    #[schemars(description = "Request body (for POST/PUT)")]
    pub body: Option<String>,
}

// ============================================================================
// Structured Output
// ============================================================================

/// A completed exchange, whatever the status code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub url: String,
    pub method: HttpMethod,
}

/// A request that never produced a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchFailure {
    pub error: String,
    pub message: String,
    pub url: String,
    pub method: HttpMethod,
}

/// Why a request produced no response.
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connect, TLS, timeout, malformed URL or header, body read.
    #[error("{}", describe_error(.0))]
    Client(#[from] reqwest::Error),

    /// Anything else that went wrong inside the handler.
    #[error("{0}")]
    Unexpected(String),
}

impl FetchError {
    /// Category label reported to the client.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Client(_) => "HTTP Client Error",
            Self::Unexpected(_) => "Unexpected Error",
        }
    }
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Fetch API data tool - proxies a single HTTP request.
pub struct FetchApiDataTool;

impl FetchApiDataTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fetch_api_data";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Fetch data from a REST API endpoint. \
         Returns the status code, response headers, body text, final URL and method. \
         Remote error statuses are returned as data; connection failures are reported \
         as an error object.";

    /// Execute the request. Never fails: every outcome is tool content.
    #[instrument(skip_all, fields(method = %params.method, url = %params.url))]
    pub async fn execute(params: FetchApiDataParams, session: &OutboundSession) -> CallToolResult {
        let url = params.url.clone();
        let method = params.method;

        info!("Making {} request to {}", method, url);

        let outcome = AssertUnwindSafe(Self::send(params, session))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(FetchError::Unexpected(panic_message(panic.as_ref()))));

        match outcome {
            Ok(response) => {
                info!("API call completed with status {}", response.status_code);
                json_result(&response)
            }
            Err(err) => Self::report_failure(&err, url, method),
        }
    }

    /// Content for a request that produced no response.
    pub(crate) fn report_failure(
        err: &FetchError,
        url: String,
        method: HttpMethod,
    ) -> CallToolResult {
        error!("{}: {}", err.category(), err);
        json_result(&FetchFailure {
            error: err.category().to_string(),
            message: err.to_string(),
            url,
            method,
        })
    }

    async fn send(
        params: FetchApiDataParams,
        session: &OutboundSession,
    ) -> Result<FetchResponse, FetchError> {
        let client = session.acquire().map_err(|e| {
            FetchError::Unexpected(format!(
                "failed to create HTTP session: {}",
                describe_error(&e)
            ))
        })?;

        let method = params.method;
        let response = Self::build_request(&client, params).send().await?;

        let status_code = response.status().as_u16();
        let url = response.url().to_string();
        let headers = flatten_headers(response.headers());
        let body = response.text().await?;

        Ok(FetchResponse {
            status_code,
            headers,
            body,
            url,
            method,
        })
    }

    /// Build the outgoing request.
    ///
    /// URL and header validation errors are deferred by reqwest until the
    /// request is sent, so this never fails.
    fn build_request(client: &Client, params: FetchApiDataParams) -> RequestBuilder {
        let FetchApiDataParams {
            url,
            method,
            mut headers,
            body,
        } = params;

        let body = body.filter(|b| !b.is_empty() && method.sends_body());
        if body.is_some()
            && !headers
                .keys()
                .any(|name| name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()))
        {
            headers.insert("Content-Type".to_string(), DEFAULT_CONTENT_TYPE.to_string());
        }

        let mut request = client.request(method.into(), url.as_str());
        for (name, value) in &headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }
        request
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FetchApiDataParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Collapse a header map into one value per (lower-case) name.
///
/// Repeated headers are folded into a single comma-separated value.
fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flat: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        flat.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    flat
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::HttpClientConfig;
    use crate::domains::tools::definitions::common::result_json;
    use crate::domains::tools::definitions::test_support::{spawn_echo_server, unreachable_url};
    use reqwest::header::HeaderValue;

    fn params(url: &str) -> FetchApiDataParams {
        FetchApiDataParams {
            url: url.to_string(),
            method: HttpMethod::Get,
            headers: HashMap::new(),
            body: None,
        }
    }

    fn session() -> OutboundSession {
        OutboundSession::new(HttpClientConfig::default())
    }

    // ------------------------------------------------------------------------
    // Parameters and request construction
    // ------------------------------------------------------------------------

    #[test]
    fn test_params_defaults() {
        let params: FetchApiDataParams =
            serde_json::from_str(r#"{"url": "http://example.com"}"#).unwrap();
        assert_eq!(params.method, HttpMethod::Get);
        assert!(params.headers.is_empty());
        assert!(params.body.is_none());
    }

    #[test]
    fn test_params_method_spellings() {
        let params: FetchApiDataParams =
            serde_json::from_str(r#"{"url": "http://x", "method": "post"}"#).unwrap();
        assert_eq!(params.method, HttpMethod::Post);

        let params: FetchApiDataParams =
            serde_json::from_str(r#"{"url": "http://x", "method": "DELETE"}"#).unwrap();
        assert_eq!(params.method, HttpMethod::Delete);

        let rejected: Result<FetchApiDataParams, _> =
            serde_json::from_str(r#"{"url": "http://x", "method": "PATCH"}"#);
        assert!(rejected.is_err());
    }

    #[test]
    fn test_post_body_gets_default_content_type() {
        let client = Client::new();
        let mut p = params("http://localhost/items");
        p.method = HttpMethod::Post;
        p.body = Some("{}".to_string());

        let request = FetchApiDataTool::build_request(&client, p).build().unwrap();
        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(request.body().unwrap().as_bytes(), Some(&b"{}"[..]));
    }

    #[test]
    fn test_caller_content_type_is_kept() {
        let client = Client::new();
        let mut p = params("http://localhost/items");
        p.method = HttpMethod::Put;
        p.body = Some("a=1".to_string());
        p.headers
            .insert("content-type".to_string(), "text/plain".to_string());

        let request = FetchApiDataTool::build_request(&client, p).build().unwrap();
        let values: Vec<_> = request.headers().get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(values, vec!["text/plain"]);
    }

    #[test]
    fn test_body_ignored_for_get_and_delete() {
        let client = Client::new();
        for method in [HttpMethod::Get, HttpMethod::Delete] {
            let mut p = params("http://localhost/items");
            p.method = method;
            p.body = Some("{}".to_string());

            let request = FetchApiDataTool::build_request(&client, p).build().unwrap();
            assert!(request.body().is_none());
            assert!(request.headers().get(CONTENT_TYPE).is_none());
        }
    }

    #[test]
    fn test_empty_body_is_not_sent() {
        let client = Client::new();
        let mut p = params("http://localhost/items");
        p.method = HttpMethod::Post;
        p.body = Some(String::new());

        let request = FetchApiDataTool::build_request(&client, p).build().unwrap();
        assert!(request.body().is_none());
        assert!(request.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_flatten_headers_folds_duplicates() {
        let mut headers = HeaderMap::new();
        headers.append("X-Echo", HeaderValue::from_static("one"));
        headers.append("X-Echo", HeaderValue::from_static("two"));
        headers.insert("Content-Type", HeaderValue::from_static("text/plain"));

        let flat = flatten_headers(&headers);
        assert_eq!(flat.get("x-echo").map(String::as_str), Some("one, two"));
        assert_eq!(
            flat.get("content-type").map(String::as_str),
            Some("text/plain")
        );
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            FetchError::Unexpected("x".to_string()).category(),
            "Unexpected Error"
        );
    }

    #[test]
    fn test_unexpected_failure_is_content() {
        let result = FetchApiDataTool::report_failure(
            &FetchError::Unexpected("handler panicked".to_string()),
            "http://example.com".to_string(),
            HttpMethod::Put,
        );
        assert_eq!(result.is_error, Some(false));

        let failure: FetchFailure = serde_json::from_value(result_json(&result)).unwrap();
        assert_eq!(failure.error, "Unexpected Error");
        assert_eq!(failure.message, "handler panicked");
        assert_eq!(failure.method, HttpMethod::Put);
    }

    // ------------------------------------------------------------------------
    // Against a local server
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_get_returns_response_data() {
        let base = spawn_echo_server().await;
        let url = format!("{}/items?id=7", base);

        let result = FetchApiDataTool::execute(params(&url), &session()).await;
        assert_eq!(result.is_error, Some(false));

        let response: FetchResponse =
            serde_json::from_value(result_json(&result)).unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.method, HttpMethod::Get);
        assert_eq!(response.url, url);
        assert!(response.body.starts_with("GET /items?id=7 HTTP/1.1"));
        assert_eq!(
            response.headers.get("x-echo").map(String::as_str),
            Some("one, two")
        );
    }

    #[tokio::test]
    async fn test_post_sends_json_content_type() {
        let base = spawn_echo_server().await;
        let mut p = params(&format!("{}/items", base));
        p.method = HttpMethod::Post;
        p.body = Some("{}".to_string());

        let result = FetchApiDataTool::execute(p, &session()).await;
        let response: FetchResponse =
            serde_json::from_value(result_json(&result)).unwrap();

        let echoed = response.body.to_ascii_lowercase();
        assert!(echoed.starts_with("post /items"));
        assert!(echoed.contains("content-type: application/json"));
        assert!(response.body.ends_with("\r\n\r\n{}"));
    }

    #[tokio::test]
    async fn test_custom_headers_are_forwarded() {
        let base = spawn_echo_server().await;
        let mut p = params(&base);
        p.headers
            .insert("X-Trace-Id".to_string(), "abc123".to_string());

        let result = FetchApiDataTool::execute(p, &session()).await;
        let response: FetchResponse =
            serde_json::from_value(result_json(&result)).unwrap();
        assert!(response.body.to_ascii_lowercase().contains("x-trace-id: abc123"));
    }

    #[tokio::test]
    async fn test_error_status_is_data() {
        let base = spawn_echo_server().await;
        for code in [404_u16, 500] {
            let result =
                FetchApiDataTool::execute(params(&format!("{}/status/{}", base, code)), &session())
                    .await;
            assert_eq!(result.is_error, Some(false));

            let response: FetchResponse =
                serde_json::from_value(result_json(&result)).unwrap();
            assert_eq!(response.status_code, code);
        }
    }

    #[tokio::test]
    async fn test_redirect_reports_final_url() {
        let base = spawn_echo_server().await;
        let result =
            FetchApiDataTool::execute(params(&format!("{}/redirect", base)), &session()).await;

        let response: FetchResponse =
            serde_json::from_value(result_json(&result)).unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.url, format!("{}/final", base));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_client_error_content() {
        let url = unreachable_url().await;
        let mut p = params(&url);
        p.method = HttpMethod::Delete;

        let result = FetchApiDataTool::execute(p, &session()).await;
        assert_eq!(result.is_error, Some(false));

        let failure: FetchFailure = serde_json::from_value(result_json(&result)).unwrap();
        assert_eq!(failure.error, "HTTP Client Error");
        assert_eq!(failure.url, url);
        assert_eq!(failure.method, HttpMethod::Delete);
        assert!(!failure.message.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_url_is_client_error_content() {
        for url in ["not a url", ""] {
            let result = FetchApiDataTool::execute(params(url), &session()).await;
            let failure: FetchFailure = serde_json::from_value(result_json(&result)).unwrap();
            assert_eq!(failure.error, "HTTP Client Error");
            assert_eq!(failure.url, url);
        }
    }

    #[tokio::test]
    async fn test_invalid_header_is_client_error_content() {
        let base = spawn_echo_server().await;
        let mut p = params(&base);
        p.headers
            .insert("bad header".to_string(), "value".to_string());

        let result = FetchApiDataTool::execute(p, &session()).await;
        let failure: FetchFailure = serde_json::from_value(result_json(&result)).unwrap();
        assert_eq!(failure.error, "HTTP Client Error");
    }

    #[tokio::test]
    async fn test_timeout_is_client_error_content() {
        let base = spawn_echo_server().await;
        let session = OutboundSession::new(HttpClientConfig {
            timeout_secs: 1,
            accept_invalid_certs: false,
        });

        let result = FetchApiDataTool::execute(params(&format!("{}/hang", base)), &session).await;
        let failure: FetchFailure = serde_json::from_value(result_json(&result)).unwrap();
        assert_eq!(failure.error, "HTTP Client Error");
        let message = failure.message.to_lowercase();
        assert!(message.contains("timed out") || message.contains("timeout"));
    }

    #[tokio::test]
    async fn test_sequential_calls_reuse_session() {
        let base = spawn_echo_server().await;
        let session = session();

        FetchApiDataTool::execute(params(&base), &session).await;
        FetchApiDataTool::execute(params(&base), &session).await;
        assert_eq!(session.clients_created(), 1);

        session.close();
        FetchApiDataTool::execute(params(&base), &session).await;
        assert_eq!(session.clients_created(), 2);
    }

    #[test]
    fn test_schema_contract() {
        let schema = FetchApiDataTool::to_tool().input_schema;
        let required = schema.get("required").and_then(|v| v.as_array()).unwrap();
        assert_eq!(required, &vec![serde_json::json!("url")]);

        let properties = schema.get("properties").and_then(|v| v.as_object()).unwrap();
        for name in ["url", "method", "headers", "body"] {
            assert!(properties.contains_key(name), "missing property {}", name);
        }
        assert_eq!(
            properties["method"].get("default"),
            Some(&serde_json::json!("GET"))
        );
    }
}
