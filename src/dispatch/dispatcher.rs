//! Request dispatcher
//!
//! Executes a tool: binds the arguments, performs one upstream call and turns
//! the response into a result. Stateless apart from the shared transport, so a
//! single dispatcher serves concurrent calls. No retries.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::core::{BridgeError, BridgeResult};
use crate::tools::ToolDescriptor;

use super::binding::bind;
use super::transport::{HttpTransport, ReqwestTransport};

/// Executes tools against their upstream REST APIs
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher over any transport
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Create a dispatcher using reqwest with an optional per-call timeout
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self::new(Arc::new(ReqwestTransport::new().with_timeout(timeout)))
    }

    /// Execute `tool` with `args`
    ///
    /// Returns the response body, parsed as JSON when possible and as a JSON
    /// string otherwise.
    pub async fn execute(&self, tool: &ToolDescriptor, args: &Map<String, Value>) -> BridgeResult<Value> {
        let request = bind(tool, args)?;

        tracing::info!(
            "[Dispatcher] Executing '{}': {} {}",
            tool.name,
            request.method.as_upper(),
            request.url
        );
        tracing::debug!("[Dispatcher] Query: {:?}", request.query);

        let response = self.transport.send(&request).await?;

        if !response.is_success() {
            tracing::warn!(
                "[Dispatcher] '{}' failed with status {}",
                tool.name,
                response.status
            );
            return Err(BridgeError::HttpStatus {
                status: response.status,
                body: response.body,
            });
        }

        tracing::debug!(
            "[Dispatcher] '{}' completed with status {}",
            tool.name,
            response.status
        );

        Ok(parse_body(response.body))
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_timeout(None)
    }
}

fn parse_body(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::dispatch::binding::tests::user_posts_tool;
    use crate::dispatch::{BoundRequest, HttpResponse};
    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::Mutex;

    /// Transport that records requests and answers with a canned response
    pub(crate) struct RecordingTransport {
        pub requests: Mutex<Vec<BoundRequest>>,
        response: HttpResponse,
    }

    impl RecordingTransport {
        pub(crate) fn new(response: HttpResponse) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                response,
            })
        }
    }

    #[async_trait]
    impl HttpTransport for RecordingTransport {
        async fn send(&self, request: &BoundRequest) -> BridgeResult<HttpResponse> {
            self.requests.lock().await.push(request.clone());
            Ok(self.response.clone())
        }
    }

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_execute_returns_json_body() {
        let transport = RecordingTransport::new(HttpResponse::new(200, r#"[{"id": 1}]"#));
        let dispatcher = Dispatcher::new(transport.clone());

        let result = dispatcher
            .execute(&user_posts_tool(), &args(json!({ "id": "42", "limit": [10] })))
            .await
            .unwrap();
        assert_eq!(result, json!([{ "id": 1 }]));

        let requests = transport.requests.lock().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://blog.example.com/api/users/42/posts");
        assert_eq!(requests[0].query, vec![("limit".to_string(), "10".to_string())]);
    }

    #[tokio::test]
    async fn test_execute_returns_text_body() {
        let transport = RecordingTransport::new(HttpResponse::new(200, "plain text"));
        let dispatcher = Dispatcher::new(transport);

        let result = dispatcher
            .execute(&user_posts_tool(), &args(json!({ "id": "1" })))
            .await
            .unwrap();
        assert_eq!(result, Value::String("plain text".to_string()));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let transport = RecordingTransport::new(HttpResponse::new(404, r#"{"error":"no user"}"#));
        let dispatcher = Dispatcher::new(transport);

        let err = dispatcher
            .execute(&user_posts_tool(), &args(json!({ "id": "999" })))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::HttpStatus { status: 404, .. }));
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("no user"));
    }

    #[tokio::test]
    async fn test_missing_parameter_skips_network() {
        let transport = RecordingTransport::new(HttpResponse::new(200, "{}"));
        let dispatcher = Dispatcher::new(transport.clone());

        let err = dispatcher
            .execute(&user_posts_tool(), &Map::new())
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::MissingParameter { .. }));
        assert!(transport.requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_reqwest_transport_error() {
        // bind then drop, so the port is known to refuse connections
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut tool = user_posts_tool();
        tool.base_url = format!("http://{}", addr);

        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let transport = ReqwestTransport::new()
            .with_client(client)
            .with_timeout(Some(Duration::from_millis(500)));
        let dispatcher = Dispatcher::new(Arc::new(transport));
        let err = dispatcher
            .execute(&tool, &args(json!({ "id": "1" })))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Transport(_)));
    }
}
