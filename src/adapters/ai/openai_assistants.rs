//! OpenAI Assistants Provider - Implementation of AssistantApi for OpenAI's
//! Assistants (v2) API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIAssistantsConfig::new(api_key)
//!     .with_base_url("https://api.openai.com/v1")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let provider = OpenAIAssistantsProvider::new(config)?;
//! ```
//!
//! # Retries
//!
//! Reads (`get_run`, `list_messages`) are retried with exponential backoff on
//! retryable transport errors. Writes are sent once: repeating them could post
//! a question twice or start a second run.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::conversation::Role;
use crate::domain::foundation::{AssistantId, RunId, ThreadId, Timestamp};
use crate::domain::run::RunStatus;
use crate::ports::{AssistantApi, AssistantApiError, ProviderInfo, Run, ThreadMessage};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Beta header value selecting the Assistants v2 wire format.
const ASSISTANTS_BETA: &str = "assistants=v2";

/// Configuration for the OpenAI Assistants provider.
#[derive(Debug, Clone)]
pub struct OpenAIAssistantsConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries of a read on transient failures.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each further retry.
    pub retry_base_delay: Duration,
}

impl OpenAIAssistantsConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
            retry_base_delay: Duration::from_secs(1),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count for reads.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the delay before the first retry.
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI Assistants API provider implementation.
pub struct OpenAIAssistantsProvider {
    config: OpenAIAssistantsConfig,
    client: Client,
}

impl OpenAIAssistantsProvider {
    /// Creates a new provider with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the HTTP client cannot be built.
    pub fn new(config: OpenAIAssistantsConfig) -> Result<Self, AssistantApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AssistantApiError::InvalidRequest(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds an endpoint URL from a path relative to the base URL.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    /// Starts a request carrying auth and beta headers.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("OpenAI-Beta", ASSISTANTS_BETA)
            .header("Content-Type", "application/json")
    }

    /// Maps a reqwest failure onto the port's error type.
    fn transport_error(&self, e: reqwest::Error) -> AssistantApiError {
        if e.is_timeout() {
            AssistantApiError::Timeout {
                timeout_secs: whole_secs(self.config.timeout),
            }
        } else if e.is_connect() {
            AssistantApiError::network(format!("Connection failed: {}", e))
        } else {
            AssistantApiError::network(e.to_string())
        }
    }

    /// Sends a request and decodes the JSON body.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AssistantApiError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let response = Self::handle_response_status(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| AssistantApiError::parse(format!("Failed to parse response: {}", e)))
    }

    /// Sends a GET, retrying retryable failures with exponential backoff.
    async fn get_with_retries<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AssistantApiError> {
        let mut retry_count = 0;

        loop {
            let request = self.request(Method::GET, path).query(query);
            match self.send::<T>(request).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && retry_count < self.config.max_retries => {
                    let delay = self
                        .config
                        .retry_base_delay
                        .saturating_mul(2u32.saturating_pow(retry_count));
                    warn!(path, error = %err, ?delay, "Retrying assistant API read");
                    sleep(delay).await;
                    retry_count += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(response: Response) -> Result<Response, AssistantApiError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AssistantApiError::AuthenticationFailed),
            404 => Err(AssistantApiError::NotFound(error_message(&error_body))),
            429 => Err(AssistantApiError::rate_limited(Self::parse_retry_after(
                &error_body,
            ))),
            400 | 422 => Err(AssistantApiError::InvalidRequest(error_message(&error_body))),
            500..=599 => Err(AssistantApiError::unavailable(format!(
                "Server error {}: {}",
                status,
                error_message(&error_body)
            ))),
            _ => Err(AssistantApiError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses retry-after from an error response, defaulting to 30 seconds.
    fn parse_retry_after(error_body: &str) -> u32 {
        let message = error_message(error_body);
        if let Some(idx) = message.find("try again in ") {
            let rest = &message[idx + "try again in ".len()..];
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            if let Ok(secs) = digits.parse::<u32>() {
                return secs;
            }
        }
        30
    }
}

/// Whole seconds of `duration`, saturating at `u32::MAX`.
fn whole_secs(duration: Duration) -> u32 {
    u32::try_from(duration.as_secs()).unwrap_or(u32::MAX)
}

/// Extracts `error.message` from an OpenAI error body, or returns the body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<WireErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl AssistantApi for OpenAIAssistantsProvider {
    async fn create_thread(&self) -> Result<ThreadId, AssistantApiError> {
        let request = self
            .request(Method::POST, "threads")
            .json(&serde_json::json!({}));
        let thread: WireObject = self.send(request).await?;
        ThreadId::new(thread.id).map_err(|e| AssistantApiError::parse(e.to_string()))
    }

    async fn create_message(
        &self,
        thread_id: &ThreadId,
        role: Role,
        text: &str,
    ) -> Result<(), AssistantApiError> {
        let body = WireCreateMessage {
            role: role.as_str(),
            content: text,
        };
        let request = self
            .request(Method::POST, &format!("threads/{}/messages", thread_id))
            .json(&body);
        let message: WireObject = self.send(request).await?;
        debug!(thread_id = %thread_id, message_id = %message.id, "Posted message");
        Ok(())
    }

    async fn create_run(
        &self,
        thread_id: &ThreadId,
        assistant_id: &AssistantId,
    ) -> Result<Run, AssistantApiError> {
        let body = WireCreateRun {
            assistant_id: assistant_id.as_str(),
        };
        let request = self
            .request(Method::POST, &format!("threads/{}/runs", thread_id))
            .json(&body);
        let run: WireRun = self.send(request).await?;
        run.into_run()
    }

    async fn get_run(&self, thread_id: &ThreadId, run_id: &RunId) -> Result<Run, AssistantApiError> {
        let run: WireRun = self
            .get_with_retries(&format!("threads/{}/runs/{}", thread_id, run_id), &[])
            .await?;
        run.into_run()
    }

    async fn list_messages(
        &self,
        thread_id: &ThreadId,
    ) -> Result<Vec<ThreadMessage>, AssistantApiError> {
        let page: WireMessageList = self
            .get_with_retries(
                &format!("threads/{}/messages", thread_id),
                &[("order", "desc")],
            )
            .await?;
        page.data.into_iter().map(WireMessage::into_message).collect()
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai", &self.config.base_url)
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct WireCreateMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct WireCreateRun<'a> {
    assistant_id: &'a str,
}

/// Any object where only the id matters (threads, created messages).
#[derive(Debug, Deserialize)]
struct WireObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct WireRun {
    id: String,
    status: RunStatus,
    last_error: Option<WireRunError>,
}

#[derive(Debug, Deserialize)]
struct WireRunError {
    code: String,
    message: String,
}

impl WireRun {
    fn into_run(self) -> Result<Run, AssistantApiError> {
        let id = RunId::new(self.id).map_err(|e| AssistantApiError::parse(e.to_string()))?;
        let mut run = Run::new(id, self.status);
        if let Some(err) = self.last_error {
            run = run.with_last_error(format!("{}: {}", err.code, err.message));
        }
        Ok(run)
    }
}

#[derive(Debug, Deserialize)]
struct WireMessageList {
    data: Vec<WireMessage>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    role: Role,
    #[serde(default)]
    content: Vec<WireContent>,
    run_id: Option<String>,
    created_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireContent {
    Text { text: WireText },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct WireText {
    value: String,
}

impl WireMessage {
    fn into_message(self) -> Result<ThreadMessage, AssistantApiError> {
        let text = self.content.into_iter().find_map(|part| match part {
            WireContent::Text { text } => Some(text.value),
            WireContent::Other => None,
        });
        let run_id = self
            .run_id
            .map(RunId::new)
            .transpose()
            .map_err(|e| AssistantApiError::parse(e.to_string()))?;

        Ok(ThreadMessage {
            role: self.role,
            text,
            run_id,
            created_at: self.created_at.and_then(Timestamp::from_unix_secs),
        })
    }
}

#[derive(Debug, Deserialize)]
struct WireErrorBody {
    error: WireErrorDetail,
}

#[derive(Debug, Deserialize)]
struct WireErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> OpenAIAssistantsProvider {
        OpenAIAssistantsProvider::new(OpenAIAssistantsConfig::new("sk-test")).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIAssistantsConfig::new("test-key")
            .with_base_url("https://proxy.example.com/v1/")
            .with_timeout(Duration::from_secs(30))
            .with_max_retries(5)
            .with_retry_base_delay(Duration::from_millis(250));

        assert_eq!(config.base_url, "https://proxy.example.com/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retry_base_delay, Duration::from_millis(250));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn config_debug_does_not_leak_key() {
        let config = OpenAIAssistantsConfig::new("sk-very-secret");
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }

    #[test]
    fn url_joins_base_and_path() {
        assert_eq!(
            provider().url("threads/thread_1/runs"),
            "https://api.openai.com/v1/threads/thread_1/runs"
        );
        assert_eq!(provider().url("/threads"), "https://api.openai.com/v1/threads");
    }

    #[test]
    fn provider_info_reports_endpoint() {
        let info = provider().provider_info();
        assert_eq!(info.name, "openai");
        assert_eq!(info.endpoint, DEFAULT_BASE_URL);
    }

    #[test]
    fn parses_run_with_last_error() {
        let json = r#"{
            "id": "run_abc",
            "object": "thread.run",
            "status": "failed",
            "last_error": {"code": "server_error", "message": "Something went wrong"}
        }"#;
        let run = serde_json::from_str::<WireRun>(json).unwrap().into_run().unwrap();

        assert_eq!(run.id.as_str(), "run_abc");
        assert_eq!(run.status, RunStatus::Failed);
        assert_eq!(
            run.last_error.as_deref(),
            Some("server_error: Something went wrong")
        );
    }

    #[test]
    fn parses_pending_run_without_error() {
        let json = r#"{"id": "run_1", "status": "in_progress", "last_error": null}"#;
        let run = serde_json::from_str::<WireRun>(json).unwrap().into_run().unwrap();
        assert_eq!(run.status, RunStatus::InProgress);
        assert!(run.last_error.is_none());
    }

    #[test]
    fn unknown_run_status_fails_to_parse() {
        let json = r#"{"id": "run_1", "status": "paused", "last_error": null}"#;
        assert!(serde_json::from_str::<WireRun>(json).is_err());
    }

    #[test]
    fn parses_message_listing_keeping_order() {
        let json = r#"{
            "object": "list",
            "data": [
                {
                    "id": "msg_2",
                    "role": "assistant",
                    "created_at": 1705276800,
                    "run_id": "run_1",
                    "content": [
                        {"type": "image_file", "image_file": {"file_id": "file_1"}},
                        {"type": "text", "text": {"value": "Result: 42【4:0†data.csv】", "annotations": []}}
                    ]
                },
                {
                    "id": "msg_1",
                    "role": "user",
                    "created_at": 1705276790,
                    "run_id": null,
                    "content": [{"type": "text", "text": {"value": "How many rows?", "annotations": []}}]
                }
            ],
            "has_more": false
        }"#;
        let page: WireMessageList = serde_json::from_str(json).unwrap();
        let messages: Vec<ThreadMessage> = page
            .data
            .into_iter()
            .map(WireMessage::into_message)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::Assistant);
        assert_eq!(messages[0].text.as_deref(), Some("Result: 42【4:0†data.csv】"));
        assert_eq!(messages[0].run_id.as_ref().map(|r| r.as_str()), Some("run_1"));
        assert_eq!(
            messages[0].created_at.map(|t| t.as_unix_secs()),
            Some(1705276800)
        );
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].run_id.is_none());
    }

    #[test]
    fn message_without_text_part_has_no_text() {
        let json = r#"{"role": "assistant", "content": [{"type": "image_file", "image_file": {"file_id": "f"}}], "run_id": "run_9", "created_at": null}"#;
        let message = serde_json::from_str::<WireMessage>(json)
            .unwrap()
            .into_message()
            .unwrap();
        assert!(message.text.is_none());
    }

    #[test]
    fn create_message_body_matches_wire_format() {
        let body = WireCreateMessage {
            role: Role::User.as_str(),
            content: "hello",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"role": "user", "content": "hello"})
        );
    }

    #[test]
    fn parse_retry_after_from_message() {
        let error = r#"{"error":{"message":"Rate limit reached. Please try again in 20s."}}"#;
        assert_eq!(OpenAIAssistantsProvider::parse_retry_after(error), 20);
    }

    #[test]
    fn parse_retry_after_default() {
        let error = r#"{"error":{"message":"Something went wrong"}}"#;
        assert_eq!(OpenAIAssistantsProvider::parse_retry_after(error), 30);
        assert_eq!(OpenAIAssistantsProvider::parse_retry_after("not json"), 30);
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(error_message(r#"{"error":{"message":"No thread"}}"#), "No thread");
        assert_eq!(error_message("gateway down"), "gateway down");
    }

    #[test]
    fn timeout_seconds_saturate() {
        assert_eq!(whole_secs(Duration::from_millis(1500)), 1);
        assert_eq!(whole_secs(Duration::from_secs(u64::MAX)), u32::MAX);
    }

    mod http {
        use super::*;
        use wiremock::matchers::{body_json, header, method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        fn provider_for(server: &MockServer, max_retries: u32) -> OpenAIAssistantsProvider {
            let config = OpenAIAssistantsConfig::new("sk-test")
                .with_base_url(server.uri())
                .with_timeout(Duration::from_secs(5))
                .with_max_retries(max_retries)
                .with_retry_base_delay(Duration::from_millis(1));
            OpenAIAssistantsProvider::new(config).unwrap()
        }

        fn thread() -> ThreadId {
            ThreadId::new("thread_1").unwrap()
        }

        fn run_body(status: &str) -> serde_json::Value {
            serde_json::json!({"id": "run_1", "status": status, "last_error": null})
        }

        fn error_body(message: &str) -> serde_json::Value {
            serde_json::json!({"error": {"message": message, "type": "invalid_request_error"}})
        }

        #[tokio::test]
        async fn requests_carry_auth_and_beta_headers() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/threads"))
                .and(header("Authorization", "Bearer sk-test"))
                .and(header("OpenAI-Beta", "assistants=v2"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "thread_new"})),
                )
                .expect(1)
                .mount(&server)
                .await;

            let thread_id = provider_for(&server, 0).create_thread().await.unwrap();

            assert_eq!(thread_id.as_str(), "thread_new");
        }

        #[tokio::test]
        async fn create_message_and_run_send_wire_bodies() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/threads/thread_1/messages"))
                .and(body_json(serde_json::json!({"role": "user", "content": "How many rows?"})))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "msg_1"})),
                )
                .expect(1)
                .mount(&server)
                .await;
            Mock::given(method("POST"))
                .and(path("/threads/thread_1/runs"))
                .and(body_json(serde_json::json!({"assistant_id": "asst_1"})))
                .respond_with(ResponseTemplate::new(200).set_body_json(run_body("queued")))
                .expect(1)
                .mount(&server)
                .await;
            let provider = provider_for(&server, 0);

            provider
                .create_message(&thread(), Role::User, "How many rows?")
                .await
                .unwrap();
            let run = provider
                .create_run(&thread(), &AssistantId::new("asst_1").unwrap())
                .await
                .unwrap();

            assert_eq!(run.id.as_str(), "run_1");
            assert_eq!(run.status, RunStatus::Queued);
        }

        #[tokio::test]
        async fn list_messages_asks_for_newest_first() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/threads/thread_1/messages"))
                .and(query_param("order", "desc"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "object": "list",
                    "data": [{
                        "role": "assistant",
                        "run_id": "run_1",
                        "created_at": 1705276800,
                        "content": [{"type": "text", "text": {"value": "Result: 42", "annotations": []}}]
                    }]
                })))
                .expect(1)
                .mount(&server)
                .await;

            let messages = provider_for(&server, 0).list_messages(&thread()).await.unwrap();

            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].text.as_deref(), Some("Result: 42"));
        }

        #[tokio::test]
        async fn get_run_retries_unavailable_then_succeeds() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/threads/thread_1/runs/run_1"))
                .respond_with(ResponseTemplate::new(503).set_body_json(error_body("overloaded")))
                .up_to_n_times(1)
                .expect(1)
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/threads/thread_1/runs/run_1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(run_body("completed")))
                .expect(1)
                .mount(&server)
                .await;

            let run = provider_for(&server, 3)
                .get_run(&thread(), &RunId::new("run_1").unwrap())
                .await
                .unwrap();

            assert_eq!(run.status, RunStatus::Completed);
        }

        #[tokio::test]
        async fn get_run_gives_up_after_max_retries() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/threads/thread_1/runs/run_1"))
                .respond_with(ResponseTemplate::new(500).set_body_json(error_body("boom")))
                .expect(3)
                .mount(&server)
                .await;

            let result = provider_for(&server, 2)
                .get_run(&thread(), &RunId::new("run_1").unwrap())
                .await;

            assert!(matches!(result, Err(AssistantApiError::Unavailable { .. })));
        }

        #[tokio::test]
        async fn get_run_does_not_retry_non_retryable_errors() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/threads/thread_1/runs/run_1"))
                .respond_with(ResponseTemplate::new(404).set_body_json(error_body("No run found")))
                .expect(1)
                .mount(&server)
                .await;

            let result = provider_for(&server, 3)
                .get_run(&thread(), &RunId::new("run_1").unwrap())
                .await;

            assert_eq!(
                result,
                Err(AssistantApiError::NotFound("No run found".to_string()))
            );
        }

        #[tokio::test]
        async fn create_message_is_sent_once_on_unavailable() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/threads/thread_1/messages"))
                .respond_with(ResponseTemplate::new(503).set_body_json(error_body("overloaded")))
                .expect(1)
                .mount(&server)
                .await;

            let result = provider_for(&server, 3)
                .create_message(&thread(), Role::User, "q")
                .await;

            assert!(matches!(result, Err(AssistantApiError::Unavailable { .. })));
            assert_eq!(server.received_requests().await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn maps_error_statuses() {
            let cases = [
                (401, AssistantApiError::AuthenticationFailed),
                (
                    404,
                    AssistantApiError::NotFound("No thread found with id 'thread_1'.".to_string()),
                ),
                (429, AssistantApiError::rate_limited(20)),
                (
                    400,
                    AssistantApiError::InvalidRequest("No thread found with id 'thread_1'.".to_string()),
                ),
            ];

            for (status, expected) in cases {
                let server = MockServer::start().await;
                let message = if status == 429 {
                    "Rate limit reached. Please try again in 20s."
                } else {
                    "No thread found with id 'thread_1'."
                };
                Mock::given(method("POST"))
                    .and(path("/threads/thread_1/runs"))
                    .respond_with(ResponseTemplate::new(status).set_body_json(error_body(message)))
                    .expect(1)
                    .mount(&server)
                    .await;

                let result = provider_for(&server, 3)
                    .create_run(&thread(), &AssistantId::new("asst_1").unwrap())
                    .await;

                assert_eq!(result, Err(expected), "status {}", status);
            }
        }
    }
}
