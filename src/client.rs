//! HTTP client for the prepdeck backend.
//!
//! Provides the typed REST surface (interview history, knowledge bases)
//! and the streaming query path consumed as Server-Sent Events.

use std::collections::VecDeque;
use std::pin::Pin;
use std::time::Duration;

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{
    CreateKnowledgeBase, DocumentUpload, InterviewSession, KnowledgeBase, QueryAnswer,
    QueryRequest, SessionDetail,
};
use crate::sse::{StreamDecoder, StreamHandler};

/// Items produced by [`PrepdeckClient::stream_query`]: decoded answer
/// payloads in stream order, or the error that ended the stream.
pub type QueryStream = Pin<Box<dyn Stream<Item = Result<String, ApiError>> + Send>>;

/// Client for the prepdeck backend API.
///
/// Holds a base URL and two reusable HTTP clients: one with the configured
/// request timeout for plain calls, and one without an overall deadline for
/// streaming (a long answer must not be cut off mid-stream; callers wanting
/// a streaming timeout impose it at the transport layer).
pub struct PrepdeckClient {
    /// Base URL of the backend API, without a trailing slash.
    pub base_url: String,
    client: Client,
    stream_client: Client,
}

impl PrepdeckClient {
    /// Create a client from resolved configuration.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let client = Client::builder().timeout(timeout).build()?;
        let stream_client = Client::builder().connect_timeout(timeout).build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            stream_client,
        })
    }

    /// Create a client for the given base URL with default settings.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            stream_client: Client::new(),
        }
    }

    /// Stream the answer to a knowledge-base query.
    ///
    /// Sends a POST to `/api/knowledgebase/query/stream` and returns a
    /// stream of decoded `data:` payloads. A non-success status is checked
    /// before any chunk is read and reported with the `message` field of
    /// the JSON error body when present. Transport failures mid-stream
    /// surface as `Err` items; no item follows an `Err`.
    pub async fn stream_query(&self, request: &QueryRequest) -> Result<QueryStream, ApiError> {
        let url = format!("{}/api/knowledgebase/query/stream", self.base_url);
        let request_id = Uuid::new_v4();
        debug!(
            %request_id,
            knowledge_bases = request.knowledge_base_ids.len(),
            "opening streaming query"
        );

        let response = self
            .stream_client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let bytes_stream = response.bytes_stream();

        let payload_stream = stream::unfold(
            (bytes_stream, StreamDecoder::new(), VecDeque::new(), false),
            |(mut bytes_stream, mut decoder, mut pending, mut done)| async move {
                loop {
                    // Payloads decoded from earlier chunks go out first.
                    if let Some(payload) = pending.pop_front() {
                        return Some((Ok(payload), (bytes_stream, decoder, pending, done)));
                    }
                    if done {
                        return None;
                    }

                    match bytes_stream.next().await {
                        Some(Ok(chunk)) => {
                            pending.extend(decoder.feed(&chunk));
                        }
                        Some(Err(e)) => {
                            // A read failure is terminal; the residue is not flushed.
                            return Some((
                                Err(ApiError::Http(e)),
                                (bytes_stream, decoder, pending, true),
                            ));
                        }
                        None => {
                            done = true;
                            if let Some(payload) = decoder.finish() {
                                pending.push_back(payload);
                            }
                        }
                    }
                }
            },
        );

        Ok(Box::pin(payload_stream))
    }

    /// Stream a query into a [`StreamHandler`].
    ///
    /// Exactly one terminal callback fires per call: `on_error` for a
    /// status or transport failure (after which nothing more is
    /// delivered), otherwise `on_complete` once the stream is drained.
    pub async fn stream_query_with(
        &self,
        request: &QueryRequest,
        handler: &mut dyn StreamHandler,
    ) {
        let mut payloads = match self.stream_query(request).await {
            Ok(payloads) => payloads,
            Err(e) => {
                handler.on_error(&e);
                return;
            }
        };

        while let Some(item) = payloads.next().await {
            match item {
                Ok(payload) => handler.on_message(&payload),
                Err(e) => {
                    warn!(error = %e, "streaming query failed mid-stream");
                    handler.on_error(&e);
                    return;
                }
            }
        }

        handler.on_complete();
    }

    /// Ask a question without streaming.
    pub async fn query(&self, request: &QueryRequest) -> Result<QueryAnswer, ApiError> {
        let url = format!("{}/api/knowledgebase/query", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;
        Self::json_body(response).await
    }

    /// Fetch the interview history.
    pub async fn list_sessions(&self) -> Result<Vec<InterviewSession>, ApiError> {
        let url = format!("{}/api/sessions", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::json_body(response).await
    }

    /// Fetch one session with its transcript.
    pub async fn get_session(&self, id: i64) -> Result<SessionDetail, ApiError> {
        let url = format!("{}/api/sessions/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;
        Self::json_body(response).await
    }

    /// Delete a session from the history.
    pub async fn delete_session(&self, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/api/sessions/{}", self.base_url, id);
        let response = self.client.delete(&url).send().await?;
        Self::expect_success(response).await
    }

    /// List all knowledge bases.
    pub async fn list_knowledge_bases(&self) -> Result<Vec<KnowledgeBase>, ApiError> {
        let url = format!("{}/api/knowledgebase", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::json_body(response).await
    }

    /// Create a knowledge base.
    pub async fn create_knowledge_base(
        &self,
        request: &CreateKnowledgeBase,
    ) -> Result<KnowledgeBase, ApiError> {
        let url = format!("{}/api/knowledgebase", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;
        Self::json_body(response).await
    }

    /// Delete a knowledge base and its documents.
    pub async fn delete_knowledge_base(&self, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/api/knowledgebase/{}", self.base_url, id);
        let response = self.client.delete(&url).send().await?;
        Self::expect_success(response).await
    }

    /// Upload a document into a knowledge base.
    pub async fn upload_document(
        &self,
        knowledge_base_id: i64,
        upload: &DocumentUpload,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{}/api/knowledgebase/{}/documents",
            self.base_url, knowledge_base_id
        );
        debug!(knowledge_base_id, file = %upload.file_name, "uploading document");
        let response = self.client.post(&url).json(upload).send().await?;
        Self::expect_success(response).await
    }

    /// Check whether the backend is reachable and healthy.
    pub async fn health_check(&self) -> Result<bool, ApiError> {
        let url = format!("{}/api/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }

    /// Deserialize a success body, or normalize the failure status.
    async fn json_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Discard a success body, or normalize the failure status.
    async fn expect_success(response: reqwest::Response) -> Result<(), ApiError> {
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }
        Ok(())
    }

    /// Normalize a non-success response into [`ApiError::Server`],
    /// extracting the JSON `message` field when the body provides one.
    async fn status_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .unwrap_or_else(|| format!("request failed (status {})", status)),
            Err(_) => format!("request failed (status {})", status),
        };
        ApiError::Server { status, message }
    }
}
