//! Wire types for the prepdeck backend API.
//!
//! The backend speaks camelCase JSON; every type here mirrors one
//! request or response body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A past interview-practice session, as listed in the history panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSession {
    pub id: i64,
    /// Title derived from the opening question.
    #[serde(default)]
    pub title: String,
    /// Target role or topic the session practiced for.
    #[serde(default)]
    pub topic: String,
    /// Number of transcript messages in the session.
    #[serde(default)]
    pub message_count: u32,
    #[serde(default = "Utc::now")]
    pub started_at: DateTime<Utc>,
}

/// Role of a transcript message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One transcript message inside a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionMessage {
    pub role: MessageRole,
    pub content: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// A session with its full transcript, from the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: InterviewSession,
    #[serde(default)]
    pub messages: Vec<SessionMessage>,
}

/// A knowledge base that questions can be answered against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBase {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub document_count: u32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateKnowledgeBase {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A document uploaded into a knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpload {
    pub file_name: String,
    pub content: String,
}

/// Request body for knowledge-base queries, streaming and not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub knowledge_base_ids: Vec<i64>,
    pub question: String,
}

impl QueryRequest {
    /// Create a query against the given knowledge bases.
    pub fn new(question: impl Into<String>, knowledge_base_ids: Vec<i64>) -> Self {
        Self {
            knowledge_base_ids,
            question: question.into(),
        }
    }
}

/// Non-streaming answer to a knowledge-base query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryAnswer {
    pub answer: String,
    /// Source document names the answer drew from.
    #[serde(default)]
    pub sources: Vec<String>,
}
