//! REST endpoint tests using wiremock.
//!
//! These tests verify that PrepdeckClient calls the session and
//! knowledge-base endpoints with the right method, path, and body, and
//! normalizes error responses consistently.

use prepdeck::client::PrepdeckClient;
use prepdeck::error::ApiError;
use prepdeck::models::{CreateKnowledgeBase, DocumentUpload, QueryRequest};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_list_sessions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 1,
                "title": "Ownership deep dive",
                "topic": "rust",
                "messageCount": 12,
                "startedAt": "2026-07-30T09:15:00Z"
            },
            {"id": 2}
        ])))
        .mount(&server)
        .await;

    let client = PrepdeckClient::with_base_url(server.uri());
    let sessions = client.list_sessions().await.unwrap();

    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].id, 1);
    assert_eq!(sessions[0].title, "Ownership deep dive");
    assert_eq!(sessions[0].message_count, 12);
    // Sparse rows fall back to defaults
    assert!(sessions[1].title.is_empty());
}

#[tokio::test]
async fn test_get_session_with_transcript() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sessions/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 5,
            "title": "Mock behavioral round",
            "messages": [
                {"role": "user", "content": "Tell me about a conflict."},
                {"role": "assistant", "content": "Start with the situation."}
            ]
        })))
        .mount(&server)
        .await;

    let client = PrepdeckClient::with_base_url(server.uri());
    let detail = client.get_session(5).await.unwrap();

    assert_eq!(detail.session.id, 5);
    assert_eq!(detail.messages.len(), 2);
}

#[tokio::test]
async fn test_delete_session() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/sessions/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = PrepdeckClient::with_base_url(server.uri());
    assert!(client.delete_session(9).await.is_ok());
}

#[tokio::test]
async fn test_delete_missing_session_surfaces_status() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/sessions/404"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"message": "session not found"})),
        )
        .mount(&server)
        .await;

    let client = PrepdeckClient::with_base_url(server.uri());
    match client.delete_session(404).await {
        Err(ApiError::Server { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "session not found");
        }
        other => panic!("Expected Server error, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn test_list_knowledge_bases() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/knowledgebase"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "rust-book", "documentCount": 20},
            {"id": 2, "name": "system-design", "documentCount": 7}
        ])))
        .mount(&server)
        .await;

    let client = PrepdeckClient::with_base_url(server.uri());
    let kbs = client.list_knowledge_bases().await.unwrap();

    assert_eq!(kbs.len(), 2);
    assert_eq!(kbs[1].name, "system-design");
    assert_eq!(kbs[1].document_count, 7);
}

#[tokio::test]
async fn test_create_knowledge_base() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/knowledgebase"))
        .and(body_json(serde_json::json!({"name": "algorithms"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 3,
            "name": "algorithms"
        })))
        .mount(&server)
        .await;

    let client = PrepdeckClient::with_base_url(server.uri());
    let request = CreateKnowledgeBase {
        name: "algorithms".to_string(),
        description: None,
    };
    let kb = client.create_knowledge_base(&request).await.unwrap();

    assert_eq!(kb.id, 3);
    assert_eq!(kb.name, "algorithms");
}

#[tokio::test]
async fn test_delete_knowledge_base() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/knowledgebase/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = PrepdeckClient::with_base_url(server.uri());
    assert!(client.delete_knowledge_base(2).await.is_ok());
}

#[tokio::test]
async fn test_upload_document() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/knowledgebase/4/documents"))
        .and(body_json(serde_json::json!({
            "fileName": "notes.md",
            "content": "# Two pointers\n..."
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = PrepdeckClient::with_base_url(server.uri());
    let upload = DocumentUpload {
        file_name: "notes.md".to_string(),
        content: "# Two pointers\n...".to_string(),
    };
    assert!(client.upload_document(4, &upload).await.is_ok());
}

#[tokio::test]
async fn test_non_streaming_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/knowledgebase/query"))
        .and(body_json(serde_json::json!({
            "knowledgeBaseIds": [1],
            "question": "What is Big-O?"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "answer": "A bound on growth rate.",
            "sources": ["algorithms/chapter1.md"]
        })))
        .mount(&server)
        .await;

    let client = PrepdeckClient::with_base_url(server.uri());
    let answer = client
        .query(&QueryRequest::new("What is Big-O?", vec![1]))
        .await
        .unwrap();

    assert_eq!(answer.answer, "A bound on growth rate.");
    assert_eq!(answer.sources, vec!["algorithms/chapter1.md"]);
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = PrepdeckClient::with_base_url(server.uri());
    assert!(client.health_check().await.unwrap());
}

#[tokio::test]
async fn test_health_check_unhealthy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = PrepdeckClient::with_base_url(server.uri());
    assert!(!client.health_check().await.unwrap());
}

#[tokio::test]
async fn test_malformed_success_body_is_a_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = PrepdeckClient::with_base_url(server.uri());
    let result = client.list_sessions().await;
    assert!(matches!(result, Err(ApiError::Json(_))));
}
