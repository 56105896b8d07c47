//! Vendor API wire tests against a local mock server
//!
//! Verifies the requests each backend actually sends (auth placement, JSON
//! shape, attachment uploads) and how non-2xx responses surface.

mod common;

use common::fixtures::{make_draft, make_draft_from, make_draft_with_attachments};
use gripe::error::Error;
use gripe::tracker::{PivotalTracker, TrackerBackend, TrelloTracker};
use mockito::Matcher;
use serde_json::json;

fn pivotal(server: &mockito::Server) -> PivotalTracker {
    PivotalTracker::with_base_url("T".to_string(), "P123".to_string(), server.url())
}

fn trello(server: &mockito::Server) -> TrelloTracker {
    TrelloTracker::with_base_url(
        "k".to_string(),
        "t".to_string(),
        "list-1".to_string(),
        server.url(),
    )
}

#[tokio::test]
async fn test_pivotal_create_story_sends_token_and_bug_type() {
    let mut server = mockito::Server::new_async().await;
    let story = server
        .mock("POST", "/projects/P123/stories")
        .match_header("X-TrackerToken", "T")
        .match_body(Matcher::PartialJson(json!({
            "name": "Bug",
            "description": "description for Bug",
            "story_type": "bug",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id": 555, "url": "https://www.pivotaltracker.com/story/show/555", "created_at": "2024-05-04T12:00:00Z"}"#,
        )
        .create_async()
        .await;

    let receipt = pivotal(&server)
        .create_story(&make_draft("Bug"))
        .await
        .unwrap();

    story.assert_async().await;
    assert_eq!(receipt.id, "555");
    assert_eq!(receipt.url, "https://www.pivotaltracker.com/story/show/555");
    assert!(receipt.created_at.is_some());
}

#[tokio::test]
async fn test_pivotal_requestor_is_folded_into_description() {
    let mut server = mockito::Server::new_async().await;
    let story = server
        .mock("POST", "/projects/P123/stories")
        .match_body(Matcher::PartialJson(json!({
            "description": "Requested by: Pat\n\ndescription for Bug",
        })))
        .with_status(200)
        .with_body(r#"{"id": 1, "url": "https://example.com/1"}"#)
        .create_async()
        .await;

    pivotal(&server)
        .create_story(&make_draft_from("Bug", "Pat"))
        .await
        .unwrap();

    story.assert_async().await;
}

#[tokio::test]
async fn test_pivotal_attachments_upload_then_comment() {
    let mut server = mockito::Server::new_async().await;
    let story = server
        .mock("POST", "/projects/P123/stories")
        .with_status(200)
        .with_body(r#"{"id": 555, "url": "https://example.com/555"}"#)
        .create_async()
        .await;
    let uploads = server
        .mock("POST", "/projects/P123/uploads")
        .match_header("X-TrackerToken", "T")
        .with_status(200)
        .with_body(r#"{"id": 77}"#)
        .expect(2)
        .create_async()
        .await;
    let comment = server
        .mock("POST", "/projects/P123/stories/555/comments")
        .match_body(Matcher::PartialJson(json!({
            "file_attachment_ids": [77, 77],
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    pivotal(&server)
        .create_story(&make_draft_with_attachments("Bug"))
        .await
        .unwrap();

    story.assert_async().await;
    uploads.assert_async().await;
    comment.assert_async().await;
}

#[tokio::test]
async fn test_pivotal_api_failure_surfaces_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/projects/P123/stories")
        .with_status(403)
        .with_body("invalid authorization")
        .create_async()
        .await;

    let err = pivotal(&server)
        .create_story(&make_draft("Bug"))
        .await
        .unwrap_err();

    match err {
        Error::PivotalApi(msg) => {
            assert!(msg.contains("403"), "missing status in {msg}");
            assert!(msg.contains("invalid authorization"), "missing body in {msg}");
        }
        other => panic!("expected PivotalApi error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_trello_create_card_sends_key_token_and_list() {
    let mut server = mockito::Server::new_async().await;
    let card = server
        .mock("POST", "/cards")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("key".to_string(), "k".to_string()),
            Matcher::UrlEncoded("token".to_string(), "t".to_string()),
        ]))
        .match_body(Matcher::PartialJson(json!({
            "idList": "list-1",
            "name": "Bug",
            "desc": "description for Bug",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "abc123", "shortUrl": "https://trello.com/c/abc123"}"#)
        .create_async()
        .await;

    let receipt = trello(&server)
        .create_story(&make_draft("Bug"))
        .await
        .unwrap();

    card.assert_async().await;
    assert_eq!(receipt.id, "abc123");
    assert_eq!(receipt.url, "https://trello.com/c/abc123");
    assert!(receipt.created_at.is_none());
}

#[tokio::test]
async fn test_trello_attachments_upload_per_card() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/cards")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"id": "abc123", "shortUrl": "https://trello.com/c/abc123"}"#)
        .create_async()
        .await;
    let attachments = server
        .mock("POST", "/cards/abc123/attachments")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("key".to_string(), "k".to_string()),
            Matcher::UrlEncoded("token".to_string(), "t".to_string()),
        ]))
        .with_status(200)
        .with_body("{}")
        .expect(2)
        .create_async()
        .await;

    trello(&server)
        .create_story(&make_draft_with_attachments("Bug"))
        .await
        .unwrap();

    attachments.assert_async().await;
}

#[tokio::test]
async fn test_trello_api_failure_surfaces_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/cards")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body("invalid key")
        .create_async()
        .await;

    let err = trello(&server)
        .create_story(&make_draft("Bug"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::TrelloApi(msg) if msg.contains("401") && msg.contains("invalid key")));
}
