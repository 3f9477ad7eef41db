// tests/integration/async_client.rs
//! The async client shares the request path with the blocking one.

use crate::common::{error_body, expect_api_kind, options_for};
use mockito::Matcher;
use notionx::{ApiErrorKind, AsyncClient, Dispatch, Kwargs, NotionError};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use std::time::Duration;

#[tokio::test]
async fn comment_is_created_in_a_discussion() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/comments")
        .match_body(Matcher::Json(json!({
            "discussion_id": "d1",
            "rich_text": [{"text": {"content": "Looks good."}}],
        })))
        .with_status(200)
        .with_body(r#"{"object":"comment","id":"c1"}"#)
        .create_async()
        .await;

    let client = AsyncClient::new(options_for(&server.url())).unwrap();
    let comment = client
        .comments()
        .create(
            Kwargs::new()
                .with("discussion_id", "d1")
                .with("rich_text", json!([{"text": {"content": "Looks good."}}])),
        )
        .await
        .unwrap();

    assert_eq!(comment["id"], "c1");
    mock.assert_async().await;
}

#[tokio::test]
async fn comment_with_two_locations_is_rejected_locally() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/comments")
        .expect(0)
        .create_async()
        .await;

    let client = AsyncClient::new(options_for(&server.url())).unwrap();
    let err = client
        .comments()
        .create(json!({
            "rich_text": [{"text": {"content": "This is a test."}}],
            "discussion_id": "x",
            "parent": "y",
        }))
        .await
        .unwrap_err();

    assert!(err.is_local_validation());
    assert!(err.to_string().contains("more than one key in the group"));
    mock.assert_async().await;
}

#[tokio::test]
async fn database_query_posts_filter() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/databases/d1/query")
        .match_body(Matcher::Json(json!({
            "filter": {"property": "Done", "checkbox": {"equals": true}},
            "page_size": 2,
        })))
        .with_status(200)
        .with_body(r#"{"object":"list","results":[{"id":"r1"},{"id":"r2"}]}"#)
        .create_async()
        .await;

    let client = AsyncClient::new(options_for(&server.url())).unwrap();
    let rows = client
        .databases()
        .query(
            "d1",
            json!({
                "filter": {"property": "Done", "checkbox": {"equals": true}},
                "page_size": 2,
            }),
        )
        .await
        .unwrap();

    assert_eq!(rows["results"].as_array().map(Vec::len), Some(2));
    mock.assert_async().await;
}

#[tokio::test]
async fn failures_map_through_the_taxonomy() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/users/u1")
        .with_status(429)
        .with_body(error_body(429, "rate_limited", "Slow down."))
        .create_async()
        .await;

    let client = AsyncClient::new(options_for(&server.url())).unwrap();
    let err = client.users().retrieve("u1").await.unwrap_err();

    assert_eq!(err.api_kind().map(|kind| kind.is_retryable()), Some(true));
    assert_eq!(expect_api_kind(err, ApiErrorKind::RateLimited), "Slow down.");
}

#[tokio::test]
async fn calls_can_run_concurrently() {
    let mut server = mockito::Server::new_async().await;
    let _pages = server
        .mock("GET", "/v1/pages/p1")
        .with_status(200)
        .with_body(r#"{"object":"page","id":"p1"}"#)
        .create_async()
        .await;
    let _blocks = server
        .mock("GET", "/v1/blocks/b1")
        .with_status(200)
        .with_body(r#"{"object":"block","id":"b1"}"#)
        .create_async()
        .await;

    let client = AsyncClient::new(options_for(&server.url())).unwrap();
    let (page, block) = futures::join!(client.pages().retrieve("p1"), client.blocks().retrieve("b1"));

    assert_eq!(page.unwrap()["id"], "p1");
    assert_eq!(block.unwrap()["id"], "b1");
}

#[tokio::test]
async fn spawned_call_outlives_the_borrow() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/users/me")
        .with_status(200)
        .with_body(r#"{"object":"user","type":"bot"}"#)
        .create_async()
        .await;

    let client = AsyncClient::new(options_for(&server.url())).unwrap();
    let handle = tokio::spawn(client.users().me());

    let me = handle.await.unwrap().unwrap();
    assert_eq!(me["type"], "bot");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_response_is_a_timeout_not_an_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/blocks/b1")
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_millis(1_000));
            w.write_all(br#"{"object":"block"}"#)
        })
        .create_async()
        .await;

    let options = options_for(&server.url()).with_timeout(Duration::from_millis(100));
    let client = AsyncClient::new(options).unwrap();
    let err = client.blocks().retrieve("b1").await.unwrap_err();

    assert!(err.is_timeout(), "expected a timeout, got {:?}", err);
    assert!(matches!(err, NotionError::Transport(_)));
    assert_eq!(err.api_kind(), None);
}
