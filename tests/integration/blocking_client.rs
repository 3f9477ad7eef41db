// tests/integration/blocking_client.rs
//! The blocking client against a mock Notion API.

use crate::common::{error_body, expect_api_kind, options_for, TEST_TOKEN};
use mockito::Matcher;
use notionx::{ApiErrorKind, CallArgs, Client, Dispatch, Kwargs, NotionError};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use std::time::Duration;

#[test]
fn retrieve_sends_auth_and_version_headers() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1/pages/b55c9c91")
        .match_header("authorization", format!("Bearer {}", TEST_TOKEN).as_str())
        .match_header("notion-version", "2022-06-28")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"object":"page","id":"b55c9c91"}"#)
        .create();

    let client = Client::new(options_for(&server.url())).unwrap();
    let page = client.pages().retrieve("b55c9c91").unwrap();

    assert_eq!(page, json!({"object": "page", "id": "b55c9c91"}));
    mock.assert();
}

#[test]
fn custom_version_header_is_sent() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1/users/me")
        .match_header("notion-version", "2025-09-03")
        .with_status(200)
        .with_body(r#"{"object":"user","type":"bot"}"#)
        .create();

    let client =
        Client::new(options_for(&server.url()).with_notion_version("2025-09-03")).unwrap();
    let me = client.users().me().unwrap();

    assert_eq!(me["type"], "bot");
    mock.assert();
}

#[test]
fn invalid_body_never_reaches_the_network() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/v1/pages").expect(0).create();

    let client = Client::new(options_for(&server.url())).unwrap();
    let err = client
        .pages()
        .create(json!({"parent": {"page_id": "p"}, "properties": {}, "invalid_key": 1}))
        .unwrap_err();

    assert!(err.is_local_validation());
    assert!(err.to_string().contains("`invalid_key`"));
    mock.assert();
}

#[test]
fn keyword_arguments_are_sent_as_the_body() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("PATCH", "/v1/pages/abc")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"archived": true, "icon": {"emoji": "🥬"}})))
        .with_status(200)
        .with_body(r#"{"object":"page","id":"abc","archived":true}"#)
        .create();

    let client = Client::new(options_for(&server.url())).unwrap();
    let page = client
        .pages()
        .update(
            "abc",
            Kwargs::new()
                .with("archived", true)
                .with("icon", json!({"emoji": "🥬"})),
        )
        .unwrap();

    assert_eq!(page["archived"], true);
    mock.assert();
}

#[test]
fn explicit_body_wins_over_stray_keywords() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("PATCH", "/v1/pages/abc")
        .match_body(Matcher::Json(json!({"archived": false})))
        .with_status(200)
        .with_body(r#"{"object":"page","id":"abc","archived":false}"#)
        .create();

    let client = Client::new(options_for(&server.url())).unwrap();
    let args = CallArgs::new()
        .arg("abc")
        .arg(json!({"archived": false}))
        .kwarg("cover", json!({"external": {"url": "https://example.com/x.png"}}));
    client.call("pages.update", args).unwrap();

    mock.assert();
}

#[test]
fn query_data_becomes_query_parameters() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1/blocks/b1/children")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page_size".into(), "10".into()),
            Matcher::UrlEncoded("start_cursor".into(), "cursor-1".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"object":"list","results":[],"has_more":false}"#)
        .create();

    let client = Client::new(options_for(&server.url())).unwrap();
    let list = client
        .blocks()
        .children()
        .list(
            "b1",
            Kwargs::new()
                .with("page_size", 10)
                .with("start_cursor", "cursor-1"),
        )
        .unwrap();

    assert_eq!(list["has_more"], false);
    mock.assert();
}

#[test]
fn encoded_property_id_is_not_encoded_twice() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1/pages/abc/properties/:UPp")
        .with_status(200)
        .with_body(r#"{"object":"property_item"}"#)
        .create();

    let client = Client::new(options_for(&server.url())).unwrap();
    client
        .pages()
        .properties()
        .retrieve("abc", "%3AUPp", ())
        .unwrap();

    mock.assert();
}

#[test]
fn object_not_found_maps_to_its_kind() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/v1/databases/missing")
        .with_status(404)
        .with_body(error_body(404, "object_not_found", "Could not find database."))
        .create();

    let client = Client::new(options_for(&server.url())).unwrap();
    let err = client.databases().retrieve("missing").unwrap_err();

    assert_eq!(err.api_kind(), Some(ApiErrorKind::ObjectNotFound));
    let NotionError::Api(api) = err else {
        panic!("expected an API error");
    };
    assert_eq!(api.status(), Some(404));
    assert_eq!(api.wire_code(), Some("object_not_found"));
    assert!(api.to_string().contains("Could not find database."));
}

#[test]
fn every_status_code_family_maps_to_one_kind() {
    let cases = [
        (400, "invalid_json", ApiErrorKind::InvalidJson),
        (400, "validation_error", ApiErrorKind::Validation),
        (400, "missing_version", ApiErrorKind::MissingVersion),
        (401, "unauthorized", ApiErrorKind::Unauthorized),
        (403, "restricted_resource", ApiErrorKind::RestrictedResource),
        (409, "conflict_error", ApiErrorKind::Conflict),
        (429, "rate_limited", ApiErrorKind::RateLimited),
        (500, "internal_server_error", ApiErrorKind::InternalServer),
        (503, "service_unavailable", ApiErrorKind::ServiceUnavailable),
        (504, "gateway_timeout", ApiErrorKind::GatewayTimeout),
        (400, "totally_made_up", ApiErrorKind::Unknown),
    ];

    let mut server = mockito::Server::new();
    let client = Client::new(options_for(&server.url())).unwrap();

    for (status, code, kind) in cases {
        let path = format!("/v1/blocks/{}", code);
        let _mock = server
            .mock("GET", path.as_str())
            .with_status(status)
            .with_body(error_body(status as u16, code, "details"))
            .create();

        let err = client.blocks().retrieve(code).unwrap_err();
        assert_eq!(expect_api_kind(err, kind), "details", "code {}", code);
    }
}

#[test]
fn non_json_failure_maps_to_catch_all() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/v1/search")
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("<html>Bad Gateway</html>")
        .create();

    let client = Client::new(options_for(&server.url())).unwrap();
    let err = client.search(()).unwrap_err();

    let detail = expect_api_kind(err, ApiErrorKind::Unknown);
    assert_eq!(detail, "The error object is not a valid json object.");
}

#[test]
fn non_json_success_is_malformed() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/v1/users")
        .with_status(200)
        .with_body("plain text response")
        .create();

    let client = Client::new(options_for(&server.url())).unwrap();
    let err = client.users().list(()).unwrap_err();

    assert!(matches!(err, NotionError::MalformedResponse(_)));
}

#[test]
fn ad_hoc_delete_hits_the_raw_path() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("DELETE", "/v1/blocks/b1")
        .with_status(200)
        .with_body(r#"{"object":"block","id":"b1","archived":true}"#)
        .create();

    let client = Client::new(options_for(&server.url())).unwrap();
    let block = client.delete("blocks/b1").unwrap();

    assert_eq!(block["archived"], true);
    mock.assert();
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let client = Client::new(options_for("http://127.0.0.1:1")).unwrap();
    let err = client.users().me().unwrap_err();

    assert!(matches!(err, NotionError::Transport(_)));
    assert_eq!(err.api_kind(), None);
}

#[test]
fn slow_response_is_a_timeout_not_an_api_error() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/v1/users/me")
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_millis(1_000));
            w.write_all(br#"{"object":"user"}"#)
        })
        .create();

    let options = options_for(&server.url()).with_timeout(Duration::from_millis(100));
    let client = Client::new(options).unwrap();
    let err = client.users().me().unwrap_err();

    assert!(err.is_timeout(), "expected a timeout, got {:?}", err);
    assert!(matches!(err, NotionError::Transport(_)));
    assert_eq!(err.api_kind(), None);
}
