mod common;

use std::time::Duration;

use common::{dead_base, Stub, OTP_FRAME};
use figinspect::client::{ClientConfig, FetchedTree, FigmaClient};
use figinspect::{descendants, find_by_id, ImageFormat, InspectError, RenderOptions};

fn client(base: &str) -> FigmaClient {
    FigmaClient::new(ClientConfig {
        token: "figd_test".to_string(),
        api_base: base.to_string(),
        timeout: Some(Duration::from_secs(5)),
    })
    .expect("client should build")
}

#[test]
fn whole_file_fetch_returns_the_document_root() {
    let stub = Stub::respond(
        200,
        r#"{"name": "Storyverse", "document": {"id": "0:0", "name": "Document", "type": "DOCUMENT",
            "children": [{"id": "0:1", "name": "Page 1", "type": "CANVAS"}]}}"#,
    );
    let document = client(&stub.base)
        .fetch_document("zuWEY4gNbhwescluD1WZAC")
        .expect("fetch should succeed");
    assert_eq!(document.name, "Document");
    assert_eq!(document.children().len(), 1);

    let request = stub.request();
    assert!(
        request.starts_with("GET /v1/files/zuWEY4gNbhwescluD1WZAC HTTP/1.1"),
        "{request}"
    );
    assert!(
        request.to_lowercase().contains("x-figma-token: figd_test"),
        "{request}"
    );
}

#[test]
fn scoped_fetch_sends_ids_and_unwraps_the_envelope() {
    let stub = Stub::respond(200, OTP_FRAME);
    let frame = client(&stub.base)
        .fetch_node("zuWEY4gNbhwescluD1WZAC", "23-189")
        .expect("fetch should succeed");
    assert_eq!(frame.name, "OTP Verification");
    assert!(find_by_id(&frame, "23:193").is_some());

    let request = stub.request();
    assert!(
        request.starts_with("GET /v1/files/zuWEY4gNbhwescluD1WZAC/nodes?ids=23%3A189 HTTP/1.1"),
        "{request}"
    );
}

#[test]
fn multi_id_fetch_mirrors_the_nodes_envelope() {
    let stub = Stub::respond(
        200,
        r#"{"nodes": {
            "1:2": {"document": {"id": "1:2", "name": "A", "type": "FRAME"}},
            "3:4": null
        }}"#,
    );
    let fetched = client(&stub.base)
        .fetch("file", &["1:2".to_string(), "3:4".to_string()], None)
        .expect("fetch should succeed");
    match fetched {
        FetchedTree::Nodes(nodes) => {
            assert_eq!(nodes.len(), 1);
            assert_eq!(nodes["1:2"].name, "A");
        }
        FetchedTree::Document(_) => panic!("expected the nodes shape"),
    }
    assert!(stub.request().contains("ids=1%3A2%2C3%3A4"));
}

#[test]
fn null_node_entry_is_not_found() {
    let stub = Stub::respond(200, r#"{"nodes": {"99:999": null}}"#);
    let err = client(&stub.base)
        .fetch_node("file", "99:999")
        .expect_err("missing node must fail");
    assert!(err.is_not_found(), "{err:?}");
    assert!(err.to_string().contains("99:999"));
}

#[test]
fn rejected_credentials_are_authentication_errors() {
    for status in [401, 403] {
        let stub = Stub::respond(status, r#"{"status": 403, "err": "Invalid token"}"#);
        let err = client(&stub.base)
            .fetch_document("file")
            .expect_err("auth failure must fail");
        match err {
            InspectError::Authentication { status: got } => assert_eq!(got, status),
            other => panic!("unexpected error {other:?}"),
        }
    }
}

#[test]
fn missing_file_is_not_found_and_names_the_file() {
    let stub = Stub::respond(404, r#"{"status": 404, "err": "Not found"}"#);
    let err = client(&stub.base)
        .fetch_node("nosuchfile", "23:189")
        .expect_err("404 must fail");
    assert!(err.is_not_found());
    assert!(err.to_string().contains("nosuchfile"), "{err}");
}

#[test]
fn other_statuses_are_transport_errors() {
    for status in [400, 429, 500] {
        let stub = Stub::respond(status, "{}");
        let err = client(&stub.base)
            .fetch_document("file")
            .expect_err("non-2xx must fail");
        assert!(
            matches!(err, InspectError::Transport { .. }),
            "{status}: {err:?}"
        );
    }
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let err = client(&dead_base())
        .fetch_document("file")
        .expect_err("connection must fail");
    assert!(matches!(err, InspectError::Transport { .. }), "{err:?}");
}

#[test]
fn wrong_envelope_is_malformed() {
    let stub = Stub::respond(200, r#"{"name": "no document here"}"#);
    let err = client(&stub.base)
        .fetch_document("file")
        .expect_err("missing document must fail");
    assert!(
        matches!(err, InspectError::MalformedResponse { .. }),
        "{err:?}"
    );
    assert!(err.to_string().contains("document"));

    let stub = Stub::respond(200, "<html>gateway</html>");
    let err = client(&stub.base)
        .fetch_node("file", "1:1")
        .expect_err("non-json must fail");
    assert!(matches!(err, InspectError::MalformedResponse { .. }));
}

/// `{"document": ...}` whose root has `levels` GROUPs nested below it.
fn nested_groups(levels: usize) -> String {
    let mut json = String::from(r#"{"id": "0:0", "name": "leaf", "type": "GROUP"}"#);
    for level in 1..=levels {
        json = format!(
            r#"{{"id": "0:{level}", "name": "group {level}", "type": "GROUP", "children": [{json}]}}"#
        );
    }
    format!(r#"{{"document": {json}}}"#)
}

#[test]
fn deep_documents_parse_past_the_json_nesting_default() {
    let stub = Stub::respond(200, nested_groups(200));
    let document = client(&stub.base)
        .fetch_document("file")
        .expect("deep tree should parse");
    assert_eq!(document.id, "0:200");
    let (depth, leaf) = descendants(&document).last().expect("tree has nodes");
    assert_eq!((depth, leaf.id.as_str()), (200, "0:0"));
    assert_eq!(descendants(&document).count(), 201);
}

#[test]
fn depth_limit_is_sent_as_a_query_parameter() {
    let stub = Stub::respond(200, OTP_FRAME);
    client(&stub.base)
        .fetch_root("file", Some("23-189"), Some(2))
        .expect("fetch should succeed");
    let request = stub.request();
    assert!(
        request.starts_with("GET /v1/files/file/nodes?ids=23%3A189&depth=2 HTTP/1.1"),
        "{request}"
    );

    let stub = Stub::respond(200, nested_groups(1));
    client(&stub.base)
        .fetch("file", &[], Some(3))
        .expect("fetch should succeed");
    let request = stub.request();
    assert!(request.starts_with("GET /v1/files/file?depth=3 HTTP/1.1"), "{request}");
}

#[test]
fn render_urls_maps_every_requested_id() {
    let stub = Stub::respond(
        200,
        r#"{"err": null, "images": {"1:2": "https://figma-alpha.s3/1-2.svg", "3:4": null}}"#,
    );
    let options = RenderOptions {
        format: ImageFormat::Svg,
        scale: Some(2.0),
    };
    let images = client(&stub.base)
        .render_urls("file", &["1-2".to_string(), "3:4".to_string(), "5:6".to_string()], options)
        .expect("render should succeed");
    assert_eq!(images["1:2"].as_deref(), Some("https://figma-alpha.s3/1-2.svg"));
    assert_eq!(images["3:4"], None);
    assert_eq!(images["5:6"], None);

    let request = stub.request();
    assert!(
        request.starts_with(
            "GET /v1/images/file?ids=1%3A2%2C3%3A4%2C5%3A6&format=svg&scale=2 HTTP/1.1"
        ),
        "{request}"
    );
}

#[test]
fn render_error_field_is_a_transport_error() {
    let stub = Stub::respond(200, r#"{"err": "Render timeout", "images": {}}"#);
    let err = client(&stub.base)
        .render_urls("file", &["1:2".to_string()], RenderOptions::default())
        .expect_err("render error must fail");
    assert!(matches!(err, InspectError::Transport { .. }), "{err:?}");
    assert!(err.to_string().contains("Render timeout"));
}
