use std::path::Path;

use waypoint::http::dispatch::{DispatchOutcome, dispatch};
use waypoint::http::response::StatusCode;
use waypoint::route::{PeerRegistry, Router};

fn router(root: &Path) -> Router {
    Router::new(root.to_path_buf(), PeerRegistry::parse("")).unwrap()
}

#[tokio::test]
async fn test_valid_get_is_routed() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("f.txt"), b"payload").unwrap();
    let router = router(dir.path());

    let result = dispatch(b"GET /f.txt HTTP/1.1\r\nHost: localhost\r\n", &router).await;

    assert_eq!(result.outcome, DispatchOutcome::Continue);
    assert!(!result.close_requested);
    assert_eq!(result.response.status, StatusCode::Ok);
    assert_eq!(result.response.body, b"payload".to_vec());
}

#[tokio::test]
async fn test_post_is_answered_with_501() {
    let dir = tempfile::tempdir().unwrap();
    let router = router(dir.path());

    let result = dispatch(b"POST /f.txt HTTP/1.1\r\n", &router).await;

    assert_eq!(result.outcome, DispatchOutcome::MethodUnsupported);
    assert!(!result.close_requested);
    assert_eq!(result.response.status, StatusCode::NotImplemented);
}

#[tokio::test]
async fn test_lowercase_method_is_not_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let router = router(dir.path());

    let result = dispatch(b"get /f.txt HTTP/1.1\r\n", &router).await;

    assert_eq!(result.outcome, DispatchOutcome::MethodUnsupported);
    assert_eq!(result.response.status, StatusCode::NotImplemented);
}

#[tokio::test]
async fn test_unsupported_method_skips_header_validation() {
    let dir = tempfile::tempdir().unwrap();
    let router = router(dir.path());

    // Even a close request is ignored when the method short-circuits.
    let result = dispatch(b"POST / HTTP/1.1\r\nConnection: close\r\n", &router).await;

    assert_eq!(result.outcome, DispatchOutcome::MethodUnsupported);
    assert!(!result.close_requested);
}

#[tokio::test]
async fn test_old_http_version_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let router = router(dir.path());

    let result = dispatch(b"GET / HTTP/1.0\r\n", &router).await;

    assert_eq!(result.outcome, DispatchOutcome::FatalMalformed);
    assert!(result.close_requested);
    assert_eq!(result.response.status, StatusCode::BadRequest);
    assert_eq!(result.response.headers.get("Connection").unwrap(), "close");
}

#[tokio::test]
async fn test_missing_version_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let router = router(dir.path());

    let result = dispatch(b"GET /\r\n", &router).await;

    assert_eq!(result.outcome, DispatchOutcome::FatalMalformed);
    assert_eq!(result.response.status, StatusCode::BadRequest);
}

#[tokio::test]
async fn test_target_without_leading_slash_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let router = router(dir.path());

    let result = dispatch(b"GET f.txt HTTP/1.1\r\n", &router).await;

    assert_eq!(result.outcome, DispatchOutcome::FatalMalformed);
    assert_eq!(result.response.status, StatusCode::BadRequest);
}

#[tokio::test]
async fn test_malformed_header_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let router = router(dir.path());

    let result = dispatch(b"GET / HTTP/1.1\r\nBrokenHeader\r\n", &router).await;

    assert_eq!(result.outcome, DispatchOutcome::FatalMalformed);
    assert_eq!(result.response.status, StatusCode::BadRequest);
}

#[tokio::test]
async fn test_duplicate_connection_header_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let router = router(dir.path());

    let result = dispatch(
        b"GET / HTTP/1.1\r\nConnection: keep-alive\r\nConnection: close\r\n",
        &router,
    )
    .await;

    assert_eq!(result.outcome, DispatchOutcome::FatalMalformed);
    assert_eq!(result.response.status, StatusCode::BadRequest);
}

#[tokio::test]
async fn test_connection_close_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let router = router(dir.path());

    let result = dispatch(b"GET /missing HTTP/1.1\r\nConnection: close\r\n", &router).await;

    assert_eq!(result.outcome, DispatchOutcome::Continue);
    assert!(result.close_requested);
    assert_eq!(result.response.status, StatusCode::NotFound);
}

#[tokio::test]
async fn test_head_request_is_routed() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("f.txt"), b"payload").unwrap();
    let router = router(dir.path());

    let result = dispatch(b"HEAD /f.txt HTTP/1.1\r\n", &router).await;

    assert_eq!(result.outcome, DispatchOutcome::Continue);
    assert_eq!(result.response.status, StatusCode::Ok);
    assert_eq!(result.response.headers.get("Content-Length").unwrap(), "7");
    assert!(result.response.body.is_empty());
}

#[tokio::test]
async fn test_non_utf8_span_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let router = router(dir.path());

    let result = dispatch(b"GET /\xff\xfe HTTP/1.1\r\n", &router).await;

    assert_eq!(result.outcome, DispatchOutcome::FatalMalformed);
    assert_eq!(result.response.status, StatusCode::BadRequest);
}
