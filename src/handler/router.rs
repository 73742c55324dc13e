//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, the mount
//! resolver, the generated manifest route, and the 404 fallback, in that
//! order. Mounted files are consulted before the manifest route, so a real
//! file at the manifest path shadows the generated document.

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::resolver::{self, ResolvedAsset};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{HeaderMap, Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// Generic over the request body because the chain only reads the request
/// head; the body is dropped unread.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _body) = req.into_parts();
    let is_head = parts.method == Method::HEAD;

    // The resolver strips the query itself, so hand it the full form
    let raw_path = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path(), |pq| pq.as_str());

    let response =
        if let Some(resp) = check_http_method(&parts.method, state.config.http.enable_cors) {
            resp
        } else if let Some(resp) = check_body_size(&parts.headers, state.config.http.max_body_size)
        {
            resp
        } else {
            logger::log_headers_count(parts.headers.len(), state.config.logging.show_headers);
            dispatch(raw_path, is_head, &state).await
        };

    if state.config.logging.access_log {
        let entry = access_entry(&parts, remote_addr, &response, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Walk the handler chain for a GET/HEAD request
async fn dispatch(raw_path: &str, is_head: bool, state: &AppState) -> Response<Full<Bytes>> {
    // 1. Mounted static assets
    match state.resolver.resolve(raw_path).await {
        Ok(ResolvedAsset::Found { body, content_type }) => {
            return http::build_asset_response(
                Bytes::from(body.into_bytes()),
                content_type,
                is_head,
            );
        }
        Ok(ResolvedAsset::NotFound) => {}
        Err(e) => {
            logger::log_error(&format!("Asset resolution failed: {e}"));
            return http::build_500_response();
        }
    }

    // 2. Generated manifest
    if let Some(manifest) = &state.manifest {
        if resolver::strip_query(raw_path) == manifest.route {
            return http::build_asset_response(manifest.body.clone(), "application/json", is_head);
        }
    }

    // 3. Nothing claimed the path
    http::build_404_response()
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(headers: &HeaderMap, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = headers.get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Assemble the access log entry for a finished request
fn access_entry(
    parts: &hyper::http::request::Parts,
    remote_addr: SocketAddr,
    response: &Response<Full<Bytes>>,
    started: Instant,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        remote_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = http_version_label(parts.version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = header_str(&parts.headers, "referer");
    entry.user_agent = header_str(&parts.headers, "user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn http_version_label(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else if version == Version::HTTP_3 {
        "3"
    } else if version == Version::HTTP_09 {
        "0.9"
    } else {
        "1.1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, MountConfig};
    use http_body_util::BodyExt;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn test_state(mounts: &[(&str, &Path)]) -> Arc<AppState> {
        let mut cfg = Config::load_from("/nonexistent/stagehand-test-config").unwrap();
        cfg.mounts = mounts
            .iter()
            .map(|(route, dir)| MountConfig {
                route: (*route).to_string(),
                dir: dir.to_string_lossy().into_owned(),
            })
            .collect();
        // Keep test output quiet
        cfg.logging.access_log = false;
        Arc::new(AppState::new(&cfg))
    }

    fn peer() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 54_321))
    }

    fn request(method: &str, uri: &str) -> Request<()> {
        Request::builder().method(method).uri(uri).body(()).unwrap()
    }

    async fn body_bytes(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_get_serves_mounted_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.css"), "body { margin: 0 }").unwrap();
        let state = test_state(&[("/assets/", dir.path())]);

        let resp = handle_request(request("GET", "/assets/app.css?v=7"), state, peer())
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/css");
        assert_eq!(body_bytes(resp).await.as_ref(), b"body { margin: 0 }");
    }

    #[tokio::test]
    async fn test_head_keeps_headers_drops_body() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("logo.png"), b"png-bytes").unwrap();
        let state = test_state(&[("/assets/", dir.path())]);

        let resp = handle_request(request("HEAD", "/assets/logo.png"), state, peer())
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "image/png");
        assert_eq!(resp.headers()["Content-Length"], "9");
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_unmatched_path_is_404() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&[("/assets/", dir.path())]);

        let resp = handle_request(request("GET", "/elsewhere/app.css"), state, peer())
            .await
            .unwrap();

        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&[("/assets/", dir.path())]);

        let resp = handle_request(request("GET", "/assets/missing.png"), state, peer())
            .await
            .unwrap();

        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_manifest_route_serves_generated_json() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&[("/static/", dir.path())]);

        let resp = handle_request(request("GET", "/assets/manifest.json"), state, peer())
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        let parsed: serde_json::Value =
            serde_json::from_slice(&body_bytes(resp).await).unwrap();
        assert_eq!(parsed["name"], "Dashboard");
    }

    #[tokio::test]
    async fn test_mounted_file_shadows_manifest_route() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("manifest.json"), r#"{"name":"on disk"}"#).unwrap();
        let state = test_state(&[("/assets/", dir.path())]);

        let resp = handle_request(request("GET", "/assets/manifest.json"), state, peer())
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(body_bytes(resp).await.as_ref(), br#"{"name":"on disk"}"#);
    }

    #[tokio::test]
    async fn test_manifest_route_respects_disabled() {
        let mut cfg = Config::load_from("/nonexistent/stagehand-test-config").unwrap();
        cfg.manifest.enabled = false;
        cfg.logging.access_log = false;
        let state = Arc::new(AppState::new(&cfg));

        let resp = handle_request(request("GET", "/assets/manifest.json"), state, peer())
            .await
            .unwrap();

        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_post_is_rejected() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&[("/assets/", dir.path())]);

        let resp = handle_request(request("POST", "/assets/app.css"), state, peer())
            .await
            .unwrap();

        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["Allow"], "GET, HEAD, OPTIONS");
    }

    #[tokio::test]
    async fn test_options_preflight() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&[("/assets/", dir.path())]);

        let resp = handle_request(request("OPTIONS", "/assets/app.css"), state, peer())
            .await
            .unwrap();

        assert_eq!(resp.status(), 204);
    }

    #[tokio::test]
    async fn test_oversized_content_length_rejected() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&[("/assets/", dir.path())]);

        let req = Request::builder()
            .method("GET")
            .uri("/assets/app.css")
            .header("content-length", "999999999999")
            .body(())
            .unwrap();
        let resp = handle_request(req, state, peer()).await.unwrap();

        assert_eq!(resp.status(), 413);
    }
}
