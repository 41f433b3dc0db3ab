//! Local file serving and peer redirects.

use std::path::PathBuf;

use regex::Regex;
use tokio::fs;
use tracing::debug;

use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::route::registry::PeerRegistry;

// Targets may only name files drawn from this character set; anything else
// is treated as absent.
const TARGET_CHARSET: &str = "^[a-zA-Z0-9./-]+$";

/// Decides the response for a validated GET or HEAD request: a local file,
/// a redirect to the peer holding it, or a 404.
pub struct Router {
    root: PathBuf,
    registry: PeerRegistry,
    allowed_target: Regex,
}

impl Router {
    pub fn new(root: PathBuf, registry: PeerRegistry) -> anyhow::Result<Self> {
        Ok(Self {
            root,
            registry,
            allowed_target: Regex::new(TARGET_CHARSET)?,
        })
    }

    /// Composes the response for one request.
    ///
    /// A HEAD response states the file's `Content-Length` but sends no body.
    /// Filesystem probe failures are indistinguishable from a missing file
    /// and fall through to the registry, then to 404.
    pub async fn route(&self, request: &Request) -> Response {
        if let Some(contents) = self.read_local(&request.target).await {
            debug!("File found: {}", request.target);

            let length = contents.len();
            let body = match request.method {
                Method::GET => contents,
                Method::HEAD => Vec::new(),
            };

            return ResponseBuilder::new(StatusCode::Ok)
                .header("Content-Length", length.to_string())
                .body(body)
                .build();
        }

        if let Some(peer) = self.registry.lookup(&request.target) {
            debug!("File found on peer server: {}", request.target);

            return Response::redirect(format!(
                "http://{}:{}{}",
                peer.host, peer.port, request.target
            ));
        }

        debug!("File not found: {}", request.target);
        Response::not_found()
    }

    async fn read_local(&self, target: &str) -> Option<Vec<u8>> {
        if escapes_root(target) || !self.allowed_target.is_match(target) {
            return None;
        }

        let path = self.root.join(target.strip_prefix('/')?);
        let meta = fs::metadata(&path).await.ok()?;
        if !meta.is_file() {
            return None;
        }

        fs::read(&path).await.ok()
    }
}

/// Reports whether a target's `..` segments would climb above the served
/// root.
///
/// Single left-to-right scan over a traversal depth counter: every `/` not
/// followed by `..` counts one level down (so `/./` counts as a level, and
/// `/...` counts as `..`), every `/..` counts one level up, and a negative
/// count rejects the target. No other normalization is applied.
pub fn escapes_root(target: &str) -> bool {
    let bytes = target.as_bytes();
    let mut depth: i32 = 0;

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'/' {
            if bytes.get(i + 1) == Some(&b'.') && bytes.get(i + 2) == Some(&b'.') {
                depth -= 1;
                if depth < 0 {
                    return true;
                }
                i += 3;
                continue;
            }
            depth += 1;
        }
        i += 1;
    }

    false
}
