//! Static table of the peer servers holding files this one does not.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use tokio::fs;
use tracing::warn;
use url::Url;

/// Address of a peer server, as listed in the registry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerAddr {
    pub host: String,
    pub port: u16,
}

/// Mapping from exact request target to the peer serving it.
///
/// Immutable after load; safe to share across connections.
#[derive(Debug, Clone, Default)]
pub struct PeerRegistry {
    entries: HashMap<String, PeerAddr>,
}

impl PeerRegistry {
    /// Reads and parses the registry file.
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .await
            .with_context(|| format!("reading peer list {}", path.display()))?;

        Ok(Self::parse(&text))
    }

    /// Parses whitespace-separated `target host port` triples.
    ///
    /// The first entry for a target wins. An entry whose port does not parse
    /// or whose host does not form a usable URL is skipped; a trailing
    /// incomplete triple stops the load.
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();
        let mut tokens = text.split_whitespace();

        while let Some(target) = tokens.next() {
            let (Some(host), Some(port)) = (tokens.next(), tokens.next()) else {
                warn!("Peer list ends with an incomplete entry for {}", target);
                break;
            };

            let Ok(port) = port.parse::<u16>() else {
                warn!("Skipping peer entry for {}: bad port {:?}", target, port);
                continue;
            };
            if Url::parse(&format!("http://{}:{}/", host, port)).is_err() {
                warn!("Skipping peer entry for {}: bad host {:?}", target, host);
                continue;
            }

            entries
                .entry(target.to_string())
                .or_insert_with(|| PeerAddr { host: host.to_string(), port });
        }

        Self { entries }
    }

    /// Looks up the peer holding `target`. Targets are compared as exact
    /// strings, with no normalization on either side.
    pub fn lookup(&self, target: &str) -> Option<&PeerAddr> {
        self.entries.get(target)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
