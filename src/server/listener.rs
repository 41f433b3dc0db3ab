use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::route::{PeerRegistry, Router};

/// Loads the peer registry, binds the listening socket and serves
/// connections one at a time: a connection is driven to completion before
/// the next accept, so responses keep strict arrival order.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let registry = PeerRegistry::load(&cfg.peers_file).await?;
    info!(
        "Loaded {} peer entries from {}",
        registry.len(),
        cfg.peers_file.display()
    );

    let router = Arc::new(Router::new(cfg.root_dir.clone(), registry)?);

    let addr = cfg.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let mut conn = Connection::new(socket, Arc::clone(&router));
        if let Err(e) = conn.run().await {
            error!("Connection error from {}: {}", peer, e);
        }
    }
}
