use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "waypoint", about = "Static file server with peer redirects")]
struct Cli {
    /// Directory whose files are served to clients.
    root_dir: Option<PathBuf>,

    /// File listing peer servers as whitespace-separated
    /// `target host port` triples.
    peers_file: Option<PathBuf>,

    /// Port to listen on.
    #[arg(short, long)]
    port: Option<u16>,

    /// YAML file supplying any of the settings above. Values given on the
    /// command line take precedence over the file.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Process configuration, fixed at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Root of the served directory tree.
    pub root_dir: PathBuf,
    /// Path of the peer registry file.
    pub peers_file: PathBuf,
    /// Listening port.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_cli(Cli::parse())
    }

    fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let mut cfg = match &cli.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                serde_yaml::from_str(&text)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => Config {
                root_dir: cli.root_dir.clone().context("served directory argument missing")?,
                peers_file: cli.peers_file.clone().context("peer list argument missing")?,
                port: default_port(),
            },
        };

        if let Some(root_dir) = cli.root_dir {
            cfg.root_dir = root_dir;
        }
        if let Some(peers_file) = cli.peers_file {
            cfg.peers_file = peers_file;
        }
        if let Some(port) = cli.port {
            cfg.port = port;
        }

        Ok(cfg)
    }

    /// Checks the configured paths once, before the server starts.
    pub fn validate(&self) -> anyhow::Result<()> {
        let meta = std::fs::metadata(&self.root_dir)
            .with_context(|| format!("served directory {}", self.root_dir.display()))?;
        anyhow::ensure!(
            meta.is_dir(),
            "served directory {} is not a directory",
            self.root_dir.display()
        );

        let meta = std::fs::metadata(&self.peers_file)
            .with_context(|| format!("peer list {}", self.peers_file.display()))?;
        anyhow::ensure!(
            meta.is_file(),
            "peer list {} is not a regular file",
            self.peers_file.display()
        );

        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
