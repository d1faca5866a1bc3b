//! Command-line and environment configuration.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use directories::ProjectDirs;

use applicants_core::StoreUrl;

use crate::store::CliStore;

/// Where client commands find their records.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Store URL: the REST API (http://, https://) or a data directory (file://)
    #[arg(long = "store", env = "APPLICANTS_URL", default_value = "http://localhost:8000")]
    pub url: String,

    /// Give up on HTTP requests after this many seconds
    #[arg(long, env = "APPLICANTS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl StoreArgs {
    pub fn store_url(&self) -> Result<StoreUrl> {
        StoreUrl::new(&self.url).context("Invalid store URL")
    }

    pub fn open(&self) -> Result<CliStore> {
        let url = self.store_url()?;
        CliStore::open(&url, self.timeout_secs.map(Duration::from_secs))
    }
}

/// Listener and storage settings for `applicants serve`.
#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(long, env = "APPLICANTS_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "APPLICANTS_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Root directory of the file store
    #[arg(long, env = "APPLICANTS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory served under /images
    #[arg(long, env = "APPLICANTS_IMAGES_DIR")]
    pub images_dir: Option<PathBuf>,
}

/// Resolved server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub data_dir: PathBuf,
    pub images_dir: PathBuf,
}

impl ServerArgs {
    pub fn resolve(self) -> Result<ServerConfig> {
        let data_dir = match self.data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        let images_dir = self
            .images_dir
            .unwrap_or_else(|| data_dir.join("images"));

        Ok(ServerConfig {
            addr: SocketAddr::new(self.bind, self.port),
            data_dir,
            images_dir,
        })
    }
}

/// Platform data directory, e.g. `~/.local/share/applicants` on Linux.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "applicants")
        .context("Could not determine a data directory; pass --data-dir")?;
    Ok(dirs.data_dir().to_path_buf())
}
