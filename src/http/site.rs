use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use crate::config::Config;
use crate::http::mime::MimeTypes;
use crate::http::resolver;
use crate::http::writer::DEFAULT_CHUNK_SIZE;

/// Seconds a connection may stay idle before it is closed.
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 5;

/// Read-only settings shared by every connection of a server.
#[derive(Debug, Clone)]
pub struct Site {
    /// Absolute, normalized document root
    pub doc_root: PathBuf,
    pub mime: MimeTypes,
    /// How long a connection may sit without delivering a full request
    pub idle_timeout: Duration,
    /// Body streaming chunk size in bytes
    pub chunk_size: usize,
}

impl Site {
    pub fn new(doc_root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let doc_root = doc_root.into();
        let doc_root = std::path::absolute(&doc_root)
            .with_context(|| format!("resolving document root {}", doc_root.display()))?;

        Ok(Self {
            doc_root: resolver::normalize(&doc_root),
            mime: MimeTypes::default(),
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            chunk_size: DEFAULT_CHUNK_SIZE,
        })
    }

    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let mut site = Self::new(&cfg.static_files.doc_root)?;
        site.mime = MimeTypes::with_overrides(&cfg.static_files.mime_types);
        site.idle_timeout = Duration::from_secs(cfg.server.idle_timeout_secs);
        site.chunk_size = cfg.static_files.chunk_size;
        Ok(site)
    }

    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}
