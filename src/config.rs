use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::Deserialize;

use crate::http::site::DEFAULT_IDLE_TIMEOUT_SECS;
use crate::http::writer::DEFAULT_CHUNK_SIZE;

const DEFAULT_CONFIG_PATH: &str = "triton.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub doc_root: PathBuf,
    pub chunk_size: usize,
    /// Extra extension → content type entries, e.g. `.wasm: application/wasm`
    pub mime_types: HashMap<String, String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            doc_root: PathBuf::from("docroot"),
            chunk_size: DEFAULT_CHUNK_SIZE,
            mime_types: HashMap::new(),
        }
    }
}

impl Config {
    /// Loads the YAML file named by `CONFIG` (default `triton.yaml`) and
    /// applies the `LISTEN` and `DOC_ROOT` overrides.
    ///
    /// A missing file is not an error; every field has a default.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut cfg = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = addr;
        }
        if let Ok(root) = std::env::var("DOC_ROOT") {
            cfg.static_files.doc_root = PathBuf::from(root);
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Checks the settings the server cannot start without.
    pub fn validate(&self) -> anyhow::Result<()> {
        let root = &self.static_files.doc_root;
        let meta = std::fs::metadata(root)
            .with_context(|| format!("document root {} is not accessible", root.display()))?;
        if !meta.is_dir() {
            bail!("document root {} is not a directory", root.display());
        }
        if self.server.idle_timeout_secs == 0 {
            bail!("idle_timeout_secs must be greater than zero");
        }
        if self.static_files.chunk_size == 0 {
            bail!("chunk_size must be greater than zero");
        }
        Ok(())
    }
}
