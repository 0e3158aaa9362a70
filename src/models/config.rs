use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Slack on top of the image limit for multipart boundaries and text fields.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Server configuration loaded from an optional config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: String,

    /// Largest accepted image upload, in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServerConfig {
    /// Load from `CONFIG_FILE` (if set), then apply `BIND_ADDR` and
    /// `MAX_UPLOAD_BYTES` overrides.
    pub fn from_env() -> Self {
        let config = match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load_from_file(Path::new(&path)),
            Err(_) => Self::default(),
        };
        config.with_overrides(
            std::env::var("BIND_ADDR").ok(),
            std::env::var("MAX_UPLOAD_BYTES").ok(),
        )
    }

    /// Read a YAML file, falling back to defaults if it is missing or invalid.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        bind_addr = %config.bind_addr,
                        max_upload_bytes = config.max_upload_bytes,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Apply raw override values as read from the environment.
    ///
    /// An unparsable upload limit is ignored with a warning.
    pub fn with_overrides(
        mut self,
        bind_addr: Option<String>,
        max_upload_bytes: Option<String>,
    ) -> Self {
        if let Some(addr) = bind_addr {
            self.bind_addr = addr;
        }
        if let Some(raw) = max_upload_bytes {
            match raw.trim().parse::<usize>() {
                Ok(bytes) => self.max_upload_bytes = bytes,
                Err(e) => {
                    tracing::warn!(%e, value = %raw, "Ignoring invalid MAX_UPLOAD_BYTES");
                }
            }
        }
        self
    }

    /// Limit applied to the whole request body.
    pub fn body_limit_bytes(&self) -> usize {
        self.max_upload_bytes
            .saturating_add(MULTIPART_OVERHEAD_BYTES)
    }
}
