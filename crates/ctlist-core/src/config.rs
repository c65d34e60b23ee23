//! Generator configuration.
//!
//! Layers, lowest precedence first: defaults, YAML file, environment,
//! explicit overrides (CLI flags).
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `CTLIST_LOG_LIST` | Log list JSON path (default: `log_list.json`) |
//! | `CTLIST_SIGNATURE` | Detached signature path (default: `log_list.sig`) |
//! | `CTLIST_PUBLIC_KEY` | Signing key, SPKI PEM (default: `log_list_pubkey.pem`) |
//! | `CTLIST_OUTPUT` | Output file (default: stdout) |
//! | `CTLIST_LOG_TYPE` | Element type of the table (default: `sct::Log`) |
//! | `CTLIST_NOW` | Unix time used for disqualification checks (default: wall clock) |

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::emit::DEFAULT_LOG_TYPE;
use crate::error::{CtListError, CtListResult};

/// Configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateConfig {
    /// Log list JSON.
    #[serde(default = "default_log_list")]
    pub log_list: PathBuf,

    /// Detached signature over the log list.
    #[serde(default = "default_signature")]
    pub signature: PathBuf,

    /// Public key the signature must verify against (SPKI PEM).
    #[serde(default = "default_public_key")]
    pub public_key: PathBuf,

    /// Output file; stdout when unset.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Rust path of the generated table's element type.
    #[serde(default = "default_log_type")]
    pub log_type: String,

    /// Fixed Unix time for disqualification checks; wall clock when unset.
    #[serde(default)]
    pub now: Option<i64>,
}

fn default_log_list() -> PathBuf {
    PathBuf::from("log_list.json")
}

fn default_signature() -> PathBuf {
    PathBuf::from("log_list.sig")
}

fn default_public_key() -> PathBuf {
    PathBuf::from("log_list_pubkey.pem")
}

fn default_log_type() -> String {
    DEFAULT_LOG_TYPE.to_string()
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            log_list: default_log_list(),
            signature: default_signature(),
            public_key: default_public_key(),
            output: None,
            log_type: default_log_type(),
            now: None,
        }
    }
}

impl GenerateConfig {
    /// Load from a YAML file. Missing keys take their defaults.
    pub fn from_yaml_file(path: &Path) -> CtListResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CtListError::Config {
            message: format!("failed to read config {}: {e}", path.display()),
        })?;
        serde_yaml::from_str(&text).map_err(|e| CtListError::Config {
            message: format!("invalid config {}: {e}", path.display()),
        })
    }

    /// Overlay `CTLIST_*` environment variables.
    pub fn with_env(self) -> CtListResult<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay variables obtained from `lookup`.
    pub fn with_env_from<F>(mut self, lookup: F) -> CtListResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("CTLIST_LOG_LIST") {
            self.log_list = v.into();
        }
        if let Some(v) = lookup("CTLIST_SIGNATURE") {
            self.signature = v.into();
        }
        if let Some(v) = lookup("CTLIST_PUBLIC_KEY") {
            self.public_key = v.into();
        }
        if let Some(v) = lookup("CTLIST_OUTPUT") {
            self.output = Some(v.into());
        }
        if let Some(v) = lookup("CTLIST_LOG_TYPE") {
            self.log_type = v;
        }
        if let Some(v) = lookup("CTLIST_NOW") {
            let now = v.trim().parse().map_err(|e| CtListError::Config {
                message: format!("CTLIST_NOW must be a Unix timestamp, got {v:?}: {e}"),
            })?;
            self.now = Some(now);
        }
        Ok(self)
    }

    pub fn with_log_list(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_list = path.into();
        self
    }

    pub fn with_signature(mut self, path: impl Into<PathBuf>) -> Self {
        self.signature = path.into();
        self
    }

    pub fn with_public_key(mut self, path: impl Into<PathBuf>) -> Self {
        self.public_key = path.into();
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn with_log_type(mut self, log_type: impl Into<String>) -> Self {
        self.log_type = log_type.into();
        self
    }

    pub fn with_now(mut self, now: i64) -> Self {
        self.now = Some(now);
        self
    }
}
