//! Server configuration.
//!
//! User-level config: `~/.ies-lsp/config.yaml`
//! Project-level config: `.ies-lsp/config.yaml` (safe to commit)
//!
//! Resolution: defaults → user config → project config → env vars.
//! Command-line flags are applied on top by `main`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Env var naming the knowledge base JSON file.
pub const RECORDS_ENV: &str = "IES_LSP_RECORDS";
/// Env var holding a tracing filter directive.
pub const LOG_ENV: &str = "IES_LSP_LOG";

/// Default tracing directive.
pub const DEFAULT_LOG_FILTER: &str = "ies_lsp=info";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Knowledge base JSON file. The bundled record set is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<PathBuf>,
    /// Tracing filter directive, e.g. `ies_lsp=debug`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

/// Path to `~/.ies-lsp/`.
fn dirs_path() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|p| PathBuf::from(p).join(".ies-lsp"))
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME")
            .ok()
            .map(|p| PathBuf::from(p).join(".ies-lsp"))
    }
}

impl Config {
    /// Load config from disk and environment. Never fails: unreadable or
    /// malformed files are skipped, and each skip is returned as a warning
    /// for the caller to log once logging is up.
    pub fn load() -> (Self, Vec<String>) {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        let user = dirs_path().map(|dir| dir.join("config.yaml"));
        let project = PathBuf::from(".ies-lsp/config.yaml");
        for path in user.iter().chain(std::iter::once(&project)) {
            match Self::from_file(path) {
                Ok(Some(layer)) => config.merge(layer),
                Ok(None) => {}
                Err(e) => warnings.push(e),
            }
        }

        config.merge(Self::from_env());
        (config, warnings)
    }

    /// Parse a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Read one config file. `Ok(None)` when it does not exist.
    pub fn from_file(path: &Path) -> Result<Option<Self>, String> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(format!("reading config {}: {e}", path.display())),
        };
        Self::from_yaml(&content)
            .map(Some)
            .map_err(|e| format!("ignoring malformed config {}: {e}", path.display()))
    }

    fn from_env() -> Self {
        Self {
            records: std::env::var_os(RECORDS_ENV).map(PathBuf::from),
            log_filter: std::env::var(LOG_ENV).ok(),
        }
    }

    /// Overlay the fields `other` sets.
    pub fn merge(&mut self, other: Config) {
        if other.records.is_some() {
            self.records = other.records;
        }
        if other.log_filter.is_some() {
            self.log_filter = other.log_filter;
        }
    }

    /// The tracing directive to use.
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
