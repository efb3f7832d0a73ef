//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/slopgraph/config.toml` (XDG) or platform config dir
//! 2. Project config: `.slopgraph.toml`
//! 3. Environment variables: `SLOPGRAPH_*`
//!
//! # Intended Usage
//!
//! ```toml
//! [graph]
//! endpoint = "https://slop.at"
//! base = "https://slop.at"
//!
//! [repo]
//! github_repo = "alice/slops"
//!
//! [author]
//! username = "alice"
//! name = "Alice Example"
//!
//! [sync]
//! connect_timeout_secs = 5
//! read_timeout_secs = 30
//! ```
//!
//! The loaded value is passed by reference into the publish service and sync
//! client; nothing re-reads configuration after startup.

use std::ops::Deref;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub repo: RepoConfig,
    #[serde(default)]
    pub author: AuthorConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Remote triple store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    /// SPARQL endpoint base URL. Queries go to `{endpoint}/query`,
    /// updates to `{endpoint}/update`.
    pub endpoint: String,
    /// Namespace base for minted entity and graph URIs.
    pub base: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://slop.at".to_string(),
            base: "https://slop.at".to_string(),
        }
    }
}

/// Slop repository coordinates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoConfig {
    /// GitHub repository in `org/name` form. Unset until setup_slop_repo
    /// has been run and the coordinates recorded here.
    pub github_repo: Option<String>,
}

/// Publishing author identity.
///
/// Fields left unset fall back to the global git configuration
/// (`user.email` local part and `user.name`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorConfig {
    /// Username used in named-graph URIs.
    pub username: Option<String>,
    /// Display name recorded as the document creator.
    pub name: Option<String>,
}

/// Sync client timeout policy.
///
/// The connect timeout is short so a dead endpoint fails fast; the read
/// timeout is longer so large updates can complete.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            read_timeout_secs: 30,
        }
    }
}

/// NER engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// HTTP endpoint of the extraction service.
    pub endpoint: String,
    /// Confidence threshold passed to the engine (0.0-1.0).
    pub threshold: f64,
    /// Timeout for one extraction call, in seconds.
    pub timeout_secs: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8077/extract".to_string(),
            threshold: 0.5,
            timeout_secs: 60,
        }
    }
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        let user_config = Self::user_config_path();

        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(user_config))
            // Layer 2: Project config
            .merge(Toml::file(".slopgraph.toml"))
            // Layer 3: Environment variables (highest priority); double
            // underscore separates path segments so keys like github_repo
            // survive (SLOPGRAPH_REPO__GITHUB_REPO)
            .merge(Env::prefixed("SLOPGRAPH_").split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// User config path: ~/.config/slopgraph/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("slopgraph").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("slopgraph").join("config.toml"))
            .unwrap_or_default()
    }

    /// Directory under which slop repositories are cloned:
    /// `~/.slopgraph/{org}/{repo}`.
    pub fn data_dir() -> PathBuf {
        dirs::home_dir().unwrap_or_default().join(".slopgraph")
    }

    /// Local path of the configured slop repository, if any.
    pub fn repo_path(&self) -> Option<PathBuf> {
        self.repo
            .github_repo
            .as_ref()
            .map(|coords| Self::data_dir().join(coords))
    }

    /// Author username for graph URIs, falling back to the git identity.
    pub fn author_username(&self) -> Option<String> {
        self.author
            .username
            .clone()
            .or_else(|| git_config_value("user.email").map(|email| local_part(&email)))
    }

    /// Author display name, falling back to the git identity.
    pub fn author_name(&self) -> Option<String> {
        self.author
            .name
            .clone()
            .or_else(|| git_config_value("user.name"))
    }
}

/// Read a value from the default (global) git configuration.
fn git_config_value(key: &str) -> Option<String> {
    let config = git2::Config::open_default().ok()?;
    let value = config.get_string(key).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn local_part(email: &str) -> String {
    match email.split_once('@') {
        Some((local, _)) => local.to_string(),
        None => email.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.graph.endpoint, "https://slop.at");
        assert_eq!(config.sync.connect_timeout_secs, 5);
        assert_eq!(config.sync.read_timeout_secs, 30);
        assert!(config.repo.github_repo.is_none());
        assert!(config.repo_path().is_none());
    }

    #[test]
    fn test_repo_path_joins_coordinates() {
        let config = Config {
            repo: RepoConfig {
                github_repo: Some("alice/slops".to_string()),
            },
            ..Config::default()
        };
        let path = config.repo_path().unwrap();
        assert!(path.ends_with("alice/slops"));
    }

    #[test]
    fn test_local_part() {
        assert_eq!(local_part("alice@example.com"), "alice");
        assert_eq!(local_part("no-at-sign"), "no-at-sign");
    }
}
