//! Configuration resolution for the Puffin server.
//!
//! Resolution runs once at startup:
//!
//! 1. start from the compiled-in default table ([`Settings::default`])
//! 2. overlay environment variables named exactly like a setting
//! 3. derive `VERSION`, `SERVER_NAME_FULL` and `LINKS`
//! 4. validate, warning about an insecure secret key
//!
//! The result is an immutable [`Config`] that is shared (usually through
//! [`crate::state::AppState`]) with every component that needs it.

mod settings;
pub mod version;

pub use settings::{cast_bool, Settings, DEFAULT_SECRET_KEY, SETTING_NAMES};
pub use version::{parse_describe, VersionInfo, DEFAULT_DESCRIBE_TIMEOUT};

use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigResult;

/// Server name used when `SERVER_NAME` is unset or empty.
pub const LOCALHOST: &str = "localhost";

/// Fully resolved, read-only process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default table with environment overrides applied
    pub settings: Settings,

    /// Release tag and commit of the running checkout
    pub version: VersionInfo,

    /// `SERVER_NAME`, or `localhost` when unset
    pub server_name_full: String,

    /// Parsed main-menu links, one token list per non-empty `LINK_n`
    pub links: Vec<Vec<String>>,
}

/// A configuration problem that does not stop the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `SECRET_KEY` was never overridden
    DefaultSecretKey,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::DefaultSecretKey => {
                write!(f, "No SECRET_KEY provided, using the default one")
            }
        }
    }
}

/// Builder for [`Config`] resolution.
#[derive(Debug, Clone)]
pub struct Resolver {
    repo_dir: Option<PathBuf>,
    describe_timeout: Duration,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            repo_dir: None,
            describe_timeout: DEFAULT_DESCRIBE_TIMEOUT,
        }
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory queried for version metadata (default: inherited working
    /// directory).
    pub fn with_repo_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.repo_dir = Some(dir.into());
        self
    }

    pub fn with_describe_timeout(mut self, limit: Duration) -> Self {
        self.describe_timeout = limit;
        self
    }

    /// Resolve against the process environment.
    pub async fn resolve_env(&self) -> ConfigResult<Config> {
        let settings = Settings::from_env()?;
        Ok(self.finish(settings).await)
    }

    /// Resolve against an explicit set of environment variables.
    pub async fn resolve<I>(&self, vars: I) -> ConfigResult<Config>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let settings = Settings::from_vars(vars)?;
        Ok(self.finish(settings).await)
    }

    async fn finish(&self, settings: Settings) -> Config {
        let version = version::get_version(self.repo_dir.as_deref(), self.describe_timeout).await;
        let config = Config::from_parts(settings, version);

        for warning in config.validate() {
            tracing::warn!("{}", warning);
        }

        tracing::info!(
            version = ?config.version.display(),
            server_name = %config.server_name_full,
            links = config.links.len(),
            "Configuration resolved"
        );

        config
    }
}

impl Config {
    /// Resolve configuration from the process environment and the current
    /// working directory.
    ///
    /// Fails only when a typed override is malformed (e.g. `PORT=abc`).
    pub async fn init() -> ConfigResult<Self> {
        Resolver::new().resolve_env().await
    }

    /// Resolve configuration from explicit variables and checkout directory.
    pub async fn resolve<I>(vars: I, repo_dir: &Path) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Resolver::new().with_repo_dir(repo_dir).resolve(vars).await
    }

    /// Assemble a configuration from base settings and version info,
    /// computing the derived settings. Performs no I/O and no logging.
    pub fn from_parts(settings: Settings, version: VersionInfo) -> Self {
        let server_name_full = server_name_full(&settings);
        let links = parse_links(&settings);
        Self {
            settings,
            version,
            server_name_full,
            links,
        }
    }

    /// Non-fatal configuration problems.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        if self.settings.uses_default_secret() {
            warnings.push(ConfigWarning::DefaultSecretKey);
        }
        warnings
    }

    /// Release version for display, e.g. in page footers.
    pub fn version_string(&self) -> Option<String> {
        self.version.display()
    }

    /// Name → value view of every setting plus `VERSION`,
    /// `SERVER_NAME_FULL` and `LINKS`.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = match serde_json::to_value(&self.settings) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                tracing::warn!("Settings did not serialize to an object");
                Map::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize settings");
                Map::new()
            }
        };
        map.insert(
            "VERSION".to_string(),
            json!([self.version.tag, self.version.commit]),
        );
        map.insert(
            "SERVER_NAME_FULL".to_string(),
            Value::String(self.server_name_full.clone()),
        );
        map.insert("LINKS".to_string(), json!(self.links));
        map
    }
}

fn server_name_full(settings: &Settings) -> String {
    match settings.server_name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => LOCALHOST.to_string(),
    }
}

fn parse_links(settings: &Settings) -> Vec<Vec<String>> {
    settings
        .link_values()
        .into_iter()
        .flatten()
        .filter(|value| !value.is_empty())
        .map(|value| value.split_whitespace().map(str::to_string).collect())
        .collect()
}
