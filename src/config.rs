//! Configuration module for the screenshot uploader.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! The uploader reads unprefixed variables, one per setting:
//! - `USER` sets `username`
//! - `HOST` sets `hostname`
//! - `PORT` sets `port` (default `22`)
//! - `RPATH` sets `remote_path`
//! - `RURL` sets `remote_url`
//! - `LPATH` sets `local_path`
//! - `ARCHIVE` sets `archive_path`
//! - `FILTER` sets `filter` (default matches macOS screenshot names)
//!
//! A variable that is set but empty is treated as unset, so it never
//! overrides a value from the settings file or a default.

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default filter: macOS "Screen Shot <date> at <time>.png" names.
pub const DEFAULT_FILTER: &str = r"^Screen.Shot.[0-9-]*.\w*.[0-9.]*.png";

/// Default SSH port.
pub const DEFAULT_PORT: u16 = 22;

/// Settings taken from the environment, one variable per field.
///
/// Values are kept as plain strings so a filter like `[a-z]` or a numeric
/// path is never reinterpreted. Only `PORT` is parsed.
#[derive(Debug, Default, Serialize)]
struct EnvOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remote_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remote_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    local_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    archive_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<String>,
}

impl EnvOverrides {
    /// Read `USER`, `HOST`, ... skipping unset and empty variables.
    fn from_env() -> Result<Self, figment::Error> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(raw) => Some(raw.parse::<u16>().map_err(|e| {
                figment::Error::from(format!("invalid PORT '{raw}': {e}"))
            })?),
            None => None,
        };

        Ok(Self {
            username: var("USER"),
            hostname: var("HOST"),
            port,
            remote_path: var("RPATH"),
            remote_url: var("RURL"),
            local_path: var("LPATH"),
            archive_path: var("ARCHIVE"),
            filter: var("FILTER"),
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Username on the remote server
    #[serde(default)]
    pub username: String,

    /// Hostname of the remote server
    #[serde(default)]
    pub hostname: String,

    /// SSH port on the remote server
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory on the remote server that receives uploads
    #[serde(default)]
    pub remote_path: String,

    /// Public URL prefix under which uploads are reachable
    #[serde(default)]
    pub remote_url: String,

    /// Local directory watched for new files
    #[serde(default)]
    pub local_path: PathBuf,

    /// Directory where uploaded files are kept instead of being deleted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_path: Option<PathBuf>,

    /// Regex matched against the base name of new files
    #[serde(default = "default_filter")]
    pub filter: String,

    /// What the watcher does when an upload fails
    #[serde(default)]
    pub on_error: ErrorPolicy,

    /// Desktop notification settings
    #[serde(default)]
    pub notification: NotificationConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Reaction of the watch loop to a failed upload.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop watching and exit with a non-zero status.
    #[default]
    Exit,
    /// Log the failure and keep watching.
    Continue,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NotificationConfig {
    /// Raise a desktop notification after each upload
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_notification_title")]
    pub title: String,

    #[serde(default = "default_notification_subtitle")]
    pub subtitle: String,

    #[serde(default = "default_notification_body")]
    pub body: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default level for all modules
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module level overrides, e.g. `watcher = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}
fn default_true() -> bool {
    true
}
fn default_notification_title() -> String {
    "Screen Upload".to_string()
}
fn default_notification_subtitle() -> String {
    "Upload finished".to_string()
}
fn default_notification_body() -> String {
    "The URL is now in your clipboard.".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            username: String::new(),
            hostname: String::new(),
            port: default_port(),
            remote_path: String::new(),
            remote_url: String::new(),
            local_path: PathBuf::new(),
            archive_path: None,
            filter: default_filter(),
            on_error: ErrorPolicy::default(),
            notification: NotificationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: default_notification_title(),
            subtitle: default_notification_subtitle(),
            body: default_notification_body(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources.
    ///
    /// `config_file` must exist when given. Without it the user settings
    /// file is used if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));

        match config_file {
            Some(path) if !path.exists() => {
                return Err(Box::new(figment::Error::from(format!(
                    "configuration file not found: {}",
                    path.display()
                ))));
            }
            Some(path) => figment = figment.merge(Toml::file(path)),
            None => {
                if let Some(path) = Self::default_config_path().filter(|p| p.exists()) {
                    figment = figment.merge(Toml::file(path));
                }
            }
        }

        let overrides = EnvOverrides::from_env().map_err(Box::new)?;
        figment
            .merge(Serialized::globals(overrides))
            .extract()
            .map_err(Box::new)
            .map(Self::normalized)
    }

    /// Load configuration from a specific file, without environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
            .map(Self::normalized)
    }

    /// Apply the empty-means-default rules that TOML files can also trip.
    fn normalized(mut self) -> Self {
        if self.filter.is_empty() {
            self.filter = default_filter();
        }
        if self
            .archive_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            self.archive_path = None;
        }
        self
    }

    /// Location of the per-user settings file.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("shotput").join("settings.toml"))
    }

    /// Archive directory, if archiving is enabled.
    pub fn archive_dir(&self) -> Option<&Path> {
        self.archive_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// `host:port` for the SSH connection.
    pub fn remote_address(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }

    /// Settings that are empty and will only fail once an upload runs.
    ///
    /// Loading never rejects these; callers decide whether to warn.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.username.is_empty() {
            warnings.push("username is empty (set USER)".to_string());
        }
        if self.hostname.is_empty() {
            warnings.push("hostname is empty (set HOST)".to_string());
        }
        if self.remote_path.is_empty() {
            warnings.push("remote path is empty (set RPATH)".to_string());
        }
        if self.remote_url.is_empty() {
            warnings.push("remote URL is empty (set RURL)".to_string());
        }
        if self.local_path.as_os_str().is_empty() {
            warnings.push("local path is empty (set LPATH)".to_string());
        }
        warnings
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file at `path`.
    pub fn init_config_file(
        path: impl AsRef<Path>,
        force: bool,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = path.as_ref().to_path_buf();

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        Settings::default().save(&config_path)?;
        Ok(config_path)
    }
}
