//! Configuration loading for the jira client.
//!
//! The configuration is read once at startup from a YAML file and a handful of
//! environment variables, then passed around read-only.

use std::fs::File;
use std::str::FromStr;

use itertools::Itertools;
use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Default path for the configuration file
const DEFAULT_CONFIG_PATH: &str = "~/.config/.jira/.config.yml";

/// Environment variable overriding the configuration file path
pub const CONFIG_FILE_ENV: &str = "JIRA_CONFIG_FILE";
/// Environment variable holding the API token or personal access token
pub const API_TOKEN_ENV: &str = "JIRA_API_TOKEN";
/// Environment variable overriding `auth_type`
pub const AUTH_TYPE_ENV: &str = "JIRA_AUTH_TYPE";

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    #[default]
    Basic,
    Bearer,
}

impl FromStr for AuthType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "bearer" => Ok(Self::Bearer),
            _ => Err(Error::UnknownAuthType(value.to_string())),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub key: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub auth_type: AuthType,
    #[serde(skip)]
    pub api_token: Option<String>,
}

impl Config {
    /// Loads, overrides from the environment, and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if an environment
    /// override is invalid, if `server` (or `login`, for basic auth) is unset,
    /// or if no API token is available.
    pub fn load(config_path_arg: Option<&str>) -> Result<Self> {
        let path = get_config_path(config_path_arg, std::env::var(CONFIG_FILE_ENV).ok());
        debug!("Config path: `{path}`");

        let config = Self::from_file(&path)?.with_environment(
            std::env::var(API_TOKEN_ENV).ok(),
            std::env::var(AUTH_TYPE_ENV).ok(),
        )?;
        config.validate(&path)?;

        Ok(config)
    }

    /// Parses the YAML file at `path` without applying any override.
    pub fn from_file(path: &str) -> Result<Self> {
        let reader = File::open(path)
            .map_err(|e| Error::io_error("config".to_string(), path.to_string(), e))?;

        serde_yaml::from_reader(reader).map_err(|e| Error::yaml_error(path.to_string(), e))
    }

    /// Applies the token and auth type taken from the environment.
    pub fn with_environment(
        mut self,
        api_token: Option<String>,
        auth_type: Option<String>,
    ) -> Result<Self> {
        self.api_token = api_token.filter(|token| !token.is_empty());

        if let Some(auth_type) = auth_type.filter(|value| !value.trim().is_empty()) {
            self.auth_type = auth_type.parse()?;
        }

        Ok(self)
    }

    /// Checks the settings a remote call cannot do without.
    pub fn validate(&self, path: &str) -> Result<()> {
        let mut missing = Vec::new();
        if self.server.trim().is_empty() {
            missing.push("`server`");
        }
        if self.auth_type == AuthType::Basic && self.login.trim().is_empty() {
            missing.push("`login`");
        }

        if !missing.is_empty() {
            return Err(Error::IncompleteConfig {
                path: path.to_string(),
                missing: missing.iter().join(", "),
            });
        }

        if self.api_token.as_deref().map_or(true, |token| token.trim().is_empty()) {
            return Err(Error::MissingApiToken(API_TOKEN_ENV));
        }

        Ok(())
    }

    /// The configured default project key, if any.
    pub fn project_key(&self) -> Option<&str> {
        let key = self.project.key.trim();
        (!key.is_empty()).then_some(key)
    }
}

/// Resolves the configuration file path.
///
/// An explicit path wins over the environment, which wins over the default.
/// Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use jira_core::config::get_config_path;
///
/// let custom_path = get_config_path(Some("/path/to/config.yml"), None);
/// assert_eq!(custom_path, "/path/to/config.yml");
/// ```
pub fn get_config_path(config_path_arg: Option<&str>, env_path: Option<String>) -> String {
    let config_path = match (config_path_arg, env_path.as_deref()) {
        (Some(path), _) => path,
        (None, Some(path)) if !path.is_empty() => path,
        _ => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}
