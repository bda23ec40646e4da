//! Configuration for the inventory client.
//!
//! TOML profiles naming backend URLs, merged with `INVENTARIO_`-prefixed
//! environment variables, and translated to `inventario_core::ClientConfig`.
//! CLI flags are layered on top by the binary.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use inventario_core::{ClientConfig, DEFAULT_API_URL};

const ENV_PREFIX: &str = "INVENTARIO_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{0}' not found in config")]
    UnknownProfile(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// Request timeout in seconds. Absent means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

/// A named backend profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// API root, e.g. "http://192.168.5.59:5010/api".
    pub api_url: String,

    /// Override the default timeout (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "inventario", "inventario").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("inventario");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to core config ──────────────────────────────────────

/// Build a `ClientConfig` from a profile, falling back to `defaults`
/// for anything the profile leaves out.
pub fn profile_to_client_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let url = validate_api_url(&profile.api_url)?;
    let timeout = profile
        .timeout
        .or(defaults.timeout)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    Ok(ClientConfig::new(url).with_timeout(timeout))
}

/// Resolve the client config for `profile_name`, or the default profile.
///
/// A named profile must exist. When no name is given and the default
/// profile is not defined, the built-in backend URL is used.
pub fn resolve_client_config(
    cfg: &Config,
    profile_name: Option<&str>,
) -> Result<ClientConfig, ConfigError> {
    if let Some(name) = profile_name {
        let profile = cfg
            .profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile(name.into()))?;
        return profile_to_client_config(profile, &cfg.defaults);
    }

    let default = cfg
        .default_profile
        .as_deref()
        .and_then(|name| cfg.profiles.get(name));
    match default {
        Some(profile) => profile_to_client_config(profile, &cfg.defaults),
        None => Ok(ClientConfig::new(DEFAULT_API_URL)
            .with_timeout(cfg.defaults.timeout.filter(|s| *s > 0).map(Duration::from_secs))),
    }
}

/// Check that `raw` is an absolute http(s) URL and return it unchanged.
pub fn validate_api_url(raw: &str) -> Result<String, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(raw.to_owned()),
        other => Err(ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("expected http or https, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn profile(url: &str, timeout: Option<u64>) -> Profile {
        Profile {
            api_url: url.into(),
            timeout,
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert!(cfg.profiles.is_empty());
        assert_eq!(cfg.defaults.timeout, None);
    }

    #[test]
    fn toml_profiles_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "almacen"

[defaults]
timeout = 15

[profiles.almacen]
api_url = "http://192.168.5.59:5010/api"
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("almacen"));
        assert_eq!(cfg.defaults.timeout, Some(15));
        assert_eq!(
            cfg.profiles["almacen"].api_url,
            "http://192.168.5.59:5010/api"
        );
    }

    #[test]
    fn save_then_load_preserves_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles
            .insert("default".into(), profile("http://localhost:5010/api", Some(5)));
        save_config_to(&cfg, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn profile_timeout_overrides_default() {
        let defaults = Defaults { timeout: Some(30) };

        let own = profile_to_client_config(&profile("http://h/api", Some(5)), &defaults).unwrap();
        assert_eq!(own.timeout, Some(Duration::from_secs(5)));

        let inherited = profile_to_client_config(&profile("http://h/api", None), &defaults).unwrap();
        assert_eq!(inherited.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn zero_timeout_means_disabled() {
        let cfg = profile_to_client_config(&profile("http://h/api", Some(0)), &Defaults::default())
            .unwrap();
        assert_eq!(cfg.timeout, None);
    }

    #[test]
    fn invalid_urls_are_rejected() {
        assert!(matches!(
            validate_api_url("not a url"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(matches!(
            validate_api_url("ftp://host/api"),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn named_profile_must_exist() {
        let err = resolve_client_config(&Config::default(), Some("oficina")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile(ref name) if name == "oficina"));
    }

    #[test]
    fn missing_default_profile_falls_back_to_builtin_url() {
        let cfg = resolve_client_config(&Config::default(), None).unwrap();
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.timeout, None);
    }
}
