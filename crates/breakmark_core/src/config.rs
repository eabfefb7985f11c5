//! Runtime configuration for the breakpoint core.
//!
//! # Responsibility
//! - Resolve the shared breakpoint file location.
//! - Resolve marker group, sign name and priority.
//!
//! # Invariants
//! - Blank environment values are ignored, never treated as overrides.
//! - Resolution never panics; invalid numeric overrides are reported.

use crate::markers::MarkerStyle;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const STORE_PATH_ENV: &str = "BREAKMARK_STORE_PATH";
pub const SIGN_GROUP_ENV: &str = "BREAKMARK_SIGN_GROUP";
pub const SIGN_PRIORITY_ENV: &str = "BREAKMARK_SIGN_PRIORITY";

const APP_DIR_NAME: &str = "breakmark";
const STORE_FILE_NAME: &str = "saved-breakpoints";

/// Configuration resolution errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidPriority(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPriority(value) => write!(
                f,
                "invalid {SIGN_PRIORITY_ENV} value `{value}`; expected an integer"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub store_path: PathBuf,
    pub marker_style: MarkerStyle,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            marker_style: MarkerStyle::default(),
        }
    }
}

impl CoreConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self {
            store_path: default_store_path_from(&non_blank),
            marker_style: MarkerStyle::default(),
        };
        if let Some(path) = non_blank(STORE_PATH_ENV) {
            config.store_path = PathBuf::from(path);
        }
        if let Some(group) = non_blank(SIGN_GROUP_ENV) {
            config.marker_style.group = group;
        }
        if let Some(priority) = non_blank(SIGN_PRIORITY_ENV) {
            config.marker_style.priority = priority
                .parse::<i32>()
                .map_err(|_| ConfigError::InvalidPriority(priority))?;
        }
        Ok(config)
    }
}

/// Default shared breakpoint file:
/// `$XDG_CONFIG_HOME/breakmark/saved-breakpoints`, then `$HOME/.config/...`,
/// then the temp dir.
pub fn default_store_path() -> PathBuf {
    default_store_path_from(&|name: &str| {
        std::env::var(name)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

fn default_store_path_from(non_blank: &dyn Fn(&str) -> Option<String>) -> PathBuf {
    let config_root = non_blank("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| non_blank("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(std::env::temp_dir);
    config_root.join(APP_DIR_NAME).join(STORE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, SIGN_GROUP_ENV, SIGN_PRIORITY_ENV, STORE_PATH_ENV};
    use crate::markers::DEFAULT_MARKER_PRIORITY;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn resolve(vars: &[(&str, &str)]) -> Result<CoreConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CoreConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_follow_xdg_then_home() {
        let config = resolve(&[("XDG_CONFIG_HOME", "/xdg"), ("HOME", "/home/u")])
            .expect("resolve config");
        assert_eq!(
            config.store_path,
            PathBuf::from("/xdg/breakmark/saved-breakpoints")
        );

        let config = resolve(&[("XDG_CONFIG_HOME", "  "), ("HOME", "/home/u")])
            .expect("resolve config");
        assert_eq!(
            config.store_path,
            PathBuf::from("/home/u/.config/breakmark/saved-breakpoints")
        );
        assert_eq!(config.marker_style.priority, DEFAULT_MARKER_PRIORITY);
    }

    #[test]
    fn env_overrides_apply() {
        let config = resolve(&[
            (STORE_PATH_ENV, " /tmp/bp "),
            (SIGN_GROUP_ENV, "dbg"),
            (SIGN_PRIORITY_ENV, "42"),
        ])
        .expect("resolve config");
        assert_eq!(config.store_path, PathBuf::from("/tmp/bp"));
        assert_eq!(config.marker_style.group, "dbg");
        assert_eq!(config.marker_style.priority, 42);
    }

    #[test]
    fn invalid_priority_is_rejected() {
        let err = resolve(&[(SIGN_PRIORITY_ENV, "high")]).expect_err("must fail");
        assert_eq!(err, ConfigError::InvalidPriority("high".to_string()));
    }
}
