//! Runtime settings: endpoint, request timeout and retry bounds.
//!
//! Settings come from an optional TOML file; every key has a default, so an empty or
//! missing file is valid.
//!
//! ```toml
//! base_url = "https://poloniex.com/public"
//! request_timeout_secs = 30
//!
//! [retry]
//! max_attempts = 7
//! min_delay_ms = 1000
//! max_delay_ms = 2000
//! ```
//!
//! `CHART_DATA_BASE_URL`, when set, overrides `base_url`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use shared_utils::env::get_optional_env_var;
use thiserror::Error;
use tracing::error;

use crate::providers::poloniex::DEFAULT_BASE_URL;
use crate::retry::RetryPolicy;

pub const BASE_URL_ENV_VAR: &str = "CHART_DATA_BASE_URL";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub retry: RetrySettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetrySettings {
    /// Total attempts, the first one included.
    pub max_attempts: u32,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            retry: RetrySettings::default(),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 7,
            min_delay_ms: 1000,
            max_delay_ms: 2000,
        }
    }
}

impl Settings {
    /// Loads settings from `path` (or defaults when `None`), applies environment
    /// overrides and validates the result.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut settings = match path {
            Some(path) => Self::read(path)?,
            None => Self::default(),
        };
        settings.apply_env_overrides();
        settings.validate()?;
        Ok(settings)
    }

    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| {
            error!("Failed to read config file {}: {:?}", path.display(), source);
            SettingsError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|e| {
            error!("Failed to parse config file: {:?}", e);
            SettingsError::Parse(e)
        })
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(base_url) = get_optional_env_var(BASE_URL_ENV_VAR) {
            self.base_url = base_url;
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.request_timeout_secs == 0 {
            return Err(SettingsError::Invalid(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(SettingsError::Invalid(
                "retry.max_attempts must be at least 1".into(),
            ));
        }
        if self.retry.min_delay_ms > self.retry.max_delay_ms {
            return Err(SettingsError::Invalid(format!(
                "retry.min_delay_ms ({}) exceeds retry.max_delay_ms ({})",
                self.retry.min_delay_ms, self.retry.max_delay_ms
            )));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry.max_attempts,
            min_delay: Duration::from_millis(self.retry.min_delay_ms),
            max_delay: Duration::from_millis(self.retry.max_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.retry_policy(), RetryPolicy::default());
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let settings = Settings::from_toml_str(
            r#"
            request_timeout_secs = 5

            [retry]
            max_attempts = 3
            "#,
        )
        .unwrap();

        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.request_timeout_secs, 5);
        assert_eq!(settings.retry.max_attempts, 3);
        assert_eq!(settings.retry.min_delay_ms, 1000);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Settings::from_toml_str("timeout = 5"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn inverted_delay_bounds_fail_validation() {
        let mut settings = Settings::default();
        settings.retry.min_delay_ms = 3000;

        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn reads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "base_url = \"http://127.0.0.1:9/public\"").unwrap();

        let settings = Settings::read(file.path()).unwrap();

        assert_eq!(settings.base_url, "http://127.0.0.1:9/public");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Settings::read(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    fn load_with_base_url_var(value: Option<&str>) -> Settings {
        // SAFETY: every test touching the process environment is #[serial].
        unsafe {
            match value {
                Some(value) => std::env::set_var(BASE_URL_ENV_VAR, value),
                None => std::env::remove_var(BASE_URL_ENV_VAR),
            }
        }
        let settings = Settings::load(None);
        unsafe { std::env::remove_var(BASE_URL_ENV_VAR) };
        settings.unwrap()
    }

    #[test]
    #[serial]
    fn base_url_env_var_overrides_default() {
        let settings = load_with_base_url_var(Some("http://127.0.0.1:8080/public"));
        assert_eq!(settings.base_url, "http://127.0.0.1:8080/public");
    }

    #[test]
    #[serial]
    fn blank_base_url_env_var_is_ignored() {
        let settings = load_with_base_url_var(Some("   "));
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    #[serial]
    fn unset_base_url_env_var_keeps_default() {
        let settings = load_with_base_url_var(None);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }
}
