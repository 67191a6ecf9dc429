//! Runtime configuration for the tracker.
//!
//! Defaults match the upload rules of the task service: 10 MB per file and
//! PDF, DOC, DOCX or TXT content. Environment variables overlay the
//! defaults:
//!
//! - `TASKMASTER_UPLOAD_DIR`: directory for submitted files
//! - `TASKMASTER_MAX_UPLOAD_BYTES`: upload size limit in bytes
//!
//! # Examples
//!
//! ```
//! use taskmaster::config::TrackerConfig;
//!
//! let config = TrackerConfig::from_lookup(|key| match key {
//!     "TASKMASTER_MAX_UPLOAD_BYTES" => Some("2048".to_owned()),
//!     _ => None,
//! })
//! .expect("valid configuration");
//! assert_eq!(config.upload_policy.max_bytes, 2048);
//! assert_eq!(config.upload_dir.as_str(), "uploads");
//! ```

use crate::task::domain::UploadPolicy;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Environment variable naming the upload directory.
pub const UPLOAD_DIR_ENV: &str = "TASKMASTER_UPLOAD_DIR";
/// Environment variable holding the upload size limit in bytes.
pub const MAX_UPLOAD_BYTES_ENV: &str = "TASKMASTER_MAX_UPLOAD_BYTES";
/// Upload directory used when none is configured.
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// Parse failure description.
        reason: String,
    },
}

/// Tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Restrictions applied to submission uploads.
    pub upload_policy: UploadPolicy,
    /// Directory holding submitted files.
    pub upload_dir: Utf8PathBuf,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            upload_policy: UploadPolicy::default(),
            upload_dir: Utf8PathBuf::from(DEFAULT_UPLOAD_DIR),
        }
    }
}

impl TrackerConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through a variable lookup function.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = read(UPLOAD_DIR_ENV) {
            config.upload_dir = Utf8PathBuf::from(dir.trim());
        }
        if let Some(raw) = read(MAX_UPLOAD_BYTES_ENV) {
            let max_bytes = raw
                .trim()
                .parse::<u64>()
                .map_err(|err| ConfigError::InvalidValue {
                    key: MAX_UPLOAD_BYTES_ENV,
                    value: raw.clone(),
                    reason: err.to_string(),
                })?;
            config.upload_policy = config.upload_policy.with_max_bytes(max_bytes);
        }

        tracing::debug!(
            upload_dir = %config.upload_dir,
            max_upload_bytes = config.upload_policy.max_bytes,
            "tracker configuration loaded"
        );
        Ok(config)
    }
}
