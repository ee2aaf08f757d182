//! Runtime configuration from `CARDIORISK_*` environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `CARDIORISK_MODEL_PATH` | `models` |
//! | `CARDIORISK_ALLOW_UNSIGNED_MODELS` | `false` |
//! | `CARDIORISK_MODEL_PUBKEY_B64` | unset |
//! | `CARDIORISK_MODEL_PUBKEY_B64_FILE` | unset |
//! | `CARDIORISK_LOG_MODE` | `auto` |
//! | `CARDIORISK_LOG_FILE` | `cardiorisk.log` |
//!
//! `CARDIORISK_SANITIZE_MAX_BYTES` is read by the log sanitizer directly.

use std::path::PathBuf;

use ed25519_dalek::VerifyingKey;

use crate::adapters::logistic::{ModelLoader, SignaturePolicy};
use crate::CardioRiskError;

const DEFAULT_MODEL_PATH: &str = "models";
const DEFAULT_LOG_FILE: &str = "cardiorisk.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// File when attached to a terminal (the TUI owns the screen), stderr otherwise.
    #[default]
    Auto,
    File,
    Stdout,
    Stderr,
}

impl std::str::FromStr for LogMode {
    type Err = CardioRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "file" => Ok(Self::File),
            "stdout" => Ok(Self::Stdout),
            "stderr" => Ok(Self::Stderr),
            other => Err(CardioRiskError::Config(format!(
                "CARDIORISK_LOG_MODE must be auto, file, stdout or stderr (got '{other}')"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub allow_unsigned_models: bool,
    pub verifying_key: Option<VerifyingKey>,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            allow_unsigned_models: false,
            verifying_key: None,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns `CardioRiskError::Config` for malformed values.
    pub fn from_env() -> Result<Self, CardioRiskError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns `CardioRiskError::Config` for malformed values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CardioRiskError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("CARDIORISK_MODEL_PATH").filter(|v| !v.trim().is_empty()) {
            config.model_path = PathBuf::from(path.trim());
        }
        if let Some(v) = lookup("CARDIORISK_ALLOW_UNSIGNED_MODELS") {
            config.allow_unsigned_models = parse_bool("CARDIORISK_ALLOW_UNSIGNED_MODELS", &v)?;
        }
        if let Some(v) = lookup("CARDIORISK_LOG_MODE") {
            config.log_mode = v.parse()?;
        }
        if let Some(path) = lookup("CARDIORISK_LOG_FILE").filter(|v| !v.trim().is_empty()) {
            config.log_file = PathBuf::from(path.trim());
        }

        let key_b64 = match lookup("CARDIORISK_MODEL_PUBKEY_B64_FILE") {
            Some(path) => Some(std::fs::read_to_string(path.trim()).map_err(|e| {
                CardioRiskError::Config(format!("failed to read public key file: {e}"))
            })?),
            None => lookup("CARDIORISK_MODEL_PUBKEY_B64"),
        };
        if let Some(b64) = key_b64.filter(|v| !v.trim().is_empty()) {
            config.verifying_key = Some(
                ModelLoader::verifying_key_from_b64(&b64)
                    .map_err(|e| CardioRiskError::Config(e.to_string()))?,
            );
        }

        Ok(config)
    }

    /// Model loader matching this configuration.
    #[must_use]
    pub fn model_loader(&self) -> ModelLoader {
        let policy = if self.allow_unsigned_models {
            SignaturePolicy::AllowUnsigned
        } else {
            SignaturePolicy::Required
        };
        let loader = ModelLoader::new(policy);
        match self.verifying_key {
            Some(key) => loader.with_verifying_key(key),
            None => loader,
        }
    }
}

/// Parse a boolean flag (`1/0`, `true/false`, `yes/no`, `on/off`).
///
/// # Errors
/// Returns `CardioRiskError::Config` naming the variable otherwise.
pub fn parse_bool(name: &str, value: &str) -> Result<bool, CardioRiskError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(CardioRiskError::Config(format!(
            "{name} must be a boolean (got '{other}')"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, CardioRiskError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    fn pubkey_b64() -> String {
        let key = ed25519_dalek::SigningKey::from_bytes(&[7u8; 32]);
        base64::engine::general_purpose::STANDARD.encode(key.verifying_key().to_bytes())
    }

    #[test]
    fn test_defaults() {
        let c = config(&[]).expect("defaults");
        assert_eq!(c, AppConfig::default());
        assert_eq!(c.model_path, PathBuf::from("models"));
        assert!(!c.allow_unsigned_models);
    }

    #[test]
    fn test_overrides() {
        let c = config(&[
            ("CARDIORISK_MODEL_PATH", "/opt/model"),
            ("CARDIORISK_ALLOW_UNSIGNED_MODELS", "YES"),
            ("CARDIORISK_LOG_MODE", "stderr"),
            ("CARDIORISK_LOG_FILE", "/tmp/x.log"),
        ])
        .expect("valid config");
        assert_eq!(c.model_path, PathBuf::from("/opt/model"));
        assert!(c.allow_unsigned_models);
        assert_eq!(c.log_mode, LogMode::Stderr);
        assert_eq!(c.log_file, PathBuf::from("/tmp/x.log"));
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        assert!(matches!(
            config(&[("CARDIORISK_LOG_MODE", "syslog")]),
            Err(CardioRiskError::Config(_))
        ));
        assert!(matches!(
            config(&[("CARDIORISK_ALLOW_UNSIGNED_MODELS", "maybe")]),
            Err(CardioRiskError::Config(_))
        ));
        assert!(matches!(
            config(&[("CARDIORISK_MODEL_PUBKEY_B64", "AAAA")]),
            Err(CardioRiskError::Config(_))
        ));
    }

    #[test]
    fn test_public_key_from_env_and_file() {
        let b64 = pubkey_b64();
        let c = config(&[("CARDIORISK_MODEL_PUBKEY_B64", &b64)]).expect("valid key");
        assert!(c.verifying_key.is_some());

        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("model.pub");
        std::fs::write(&path, format!("{b64}\n")).expect("write");
        let path = path.to_string_lossy().to_string();
        let c = config(&[("CARDIORISK_MODEL_PUBKEY_B64_FILE", &path)]).expect("valid key file");
        assert!(c.verifying_key.is_some());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", " on ").expect("bool"));
        assert!(!parse_bool("X", "0").expect("bool"));
        let err = parse_bool("X", "2").expect_err("must fail");
        assert!(err.to_string().contains("X must be a boolean"));
    }
}
