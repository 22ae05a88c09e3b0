//! Configuration module for the omise CLI.
//!
//! Handles loading configuration from a TOML file, CLI arguments,
//! and environment variables.

pub mod file;

use crate::config::file::FileConfig;
use omise_sdk::config::{ClientConfig, InstallmentTerms, PollingConfig, PublicKey, PublicKeyError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("no public key: set `public_key` in the config file, pass --public-key or set OMISE_PUBLIC_KEY")]
    MissingPublicKey,

    #[error("invalid public key: {0}")]
    InvalidPublicKey(#[from] PublicKeyError),
}

/// Values given on the command line that win over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub public_key: Option<String>,
    pub api_url: Option<Url>,
    pub vault_url: Option<Url>,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    overrides: Overrides,
}

impl ConfigLoader {
    pub fn new(config_path: impl AsRef<Path>, overrides: Overrides) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            overrides,
        }
    }

    /// Load and process the configuration.
    ///
    /// A missing file is not an error; everything can come from overrides.
    pub fn load(&self) -> Result<ClientConfig, ConfigError> {
        let file_config = match std::fs::read_to_string(&self.config_path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config file at {:?}, using defaults", self.config_path);
                FileConfig::default()
            }
            Err(e) => return Err(e.into()),
        };
        self.build(file_config)
    }

    /// Apply overrides, validate, and produce the client configuration.
    pub fn build(&self, mut file_config: FileConfig) -> Result<ClientConfig, ConfigError> {
        if let Some(public_key) = &self.overrides.public_key {
            file_config.public_key = Some(public_key.clone());
        }
        if let Some(api_url) = &self.overrides.api_url {
            file_config.servers.api = Some(api_url.clone());
        }
        if let Some(vault_url) = &self.overrides.vault_url {
            file_config.servers.vault = Some(vault_url.clone());
        }

        self.validate(&file_config)?;

        let public_key = file_config
            .public_key
            .ok_or(ConfigError::MissingPublicKey)?;
        let mut installment_terms = InstallmentTerms::default();
        if let Some(overrides) = file_config.installment_terms {
            installment_terms.merge(overrides);
        }

        let mut config = ClientConfig::new(PublicKey::new(public_key)?)
            .with_servers(file_config.servers)
            .with_timeout(Duration::from_secs(file_config.http.timeout_secs))
            .with_polling(PollingConfig::new(
                file_config.polling.max_attempts,
                Duration::from_secs(file_config.polling.interval_secs),
            ))
            .with_installment_terms(installment_terms);
        if let Some(user_agent) = file_config.user_agent {
            config = config.with_user_agent(user_agent);
        }
        Ok(config)
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if config.http.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "http.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if config.polling.max_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "polling.max_attempts must be at least 1".to_string(),
            ));
        }
        for (name, url) in [("api", &config.servers.api), ("vault", &config.servers.vault)] {
            if url
                .as_ref()
                .is_some_and(|url| !matches!(url.scheme(), "http" | "https"))
            {
                return Err(ConfigError::ValidationError(format!(
                    "servers.{name} must be an http(s) URL"
                )));
            }
        }
        Ok(())
    }
}
