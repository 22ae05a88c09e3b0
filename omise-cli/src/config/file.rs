//! TOML file configuration structures.
//!
//! These structs directly map to the `omise.toml` file format.

use omise_sdk::config::{InstallmentTerms, ServerUrls, UserAgent};
use serde::{Deserialize, Serialize};

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    /// Publishable key (`pkey_...`). May instead come from the command line
    /// or `OMISE_PUBLIC_KEY`.
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub servers: ServerUrls,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub polling: PollingSection,
    #[serde(default)]
    pub user_agent: Option<UserAgent>,
    /// Entries replace the built-in table per source type.
    #[serde(default)]
    pub installment_terms: Option<InstallmentTerms>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingSection {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for PollingSection {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            interval_secs: default_interval_secs(),
        }
    }
}

fn default_max_attempts() -> u32 {
    10
}

fn default_interval_secs() -> u64 {
    3
}
