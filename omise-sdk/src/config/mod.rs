//! Client configuration.
//!
//! Everything a [`Client`](crate::client::Client) needs is passed in
//! explicitly through [`ClientConfig`]; nothing is read from the environment.

mod installment;
mod key;
mod polling;
mod server;
mod user_agent;

pub use installment::InstallmentTerms;
pub use key::{PublicKey, PublicKeyError};
pub use polling::PollingConfig;
pub use server::{DEFAULT_API_URL, DEFAULT_VAULT_URL, ServerTarget, ServerUrls};
pub use user_agent::UserAgent;

use std::time::Duration;

/// API version pinned through the `Omise-Version` header.
pub const DEFAULT_API_VERSION: &str = "2019-05-29";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub public_key: PublicKey,
    pub servers: ServerUrls,
    pub user_agent: UserAgent,
    pub api_version: String,
    /// Per-request timeout of the HTTP transport.
    pub timeout: Duration,
    pub polling: PollingConfig,
    pub installment_terms: InstallmentTerms,
}

impl ClientConfig {
    pub fn new(public_key: PublicKey) -> Self {
        Self {
            public_key,
            servers: ServerUrls::default(),
            user_agent: UserAgent::default(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            polling: PollingConfig::default(),
            installment_terms: InstallmentTerms::default(),
        }
    }

    pub fn with_servers(mut self, servers: ServerUrls) -> Self {
        self.servers = servers;
        self
    }

    pub fn with_user_agent(mut self, user_agent: UserAgent) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_polling(mut self, polling: PollingConfig) -> Self {
        self.polling = polling;
        self
    }

    pub fn with_installment_terms(mut self, installment_terms: InstallmentTerms) -> Self {
        self.installment_terms = installment_terms;
        self
    }
}
