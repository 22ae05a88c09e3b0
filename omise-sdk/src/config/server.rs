use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.omise.co";
pub const DEFAULT_VAULT_URL: &str = "https://vault.omise.co";

/// Which Omise server an operation talks to.
///
/// Card data only ever goes to the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerTarget {
    Api,
    Vault,
}

/// Optional base URL overrides, e.g. for staging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<Url>,
}

impl ServerUrls {
    /// The configured override, or the production default.
    pub fn base(&self, target: ServerTarget) -> &str {
        let (configured, default) = match target {
            ServerTarget::Api => (&self.api, DEFAULT_API_URL),
            ServerTarget::Vault => (&self.vault, DEFAULT_VAULT_URL),
        };
        configured.as_ref().map(Url::as_str).unwrap_or(default)
    }

    /// Join a base URL with a relative endpoint path.
    pub fn endpoint(&self, target: ServerTarget, path: &str) -> Result<Url, url::ParseError> {
        let base = self.base(target).trim_end_matches('/');
        Url::parse(&format!("{base}/{}", path.trim_start_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_servers() {
        let urls = ServerUrls::default();
        assert_eq!(
            urls.endpoint(ServerTarget::Api, "capability").unwrap().as_str(),
            "https://api.omise.co/capability"
        );
        assert_eq!(
            urls.endpoint(ServerTarget::Vault, "tokens").unwrap().as_str(),
            "https://vault.omise.co/tokens"
        );
    }

    #[test]
    fn test_override_keeps_base_path() {
        let urls = ServerUrls {
            api: Some(Url::parse("https://staging.example.com/omise/").unwrap()),
            vault: None,
        };
        assert_eq!(
            urls.endpoint(ServerTarget::Api, "sources").unwrap().as_str(),
            "https://staging.example.com/omise/sources"
        );
        assert_eq!(urls.base(ServerTarget::Vault), DEFAULT_VAULT_URL);
    }
}
