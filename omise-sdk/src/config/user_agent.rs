use serde::{Deserialize, Serialize};
use std::fmt;

/// Parts of the `User-Agent` header: `{sdk}/{version} {platform}/{platform_version} {vendor}/{device}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAgent {
    pub sdk_name: String,
    pub sdk_version: String,
    pub platform: String,
    pub platform_version: String,
    pub vendor: String,
    pub device: String,
}

impl Default for UserAgent {
    fn default() -> Self {
        Self {
            sdk_name: "OmiseRust".to_string(),
            sdk_version: env!("CARGO_PKG_VERSION").to_string(),
            platform: std::env::consts::OS.to_string(),
            platform_version: "unknown".to_string(),
            vendor: "unknown".to_string(),
            device: std::env::consts::ARCH.to_string(),
        }
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} {}/{} {}/{}",
            self.sdk_name,
            self.sdk_version,
            self.platform,
            self.platform_version,
            self.vendor,
            self.device
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_format() {
        let agent = UserAgent {
            sdk_name: "OmiseIOS".into(),
            sdk_version: "5.0.0".into(),
            platform: "iOS".into(),
            platform_version: "17.2".into(),
            vendor: "Apple".into(),
            device: "iPhone15,2".into(),
        };
        assert_eq!(agent.to_string(), "OmiseIOS/5.0.0 iOS/17.2 Apple/iPhone15,2");
    }

    #[test]
    fn test_partial_override() {
        let agent: UserAgent = serde_json::from_str(r#"{"sdk_name":"OmiseAndroid"}"#).unwrap();
        assert!(agent.to_string().starts_with(&format!(
            "OmiseAndroid/{} ",
            env!("CARGO_PKG_VERSION")
        )));
    }
}
