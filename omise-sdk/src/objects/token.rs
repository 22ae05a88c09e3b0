use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Status of the charge created from a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeStatus {
    Failed,
    Expired,
    Pending,
    Reversed,
    Successful,
    #[serde(other)]
    Unknown,
}

impl ChargeStatus {
    /// Final statuses never change again.
    pub fn is_final(self) -> bool {
        matches!(
            self,
            ChargeStatus::Failed
                | ChargeStatus::Expired
                | ChargeStatus::Reversed
                | ChargeStatus::Successful
        )
    }
}

/// A single-use card token created on the vault server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    #[serde(rename = "livemode")]
    pub is_live_mode: bool,
    #[serde(rename = "used")]
    pub is_used: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<TokenCard>,
    pub charge_status: ChargeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        default,
        with = "super::date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
}

/// The card details the server echoes back. Never contains the full number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCard {
    pub id: String,
    #[serde(rename = "livemode")]
    pub is_live_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_digits: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financing: Option<String>,
    #[serde(default)]
    pub security_code_check: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}
