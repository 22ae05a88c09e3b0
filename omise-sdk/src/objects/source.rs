use super::payment::PaymentInformation;
use serde::{Deserialize, Serialize};

/// How the payer completes a source after it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    Redirect,
    Offline,
    AppRedirect,
    #[serde(other)]
    Unknown,
}

/// A payment source created on the API server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    #[serde(rename = "livemode")]
    pub is_live_mode: bool,
    /// Minor currency units.
    pub amount: i64,
    pub currency: String,
    pub flow: Flow,
    #[serde(flatten)]
    pub payment_information: PaymentInformation,
}
