use super::payment::PaymentInformation;
use serde::Serialize;

/// Fixed `platform_type` sent with every source.
pub const PLATFORM_TYPE: &str = "IOS";

/// Body of `POST /sources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSourcePayload {
    amount: i64,
    currency: String,
    platform_type: &'static str,
    #[serde(flatten)]
    details: PaymentInformation,
}

impl CreateSourcePayload {
    /// `amount` is in minor currency units.
    pub fn new(amount: i64, currency: impl Into<String>, details: PaymentInformation) -> Self {
        Self {
            amount,
            currency: currency.into(),
            platform_type: PLATFORM_TYPE,
            details,
        }
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn details(&self) -> &PaymentInformation {
        &self.details
    }
}
