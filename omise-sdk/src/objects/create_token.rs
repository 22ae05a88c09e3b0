use serde::Serialize;
use std::fmt;

/// Body of `POST /tokens`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateTokenPayload {
    Card(CardDetails),
    /// Wallet tokenization such as Apple Pay.
    Tokenization(Tokenization),
}

impl From<CardDetails> for CreateTokenPayload {
    fn from(card: CardDetails) -> Self {
        CreateTokenPayload::Card(card)
    }
}

impl From<Tokenization> for CreateTokenPayload {
    fn from(tokenization: Tokenization) -> Self {
        CreateTokenPayload::Tokenization(tokenization)
    }
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct CardDetails {
    pub name: String,
    pub number: String,
    pub expiration_month: u8,
    pub expiration_year: u16,
    pub security_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl CardDetails {
    pub fn new(
        name: impl Into<String>,
        number: impl Into<String>,
        expiration_month: u8,
        expiration_year: u16,
        security_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            expiration_month,
            expiration_year,
            security_code: security_code.into(),
            phone_number: None,
            email: None,
            country: None,
            city: None,
            state: None,
            street1: None,
            street2: None,
            postal_code: None,
        }
    }

    /// Last four digits of the card number, for display.
    pub fn last_digits(&self) -> &str {
        let digits = self.number.trim();
        let start = digits
            .char_indices()
            .rev()
            .nth(3)
            .map(|(index, _)| index)
            .unwrap_or(0);
        &digits[start..]
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("name", &self.name)
            .field("number", &format_args!("****{}", self.last_digits()))
            .field("expiration_month", &self.expiration_month)
            .field("expiration_year", &self.expiration_year)
            .field("security_code", &"***")
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tokenization {
    pub method: String,
    /// Opaque payment data from the wallet.
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_street1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_street2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_phone_number: Option<String>,
}

impl Tokenization {
    pub fn apple_pay(data: impl Into<String>) -> Self {
        Self {
            method: "applepay".to_string(),
            data: data.into(),
            billing_name: None,
            billing_city: None,
            billing_country: None,
            billing_postal_code: None,
            billing_state: None,
            billing_street1: None,
            billing_street2: None,
            billing_phone_number: None,
        }
    }
}
