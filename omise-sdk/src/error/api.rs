//! Errors reported by the Omise servers in a 4xx/5xx response body.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;
use std::fmt;

/// An error the server reported in `{"code": ..., "message": ..., "location": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({code})")]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub location: String,
}

#[derive(Deserialize)]
struct RawApiError {
    code: String,
    message: String,
    #[serde(default)]
    location: String,
}

impl ApiError {
    pub fn new(code: &str, message: impl Into<String>, location: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            code: ApiErrorCode::parse(code, &message),
            message,
            location: location.into(),
        }
    }
}

impl<'de> Deserialize<'de> for ApiError {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawApiError::deserialize(deserializer)?;
        Ok(ApiError::new(&raw.code, raw.message, raw.location))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCode {
    InvalidCard(Vec<InvalidCardReason>),
    BadRequest(Vec<BadRequestReason>),
    AuthenticationFailure,
    ServiceNotFound,
    Other(String),
}

impl ApiErrorCode {
    pub fn parse(code: &str, message: &str) -> Self {
        match code {
            "invalid_card" => ApiErrorCode::InvalidCard(InvalidCardReason::parse_all(message)),
            "bad_request" => ApiErrorCode::BadRequest(BadRequestReason::parse_all(message)),
            "authentication_failure" => ApiErrorCode::AuthenticationFailure,
            "service_not_found" => ApiErrorCode::ServiceNotFound,
            other => ApiErrorCode::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ApiErrorCode::InvalidCard(_) => "invalid_card",
            ApiErrorCode::BadRequest(_) => "bad_request",
            ApiErrorCode::AuthenticationFailure => "authentication_failure",
            ApiErrorCode::ServiceNotFound => "service_not_found",
            ApiErrorCode::Other(code) => code,
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a server message into its individual clauses.
fn clauses<'a>(message: &'a str, separators: &[&str]) -> Vec<&'a str> {
    let mut parts = vec![message];
    for separator in separators {
        parts = parts
            .into_iter()
            .flat_map(|part| part.split(separator))
            .collect();
    }
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// Digits immediately following the first occurrence of `pattern`.
///
/// `None` when the pattern is absent or not followed by a digit; the inner
/// value is `None` when the digits overflow.
fn number_after<T: std::str::FromStr>(message: &str, pattern: &str) -> Option<Option<T>> {
    let (_, rest) = message.split_once(pattern)?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    Some(rest[..end].parse().ok())
}

/// Why the server refused card data. Ordered by precedence, `Other` last.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InvalidCardReason {
    InvalidCardNumber,
    InvalidExpirationDate,
    EmptyCardHolderName,
    UnsupportedBrand,
    Other(String),
}

impl InvalidCardReason {
    pub fn from_clause(clause: &str) -> Self {
        if clause.contains("number") {
            InvalidCardReason::InvalidCardNumber
        } else if clause.contains("expiration") {
            InvalidCardReason::InvalidExpirationDate
        } else if clause.contains("name") {
            InvalidCardReason::EmptyCardHolderName
        } else if clause.contains("brand") {
            InvalidCardReason::UnsupportedBrand
        } else {
            InvalidCardReason::Other(clause.to_string())
        }
    }

    pub fn parse_all(message: &str) -> Vec<Self> {
        let mut reasons: BTreeSet<_> = clauses(message, &[", and ", ", "])
            .into_iter()
            .map(InvalidCardReason::from_clause)
            .collect();
        // an unknown number also fails brand detection
        if reasons.contains(&InvalidCardReason::InvalidCardNumber) {
            reasons.remove(&InvalidCardReason::UnsupportedBrand);
        }
        reasons.into_iter().collect()
    }
}

/// Why the server refused a request. Ordered by precedence, `Other` last.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BadRequestReason {
    /// The amount is below the minimum (carried in minor units when known).
    AmountIsLessThanValidAmount(Option<i64>),
    /// The amount is above the maximum (carried in minor units when known).
    AmountIsGreaterThanValidAmount(Option<i64>),
    InvalidCurrency,
    EmptyName,
    NameIsTooLong(Option<usize>),
    InvalidName,
    InvalidEmail,
    InvalidPhoneNumber,
    TypeNotSupported,
    CurrencyNotSupported,
    Other(String),
}

impl BadRequestReason {
    pub fn from_clause(clause: &str) -> Self {
        if clause.starts_with("amount must be ") {
            Self::from_amount_clause(clause)
        } else if clause.contains("currency must be") {
            BadRequestReason::InvalidCurrency
        } else if clause.contains("type") {
            BadRequestReason::TypeNotSupported
        } else if clause.contains("currency") {
            BadRequestReason::CurrencyNotSupported
        } else if clause.contains("name") && clause.contains("blank") {
            BadRequestReason::EmptyName
        } else if clause.contains("name") && clause.contains("invalid") {
            BadRequestReason::InvalidName
        } else if let Some(maximum) = clause
            .starts_with("name is too long")
            .then(|| number_after(clause, "name is too long (maximum is "))
            .flatten()
            .filter(|_| clause.contains(" characters)"))
        {
            BadRequestReason::NameIsTooLong(maximum)
        } else if clause.contains("name") {
            BadRequestReason::NameIsTooLong(None)
        } else if clause.contains("email") {
            BadRequestReason::InvalidEmail
        } else if clause.contains("phone") {
            BadRequestReason::InvalidPhoneNumber
        } else {
            BadRequestReason::Other(clause.to_string())
        }
    }

    fn from_amount_clause(clause: &str) -> Self {
        if let Some(amount) = number_after(clause, "amount must be greater than ") {
            BadRequestReason::AmountIsLessThanValidAmount(amount)
        } else if let Some(amount) = number_after(clause, "amount must be less than ") {
            BadRequestReason::AmountIsGreaterThanValidAmount(amount)
        } else if let Some(amount) = number_after(clause, "amount must be at least ") {
            BadRequestReason::AmountIsLessThanValidAmount(amount)
        } else {
            BadRequestReason::Other(clause.to_string())
        }
    }

    pub fn parse_all(message: &str) -> Vec<Self> {
        let reasons: BTreeSet<_> = clauses(message, &[", and ", ", ", " and "])
            .into_iter()
            .map(BadRequestReason::from_clause)
            .collect();
        reasons.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_invalid_card() {
        let error: ApiError = serde_json::from_str(
            r#"{
                "object": "error",
                "location": "https://www.omise.co/api-errors#invalid-card",
                "code": "invalid_card",
                "message": "number can't be blank and brand not supported (unknown), expiration date is invalid, and name can't be blank"
            }"#,
        )
        .unwrap();
        assert_eq!(
            error.code,
            ApiErrorCode::InvalidCard(vec![
                InvalidCardReason::InvalidCardNumber,
                InvalidCardReason::InvalidExpirationDate,
                InvalidCardReason::EmptyCardHolderName,
            ])
        );
        assert_eq!(error.location, "https://www.omise.co/api-errors#invalid-card");
    }

    #[test]
    fn test_unsupported_brand_alone() {
        assert_eq!(
            InvalidCardReason::parse_all("brand not supported, and something odd"),
            vec![
                InvalidCardReason::UnsupportedBrand,
                InvalidCardReason::Other("something odd".into())
            ]
        );
    }

    #[test]
    fn test_bad_request_single_clauses() {
        use BadRequestReason::*;
        let cases = [
            ("amount must be at least 500", AmountIsLessThanValidAmount(Some(500))),
            ("amount must be less than 500", AmountIsGreaterThanValidAmount(Some(500))),
            ("amount must be greater than 500", AmountIsLessThanValidAmount(Some(500))),
            ("amount must be 1000", Other("amount must be 1000".into())),
            ("name is too long (maximum is 50 characters)", NameIsTooLong(Some(50))),
            ("name is too long ... 20", NameIsTooLong(None)),
            ("... name ... blank ...", EmptyName),
            ("... name ...", NameIsTooLong(None)),
            ("... email ...", InvalidEmail),
            ("... phone ...", InvalidPhoneNumber),
            ("... type ...", TypeNotSupported),
            ("... currency must be...", InvalidCurrency),
            ("... currency ...", CurrencyNotSupported),
            ("Something else", Other("Something else".into())),
        ];
        for (message, expected) in cases {
            assert_eq!(BadRequestReason::from_clause(message), expected, "{message}");
        }
    }

    #[test]
    fn test_bad_request_message_is_split_deduped_and_ordered() {
        let message = "amount must be 1000, the currency must be USD, unsupported type, \
            provided currency is not supported, name blank, \
            name is too long: maximum is 30, name is unacceptable, \
            email format error, your phone is missing, phone number is invalid, invalid name, \
            amount must be greater than 2500, amount must be less than 800 and unexpected error";
        assert_eq!(
            BadRequestReason::parse_all(message),
            vec![
                BadRequestReason::AmountIsLessThanValidAmount(Some(2500)),
                BadRequestReason::AmountIsGreaterThanValidAmount(Some(800)),
                BadRequestReason::InvalidCurrency,
                BadRequestReason::EmptyName,
                BadRequestReason::NameIsTooLong(None),
                BadRequestReason::InvalidName,
                BadRequestReason::InvalidEmail,
                BadRequestReason::InvalidPhoneNumber,
                BadRequestReason::TypeNotSupported,
                BadRequestReason::CurrencyNotSupported,
                BadRequestReason::Other("amount must be 1000".into()),
                BadRequestReason::Other("unexpected error".into()),
            ]
        );
    }

    #[test]
    fn test_other_codes() {
        let error = ApiError::new("authentication_failure", "authentication failed", "");
        assert_eq!(error.code, ApiErrorCode::AuthenticationFailure);
        let error = ApiError::new("rate_limited", "slow down", "");
        assert_eq!(error.code, ApiErrorCode::Other("rate_limited".into()));
        assert_eq!(error.to_string(), "slow down (rate_limited)");
    }
}
