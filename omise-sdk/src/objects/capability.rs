use super::create_source::CreateSourcePayload;
use super::payment::PaymentInformation;
use super::source_type::SourceType;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::warn;

/// What the account behind a public key can accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub country: String,
    /// Unique by name; later duplicates in a response are dropped.
    #[serde(default, deserialize_with = "unique_by_name")]
    pub payment_methods: Vec<PaymentMethod>,
    #[serde(default)]
    pub banks: BTreeSet<String>,
}

impl Capability {
    pub fn payment_method(&self, source_type: &SourceType) -> Option<&PaymentMethod> {
        self.payment_methods
            .iter()
            .find(|method| method.name == source_type.as_str())
    }

    pub fn card_method(&self) -> Option<&PaymentMethod> {
        self.payment_methods
            .iter()
            .find(|method| method.kind() == PaymentMethodKind::Card)
    }

    /// Whether the account advertises the payload's source type in its
    /// currency and, for installments, the requested term.
    pub fn supports(&self, payload: &CreateSourcePayload) -> bool {
        let Some(method) = self.payment_method(&payload.details().source_type()) else {
            return false;
        };
        if !method.supports_currency(payload.currency()) {
            return false;
        }
        match payload.details() {
            PaymentInformation::Installment(installment) => method
                .installment_terms
                .as_ref()
                .is_some_and(|terms| terms.contains(&installment.installment_term)),
            _ => true,
        }
    }
}

fn unique_by_name<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<PaymentMethod>, D::Error> {
    let methods = Vec::<PaymentMethod>::deserialize(deserializer)?;
    let mut seen = HashSet::new();
    Ok(methods
        .into_iter()
        .filter(|method| {
            let first = seen.insert(method.name.clone());
            if !first {
                warn!(name = %method.name, "Dropping duplicate payment method");
            }
            first
        })
        .collect())
}

/// A payment method as advertised by the capability endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub name: String,
    #[serde(default)]
    pub currencies: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_brands: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_terms: Option<BTreeSet<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banks: Option<Vec<Bank>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethodKind {
    Card,
    Source(SourceType),
    Unsupported(String),
}

impl PaymentMethod {
    pub fn kind(&self) -> PaymentMethodKind {
        if self.name == "card" {
            return PaymentMethodKind::Card;
        }
        match SourceType::from_wire(&self.name) {
            SourceType::Unknown(_) => PaymentMethodKind::Unsupported(self.name.clone()),
            source_type => PaymentMethodKind::Source(source_type),
        }
    }

    pub fn supports_currency(&self, currency: &str) -> bool {
        self.currencies
            .iter()
            .any(|supported| supported.eq_ignore_ascii_case(currency))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub active: bool,
}

/// Payment network behind a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "Alipay_plus")]
    AlipayPlus,
    #[serde(rename = "RMS")]
    Rms,
    #[serde(other)]
    Unknown,
}
