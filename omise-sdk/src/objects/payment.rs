//! Source-type specific payment details.
//!
//! On the wire the details are merged flat into the enclosing object next to
//! a `"type"` field, e.g. `{"amount":100,"type":"fpx","bank":"cimb"}`.

use super::source_type::SourceType;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Payment details attached to a source, tagged by [`SourceType`].
///
/// `BillPayment` and `MobileBanking` carry nothing beyond their discriminator.
/// They encode like `Other` of the same type, decode as `Other`, and compare
/// equal to it.
#[derive(Debug, Clone)]
pub enum PaymentInformation {
    Atome(Atome),
    Barcode(BarcodeAlipay),
    BillPayment(BillPayment),
    DuitNowObw(DuitNowObw),
    EContext(EContext),
    Fpx(Fpx),
    Installment(Installment),
    MobileBanking(MobileBanking),
    TrueMoneyWallet(TrueMoneyWallet),
    /// A source type that needs no details, or whose details did not parse.
    Other(SourceType),
}

impl PaymentInformation {
    pub fn source_type(&self) -> SourceType {
        match self {
            PaymentInformation::Atome(_) => SourceType::Atome,
            PaymentInformation::Barcode(_) => SourceType::BarcodeAlipay,
            PaymentInformation::BillPayment(provider) => provider.source_type(),
            PaymentInformation::DuitNowObw(_) => SourceType::DuitNowObw,
            PaymentInformation::EContext(_) => SourceType::EContext,
            PaymentInformation::Fpx(_) => SourceType::Fpx,
            PaymentInformation::Installment(details) => details.source_type.clone(),
            PaymentInformation::MobileBanking(bank) => bank.source_type(),
            PaymentInformation::TrueMoneyWallet(_) => SourceType::TrueMoneyWallet,
            PaymentInformation::Other(source_type) => source_type.clone(),
        }
    }

    fn is_discriminator_only(&self) -> bool {
        matches!(
            self,
            PaymentInformation::BillPayment(_)
                | PaymentInformation::MobileBanking(_)
                | PaymentInformation::Other(_)
        )
    }

    /// Build the typed value from a flat JSON object carrying a `"type"` key.
    ///
    /// Falls back to [`PaymentInformation::Other`] whenever the structured
    /// fields for the given type are missing or malformed. Types identified by
    /// the discriminator alone, bill payment and mobile banking included,
    /// always decode to `Other`.
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let source_type = match fields.get("type") {
            Some(value) => SourceType::deserialize(value)?,
            None => return Err(serde_json::Error::missing_field("type")),
        };

        let object = Value::Object(fields);
        let typed = match &source_type {
            SourceType::Atome => Atome::deserialize(&object).ok().map(Self::Atome),
            SourceType::BarcodeAlipay => BarcodeAlipay::deserialize(&object)
                .ok()
                .map(Self::Barcode),
            SourceType::DuitNowObw => DuitNowObw::deserialize(&object)
                .ok()
                .map(Self::DuitNowObw),
            SourceType::EContext => EContext::deserialize(&object).ok().map(Self::EContext),
            SourceType::Fpx => Fpx::deserialize(&object).ok().map(Self::Fpx),
            SourceType::TrueMoneyWallet => TrueMoneyWallet::deserialize(&object)
                .ok()
                .map(Self::TrueMoneyWallet),
            t if t.is_installment() => Installment::deserialize(&object)
                .ok()
                .map(Self::Installment),
            _ => None,
        };

        Ok(typed.unwrap_or(Self::Other(source_type)))
    }
}

impl PartialEq for PaymentInformation {
    fn eq(&self, other: &Self) -> bool {
        use PaymentInformation as P;
        match (self, other) {
            (P::Atome(a), P::Atome(b)) => a == b,
            (P::Barcode(a), P::Barcode(b)) => a == b,
            (P::DuitNowObw(a), P::DuitNowObw(b)) => a == b,
            (P::EContext(a), P::EContext(b)) => a == b,
            (P::Fpx(a), P::Fpx(b)) => a == b,
            (P::Installment(a), P::Installment(b)) => a == b,
            (P::TrueMoneyWallet(a), P::TrueMoneyWallet(b)) => a == b,
            (a, b) if a.is_discriminator_only() && b.is_discriminator_only() => {
                a.source_type() == b.source_type()
            }
            _ => false,
        }
    }
}

impl Eq for PaymentInformation {}

#[derive(Serialize)]
struct Tagged<'a, T: Serialize> {
    #[serde(rename = "type")]
    source_type: SourceType,
    #[serde(flatten)]
    details: &'a T,
}

#[derive(Serialize)]
struct TypeOnly {
    #[serde(rename = "type")]
    source_type: SourceType,
}

impl Serialize for PaymentInformation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let source_type = self.source_type();
        match self {
            PaymentInformation::Atome(details) => {
                Tagged { source_type, details }.serialize(serializer)
            }
            PaymentInformation::Barcode(details) => {
                Tagged { source_type, details }.serialize(serializer)
            }
            PaymentInformation::DuitNowObw(details) => {
                Tagged { source_type, details }.serialize(serializer)
            }
            PaymentInformation::EContext(details) => {
                Tagged { source_type, details }.serialize(serializer)
            }
            PaymentInformation::Fpx(details) => {
                Tagged { source_type, details }.serialize(serializer)
            }
            PaymentInformation::TrueMoneyWallet(details) => {
                Tagged { source_type, details }.serialize(serializer)
            }
            // carries its own "type"
            PaymentInformation::Installment(details) => details.serialize(serializer),
            PaymentInformation::BillPayment(_)
            | PaymentInformation::MobileBanking(_)
            | PaymentInformation::Other(_) => TypeOnly { source_type }.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PaymentInformation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        PaymentInformation::from_fields(fields).map_err(D::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Detail types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub country: String,
    pub city: String,
    pub state: String,
    pub street1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub name: String,
    pub quantity: u32,
    /// Minor currency units.
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atome {
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub shipping: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<Address>,
    pub items: Vec<Item>,
}

/// Alipay in-store barcode payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeAlipay {
    pub barcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BillPayment {
    TescoLotus,
}

impl BillPayment {
    pub fn source_type(self) -> SourceType {
        match self {
            BillPayment::TescoLotus => SourceType::BillPaymentTescoLotus,
        }
    }

    pub fn from_source_type(source_type: &SourceType) -> Option<Self> {
        match source_type {
            SourceType::BillPaymentTescoLotus => Some(BillPayment::TescoLotus),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MobileBanking {
    Bay,
    Bbl,
    KBank,
    Ktb,
    Scb,
}

impl MobileBanking {
    pub fn source_type(self) -> SourceType {
        match self {
            MobileBanking::Bay => SourceType::MobileBankingBay,
            MobileBanking::Bbl => SourceType::MobileBankingBbl,
            MobileBanking::KBank => SourceType::MobileBankingKBank,
            MobileBanking::Ktb => SourceType::MobileBankingKtb,
            MobileBanking::Scb => SourceType::MobileBankingScb,
        }
    }

    pub fn from_source_type(source_type: &SourceType) -> Option<Self> {
        match source_type {
            SourceType::MobileBankingBay => Some(MobileBanking::Bay),
            SourceType::MobileBankingBbl => Some(MobileBanking::Bbl),
            SourceType::MobileBankingKBank => Some(MobileBanking::KBank),
            SourceType::MobileBankingKtb => Some(MobileBanking::Ktb),
            SourceType::MobileBankingScb => Some(MobileBanking::Scb),
            _ => None,
        }
    }
}

/// Bank codes accepted by DuitNow online banking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuitNowBank {
    Affin,
    Alliance,
    Agro,
    Ambank,
    Islam,
    Muamalat,
    Rakyat,
    Bsn,
    Cimb,
    #[serde(rename = "hongleong")]
    HongLeong,
    Hsbc,
    Kfh,
    Maybank2u,
    Ocbc,
    Public,
    Rhb,
    Sc,
    Uob,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuitNowObw {
    pub bank: DuitNowBank,
}

/// Convenience store / pay-easy payment in Japan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EContext {
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

/// Bank codes accepted by FPX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FpxBank {
    Affin,
    Alliance,
    Agro,
    Ambank,
    Islam,
    Muamalat,
    Rakyat,
    Bocm,
    Bsn,
    Cimb,
    #[serde(rename = "hongleong")]
    HongLeong,
    Hsbc,
    Kfh,
    Maybank2e,
    Maybank2u,
    Ocbc,
    Public,
    Rhb,
    Sc,
    Uob,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fpx {
    pub bank: FpxBank,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub installment_term: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zero_interest_installments: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrueMoneyWallet {
    pub phone_number: String,
}
