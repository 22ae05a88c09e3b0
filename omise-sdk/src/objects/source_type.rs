use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

macro_rules! source_types {
    ($($variant:ident => $wire:literal,)+) => {
        /// Payment source types known to the Omise API.
        ///
        /// Wire values this build does not know about are kept verbatim in
        /// [`SourceType::Unknown`] so they survive a decode/encode cycle.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum SourceType {
            $($variant,)+
            Unknown(CompactString),
        }

        impl SourceType {
            /// Every known source type, in declaration order.
            pub const ALL: &'static [SourceType] = &[$(SourceType::$variant,)+];

            /// The string used on the wire.
            pub fn as_str(&self) -> &str {
                match self {
                    $(SourceType::$variant => $wire,)+
                    SourceType::Unknown(raw) => raw.as_str(),
                }
            }

            /// Map a wire string to a source type, falling back to `Unknown`.
            pub fn from_wire(value: &str) -> Self {
                match value {
                    $($wire => SourceType::$variant,)+
                    other => SourceType::Unknown(CompactString::from(other)),
                }
            }
        }
    };
}

source_types! {
    Alipay => "alipay",
    AlipayCn => "alipay_cn",
    AlipayHk => "alipay_hk",
    ApplePay => "applepay",
    Atome => "atome",
    BarcodeAlipay => "barcode_alipay",
    BillPaymentTescoLotus => "bill_payment_tesco_lotus",
    Boost => "boost",
    Dana => "dana",
    DuitNowObw => "duitnow_obw",
    DuitNowQr => "duitnow_qr",
    EContext => "econtext",
    Fpx => "fpx",
    GCash => "gcash",
    GrabPay => "grabpay",
    GrabPayRms => "grabpay_rms",
    InstallmentBay => "installment_bay",
    InstallmentBbl => "installment_bbl",
    InstallmentFirstChoice => "installment_first_choice",
    InstallmentKBank => "installment_kbank",
    InstallmentKtc => "installment_ktc",
    InstallmentMbb => "installment_mbb",
    InstallmentScb => "installment_scb",
    InstallmentTtb => "installment_ttb",
    InstallmentUob => "installment_uob",
    InstallmentWhiteLabelBay => "installment_wlb_bay",
    InstallmentWhiteLabelBbl => "installment_wlb_bbl",
    InstallmentWhiteLabelFirstChoice => "installment_wlb_first_choice",
    InstallmentWhiteLabelKBank => "installment_wlb_kbank",
    InstallmentWhiteLabelKtc => "installment_wlb_ktc",
    InstallmentWhiteLabelScb => "installment_wlb_scb",
    InstallmentWhiteLabelTtb => "installment_wlb_ttb",
    InstallmentWhiteLabelUob => "installment_wlb_uob",
    InternetBankingBay => "internet_banking_bay",
    InternetBankingBbl => "internet_banking_bbl",
    KakaoPay => "kakaopay",
    MaybankQrPay => "maybank_qr",
    MobileBankingBay => "mobile_banking_bay",
    MobileBankingBbl => "mobile_banking_bbl",
    MobileBankingKBank => "mobile_banking_kbank",
    MobileBankingKtb => "mobile_banking_ktb",
    MobileBankingOcbc => "mobile_banking_ocbc",
    MobileBankingScb => "mobile_banking_scb",
    PayNow => "paynow",
    PayPay => "paypay",
    PointsCiti => "points_citi",
    PromptPay => "promptpay",
    RabbitLinepay => "rabbit_linepay",
    ShopeePay => "shopeepay",
    ShopeePayJumpApp => "shopeepay_jumpapp",
    TouchNGo => "touch_n_go",
    TouchNGoAlipayPlus => "touch_n_go_alipay_plus",
    TrueMoneyWallet => "truemoney",
    TrueMoneyJumpApp => "truemoney_jumpapp",
    WeChat => "wechat_pay",
}

impl SourceType {
    pub fn is_installment(&self) -> bool {
        self.as_str().starts_with("installment_")
    }

    pub fn is_white_label_installment(&self) -> bool {
        self.as_str().starts_with("installment_wlb_")
    }

    pub fn is_internet_banking(&self) -> bool {
        matches!(
            self,
            SourceType::InternetBankingBay | SourceType::InternetBankingBbl
        )
    }

    /// Thai mobile banking apps. OCBC Digital is a mobile banking source but
    /// is presented as a plain redirect and is not part of this group.
    pub fn is_mobile_banking(&self) -> bool {
        matches!(
            self,
            SourceType::MobileBankingScb
                | SourceType::MobileBankingKBank
                | SourceType::MobileBankingBay
                | SourceType::MobileBankingBbl
                | SourceType::MobileBankingKtb
        )
    }

    /// Whether creating a source of this type needs more than the type itself.
    pub fn requires_additional_details(&self) -> bool {
        self.is_installment()
            || matches!(
                self,
                SourceType::Atome
                    | SourceType::BarcodeAlipay
                    | SourceType::DuitNowObw
                    | SourceType::EContext
                    | SourceType::Fpx
                    | SourceType::TrueMoneyWallet
            )
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SourceType::Unknown(_))
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SourceType {
    fn from(value: &str) -> Self {
        SourceType::from_wire(value)
    }
}

impl Serialize for SourceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SourceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = CompactString::deserialize(deserializer)?;
        Ok(SourceType::from_wire(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_wire_strings_are_unique_and_round_trip() {
        let mut seen = HashSet::new();
        for source_type in SourceType::ALL {
            assert!(seen.insert(source_type.as_str()), "{source_type} repeated");
            assert_eq!(&SourceType::from_wire(source_type.as_str()), source_type);
        }
        assert_eq!(seen.len(), 55);
    }

    #[test]
    fn test_unknown_value_is_preserved() {
        let decoded: SourceType = serde_json::from_str(r#""crypto_wallet""#).unwrap();
        assert_eq!(decoded, SourceType::Unknown("crypto_wallet".into()));
        assert!(decoded.is_unknown());
        assert_eq!(serde_json::to_string(&decoded).unwrap(), r#""crypto_wallet""#);
    }

    #[test]
    fn test_installment_predicates() {
        assert!(SourceType::InstallmentBay.is_installment());
        assert!(!SourceType::InstallmentBay.is_white_label_installment());
        assert!(SourceType::InstallmentWhiteLabelKtc.is_installment());
        assert!(SourceType::InstallmentWhiteLabelKtc.is_white_label_installment());
        assert!(!SourceType::Alipay.is_installment());
        assert!(SourceType::InstallmentUob.requires_additional_details());
    }

    #[test]
    fn test_banking_predicates() {
        assert!(SourceType::MobileBankingKtb.is_mobile_banking());
        assert!(!SourceType::MobileBankingOcbc.is_mobile_banking());
        assert!(SourceType::InternetBankingBbl.is_internet_banking());
        assert!(!SourceType::MobileBankingBbl.is_internet_banking());
    }
}
