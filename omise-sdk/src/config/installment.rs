use crate::objects::SourceType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Installment terms (in months) allowed per installment source type.
///
/// Used when the cached capability does not advertise terms for a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstallmentTerms(HashMap<SourceType, Vec<u32>>);

impl InstallmentTerms {
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    pub fn terms(&self, source_type: &SourceType) -> &[u32] {
        self.0.get(source_type).map(Vec::as_slice).unwrap_or_default()
    }

    /// Replace the terms for one source type. Terms are kept sorted and unique.
    pub fn set(&mut self, source_type: SourceType, mut terms: Vec<u32>) {
        terms.sort_unstable();
        terms.dedup();
        self.0.insert(source_type, terms);
    }

    /// Entries from `other` replace the ones in `self`.
    pub fn merge(&mut self, other: InstallmentTerms) {
        for (source_type, terms) in other.0 {
            self.set(source_type, terms);
        }
    }
}

impl Default for InstallmentTerms {
    fn default() -> Self {
        use SourceType::*;
        let table: [(SourceType, &[u32]); 17] = [
            (InstallmentBay, &[3, 4, 6, 10]),
            (InstallmentWhiteLabelBay, &[3, 4, 6, 9, 10]),
            (InstallmentFirstChoice, &[3, 4, 6, 10, 12, 18, 24, 36]),
            (InstallmentWhiteLabelFirstChoice, &[3, 4, 6, 9, 10, 12, 18, 24, 36]),
            (InstallmentBbl, &[4, 6, 8, 10]),
            (InstallmentWhiteLabelBbl, &[4, 6, 8, 10]),
            (InstallmentMbb, &[6, 12, 18, 24]),
            (InstallmentKtc, &[3, 4, 5, 6, 7, 8, 9, 10]),
            (InstallmentWhiteLabelKtc, &[3, 4, 5, 6, 7, 8, 9, 10]),
            (InstallmentKBank, &[3, 4, 6, 10]),
            (InstallmentWhiteLabelKBank, &[3, 6, 10]),
            (InstallmentScb, &[3, 4, 6, 9, 10]),
            (InstallmentWhiteLabelScb, &[3, 4, 6, 9, 10]),
            (InstallmentTtb, &[3, 4, 6, 10, 12]),
            (InstallmentWhiteLabelTtb, &[4, 6, 10]),
            (InstallmentUob, &[3, 4, 6, 10]),
            (InstallmentWhiteLabelUob, &[3, 4, 6, 10]),
        ];
        Self(
            table
                .into_iter()
                .map(|(source_type, terms)| (source_type, terms.to_vec()))
                .collect(),
        )
    }
}
