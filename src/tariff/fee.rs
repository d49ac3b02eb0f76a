use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{error::TariffError, tariff::FeeCategory};

pub const BASE_PRICE: &str = "base_price";
pub const CAPACITY_PRICE: &str = "capacity_price";
pub const SYSTEM_SERVICE: &str = "system_service";
pub const ADDITIONAL_DISCOUNT: &str = "additional_discount";

/// Flat fee value as it appears in the document.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum FeeValue {
    Scalar(f64),
    Indexed(Vec<f64>),
    Keyed(BTreeMap<String, f64>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlatFeeEntry {
    pub category: FeeCategory,

    /// For example, `base_price`, `value` or `value_1`.
    pub label: String,

    pub value: f64,
}

impl FeeValue {
    pub const SCALAR_LABEL: &'static str = "value";

    /// Flatten the value into labelled entries.
    ///
    /// Categories with a fixed set of fees accept only those labels.
    pub fn normalize(&self, category: FeeCategory) -> Result<Vec<FlatFeeEntry>, TariffError> {
        let entries = match self {
            Self::Scalar(value) => Self::normalize_scalar(category, *value),
            Self::Indexed(values) => Self::normalize_indexed(category, values),
            Self::Keyed(values) => Self::normalize_keyed(category, values),
        };
        if let Some(allowed_labels) = Self::allowed_labels(category)
            && let Some(entry) =
                entries.iter().find(|entry| !allowed_labels.contains(&entry.label.as_str()))
        {
            return Err(TariffError::MalformedInput(format!(
                "unexpected fee `{}` in `{category}`, expected one of: {}",
                entry.label,
                allowed_labels.join(", "),
            )));
        }
        Ok(entries)
    }

    const fn allowed_labels(category: FeeCategory) -> Option<&'static [&'static str]> {
        match category {
            FeeCategory::NetworkUsage => {
                Some(&[BASE_PRICE, CAPACITY_PRICE, SYSTEM_SERVICE, ADDITIONAL_DISCOUNT])
            }
            FeeCategory::EnergySupply => Some(&[BASE_PRICE, CAPACITY_PRICE, ADDITIONAL_DISCOUNT]),
            FeeCategory::Levies | FeeCategory::GridSurcharge | FeeCategory::StrategicReserve => None,
        }
    }

    fn normalize_scalar(category: FeeCategory, value: f64) -> Vec<FlatFeeEntry> {
        vec![FlatFeeEntry { category, label: Self::SCALAR_LABEL.to_string(), value }]
    }

    fn normalize_indexed(category: FeeCategory, values: &[f64]) -> Vec<FlatFeeEntry> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| FlatFeeEntry {
                category,
                label: format!("{}_{index}", Self::SCALAR_LABEL),
                value: *value,
            })
            .collect()
    }

    fn normalize_keyed(category: FeeCategory, values: &BTreeMap<String, f64>) -> Vec<FlatFeeEntry> {
        values
            .iter()
            .map(|(label, value)| FlatFeeEntry { category, label: label.clone(), value: *value })
            .collect()
    }
}
