use std::{collections::BTreeMap, fs::File, io::Read, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    aggregate::PriceResult,
    prelude::*,
    quantity::rate::RappenPerKilowattHour,
    text::first_digit_run,
};

/// Network operator number, as assigned by ElCom.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Deserialize,
    derive_more::Display,
)]
pub struct ProviderId(pub u64);

impl ProviderId {
    /// Stands in for file names that carry no operator number.
    pub const UNKNOWN: Self = Self(0);

    /// Take the first run of digits in the file name.
    pub fn from_file_name(path: &Path) -> Self {
        let file_name = path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
        let Some(digits) = first_digit_run(&file_name) else {
            warn!(%file_name, sentinel = %Self::UNKNOWN, "no provider id in the file name");
            return Self::UNKNOWN;
        };
        digits.parse::<u64>().map_or_else(
            |error| {
                warn!(
                    %file_name,
                    digits,
                    %error,
                    sentinel = %Self::UNKNOWN,
                    "provider id in the file name is out of range",
                );
                Self::UNKNOWN
            },
            Self,
        )
    }
}

#[derive(Deserialize)]
struct ReferenceRow {
    provider_id: ProviderId,
    reference_tariff: RappenPerKilowattHour,
}

/// Official average tariffs, possibly several per provider.
#[must_use]
pub struct ReferenceTable(BTreeMap<ProviderId, Vec<RappenPerKilowattHour>>);

impl ReferenceTable {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
        let this = Self::from_reader(file)
            .with_context(|| format!("failed to read the reference table `{}`", path.display()))?;
        info!(n_providers = this.0.len(), "read the reference table");
        Ok(this)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut tariffs = BTreeMap::<_, Vec<_>>::new();
        for row in csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader).deserialize()
        {
            let row: ReferenceRow = row?;
            tariffs.entry(row.provider_id).or_default().push(row.reference_tariff);
        }
        Ok(Self(tariffs))
    }

    /// Lowest and highest reference tariff of the provider.
    #[must_use]
    pub fn range_of(
        &self,
        provider_id: ProviderId,
    ) -> Option<(RappenPerKilowattHour, RappenPerKilowattHour)> {
        let tariffs = self.0.get(&provider_id)?;
        Some((tariffs.iter().copied().min()?, tariffs.iter().copied().max()?))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Verdict {
    Match,
    Mismatch,

    /// No reference to compare with.
    Unknown,
}

impl Verdict {
    /// Maximal accepted deviation from the reference.
    pub const TOLERANCE: RappenPerKilowattHour = RappenPerKilowattHour(0.01);

    /// Absorbs the representation error of decimal fractions.
    const EPSILON: f64 = 1e-9;

    pub fn compare(reference: RappenPerKilowattHour, computed: RappenPerKilowattHour) -> Self {
        if (reference - computed).0.abs() <= Self::TOLERANCE.0 + Self::EPSILON {
            Self::Match
        } else {
            Self::Mismatch
        }
    }
}

impl From<Verdict> for Option<bool> {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Match => Some(true),
            Verdict::Mismatch => Some(false),
            Verdict::Unknown => None,
        }
    }
}

impl From<Option<bool>> for Verdict {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Match,
            Some(false) => Self::Mismatch,
            None => Self::Unknown,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    #[serde(rename = "lowest_price_matches")]
    pub low: Verdict,

    #[serde(rename = "highest_price_matches")]
    pub high: Verdict,
}

impl ValidationOutcome {
    pub const UNKNOWN: Self = Self { low: Verdict::Unknown, high: Verdict::Unknown };
}

pub struct Validator<'a> {
    reference: &'a ReferenceTable,
}

impl<'a> Validator<'a> {
    pub const fn new(reference: &'a ReferenceTable) -> Self {
        Self { reference }
    }

    /// Compare the computed bounds with the provider's lowest and highest reference tariffs.
    #[instrument(skip(self))]
    pub fn validate(&self, provider_id: ProviderId, computed: PriceResult) -> ValidationOutcome {
        if provider_id == ProviderId::UNKNOWN {
            warn!("provider is unknown, skipping the comparison");
            return ValidationOutcome::UNKNOWN;
        }
        let Some((min_reference, max_reference)) = self.reference.range_of(provider_id) else {
            warn!(%provider_id, "provider is missing from the reference table");
            return ValidationOutcome::UNKNOWN;
        };
        let outcome = ValidationOutcome {
            low: Verdict::compare(min_reference, computed.low),
            high: Verdict::compare(max_reference, computed.high),
        };
        info!(%min_reference, %max_reference, ?outcome.low, ?outcome.high, "validated");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    const REFERENCE: &str = "\
        provider_id,reference_tariff\n\
        486,43.51\n\
        486,44.50\n\
        7,43.60\n\
        7,44.50\n\
        0,43.50\n\
        0,44.50\n";

    fn computed() -> PriceResult {
        PriceResult { low: RappenPerKilowattHour(43.5), high: RappenPerKilowattHour(44.5) }
    }

    #[test]
    fn test_provider_id_from_file_name() {
        assert_eq!(
            ProviderId::from_file_name(&PathBuf::from("/data/2024/output_486_tariff.json")),
            ProviderId(486),
        );
        assert_eq!(ProviderId::from_file_name(&PathBuf::from("0042.json")), ProviderId(42));
    }

    #[test]
    fn test_provider_id_ignores_directories() {
        assert_eq!(
            ProviderId::from_file_name(&PathBuf::from("/data/2024/output.json")),
            ProviderId::UNKNOWN,
        );
    }

    #[test]
    fn test_provider_id_overflow() {
        assert_eq!(
            ProviderId::from_file_name(&PathBuf::from("output_99999999999999999999999.json")),
            ProviderId::UNKNOWN,
        );
    }

    #[test]
    fn test_sentinel_never_matches() {
        let reference = ReferenceTable::from_reader(REFERENCE.as_bytes()).unwrap();
        let outcome = Validator::new(&reference).validate(ProviderId::UNKNOWN, computed());
        assert_eq!(outcome, ValidationOutcome::UNKNOWN);
    }

    #[test]
    fn test_match_within_tolerance() {
        let reference = ReferenceTable::from_reader(REFERENCE.as_bytes()).unwrap();
        let outcome = Validator::new(&reference).validate(ProviderId(486), computed());
        assert_eq!(outcome, ValidationOutcome { low: Verdict::Match, high: Verdict::Match });
    }

    #[test]
    fn test_mismatch() {
        let reference = ReferenceTable::from_reader(REFERENCE.as_bytes()).unwrap();
        let outcome = Validator::new(&reference).validate(ProviderId(7), computed());
        assert_eq!(outcome, ValidationOutcome { low: Verdict::Mismatch, high: Verdict::Match });
    }

    #[test]
    fn test_unknown_provider() {
        let reference = ReferenceTable::from_reader(REFERENCE.as_bytes()).unwrap();
        let outcome = Validator::new(&reference).validate(ProviderId(1), computed());
        assert_eq!(outcome, ValidationOutcome::UNKNOWN);
    }

    #[test]
    fn test_compare() {
        assert_eq!(
            Verdict::compare(RappenPerKilowattHour(43.49), RappenPerKilowattHour(43.5)),
            Verdict::Match,
        );
        assert_eq!(
            Verdict::compare(RappenPerKilowattHour(43.514), RappenPerKilowattHour(43.5)),
            Verdict::Mismatch,
        );
    }

    #[test]
    fn test_verdict_serialization() {
        let outcome = ValidationOutcome { low: Verdict::Match, high: Verdict::Unknown };
        assert_eq!(
            serde_json::to_value(outcome).unwrap(),
            serde_json::json!({ "lowest_price_matches": true, "highest_price_matches": null }),
        );
    }
}
