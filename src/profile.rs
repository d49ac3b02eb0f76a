use std::{collections::BTreeMap, fs::File, io::Read, path::Path};

use serde::Deserialize;

use crate::{
    error::TariffError,
    prelude::*,
    quantity::energy::KilowattHours,
    tariff::{Hour, Season},
};

/// ElCom H4 household: a flat with 4500 kWh consumption per year.
const BUILT_IN_H4: &str = include_str!("../data/consumption_h4.csv");

#[derive(Deserialize)]
struct ProfileRow {
    season: Season,
    hour: Hour,
    weight: KilowattHours,
}

/// Reference household consumption per season and hour of a day.
///
/// Constructed once per run and passed by reference to everything that weighs prices.
#[must_use]
pub struct ConsumptionProfile {
    weights: BTreeMap<(Season, Hour), KilowattHours>,
    annual_total: KilowattHours,
}

impl ConsumptionProfile {
    pub const H4_ANNUAL_TOTAL: KilowattHours = KilowattHours(4500.0);

    /// Allowed difference between the declared total and the table sum.
    const TOTAL_TOLERANCE: KilowattHours = KilowattHours(1e-6);

    #[cfg(test)]
    pub fn h4() -> Result<Self, TariffError> {
        Self::from_reader(BUILT_IN_H4.as_bytes(), Self::H4_ANNUAL_TOTAL)
    }

    /// Read the profile from the file, or fall back to the built-in H4 table.
    #[instrument(skip_all)]
    pub fn load(path: Option<&Path>, annual_total: KilowattHours) -> Result<Self> {
        let this = match path {
            Some(path) => {
                info!(path = %path.display(), "reading the consumption profile…");
                let file = File::open(path)
                    .with_context(|| format!("failed to open `{}`", path.display()))?;
                Self::from_reader(file, annual_total)?
            }
            None => Self::from_reader(BUILT_IN_H4.as_bytes(), annual_total)?,
        };
        info!(
            n_weights = this.weights.len(),
            winter = %this.seasonal_total(Season::Winter),
            summer = %this.seasonal_total(Season::Summer),
            annual_total = %this.annual_total,
            "loaded the profile",
        );
        Ok(this)
    }

    pub fn from_reader(reader: impl Read, annual_total: KilowattHours) -> Result<Self, TariffError> {
        if !annual_total.0.is_finite() || annual_total <= KilowattHours::ZERO {
            return Err(TariffError::CorruptReference(format!(
                "annual total must be positive, got {annual_total}",
            )));
        }
        let mut weights = BTreeMap::new();
        for row in csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader).deserialize()
        {
            let row: ProfileRow =
                row.map_err(|error| TariffError::CorruptReference(error.to_string()))?;
            if !row.weight.0.is_finite() || row.weight < KilowattHours::ZERO {
                return Err(TariffError::CorruptReference(format!(
                    "invalid weight {} for {} at {}",
                    row.weight.0, row.season, row.hour,
                )));
            }
            if weights.insert((row.season, row.hour), row.weight).is_some() {
                return Err(TariffError::CorruptReference(format!(
                    "duplicate weight for {} at {}",
                    row.season, row.hour,
                )));
            }
        }
        let table_total = weights.values().copied().sum::<KilowattHours>();
        let deviation = (table_total - annual_total).0.abs();
        if !deviation.is_finite() || deviation > Self::TOTAL_TOLERANCE.0 {
            return Err(TariffError::CorruptReference(format!(
                "weights sum up to {table_total} instead of {annual_total}",
            )));
        }
        Ok(Self { weights, annual_total })
    }

    pub fn weight_of(&self, season: Season, hour: Hour) -> Result<KilowattHours, TariffError> {
        self.weights.get(&(season, hour)).copied().ok_or(TariffError::LookupMiss { season, hour })
    }

    pub const fn annual_total(&self) -> KilowattHours {
        self.annual_total
    }

    pub fn seasonal_total(&self, season: Season) -> KilowattHours {
        self.weights
            .iter()
            .filter(|((row_season, _), _)| *row_season == season)
            .map(|(_, weight)| *weight)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_built_in_is_complete() {
        let profile = ConsumptionProfile::h4().unwrap();
        for season in Season::ALL {
            for hour in Hour::all() {
                assert!(profile.weight_of(season, hour).is_ok(), "{season} {hour}");
            }
        }
    }

    #[test]
    fn test_seasonal_totals_add_up() {
        let profile = ConsumptionProfile::h4().unwrap();
        let winter = profile.seasonal_total(Season::Winter);
        let summer = profile.seasonal_total(Season::Summer);
        assert_abs_diff_eq!(winter.0, 2500.0);
        assert_abs_diff_eq!(summer.0, 2000.0);
        assert_abs_diff_eq!((winter + summer).0, profile.annual_total().0);
    }

    #[test]
    fn test_lookup_miss() {
        let profile = ConsumptionProfile::from_reader(
            "season,hour,weight\nwinter,0,10\n".as_bytes(),
            KilowattHours(10.0),
        )
        .unwrap();
        let hour = Hour::try_from(1).unwrap();
        assert!(matches!(
            profile.weight_of(Season::Winter, hour),
            Err(TariffError::LookupMiss { season: Season::Winter, .. }),
        ));
    }

    #[test]
    fn test_total_mismatch() {
        let result = ConsumptionProfile::from_reader(
            "season,hour,weight\nwinter,0,10\nsummer,0,10\n".as_bytes(),
            KilowattHours(4500.0),
        );
        assert!(matches!(result, Err(TariffError::CorruptReference(_))));
    }

    #[test]
    fn test_duplicate_row() {
        let result = ConsumptionProfile::from_reader(
            "season,hour,weight\nwinter,0,10\nwinter,0,10\n".as_bytes(),
            KilowattHours(20.0),
        );
        assert!(matches!(result, Err(TariffError::CorruptReference(_))));
    }

    #[test]
    fn test_hour_out_of_range() {
        let result = ConsumptionProfile::from_reader(
            "season,hour,weight\nwinter,24,10\n".as_bytes(),
            KilowattHours(10.0),
        );
        assert!(matches!(result, Err(TariffError::CorruptReference(_))));
    }

    fn h4_with_first_weight(weight: &str) -> String {
        BUILT_IN_H4.replacen("winter,0,110", &format!("winter,0,{weight}"), 1)
    }

    #[test]
    fn test_nan_weight_rejected() {
        let table = h4_with_first_weight("NaN");
        assert_ne!(table, BUILT_IN_H4);
        let result =
            ConsumptionProfile::from_reader(table.as_bytes(), ConsumptionProfile::H4_ANNUAL_TOTAL);
        assert!(matches!(result, Err(TariffError::CorruptReference(_))));
    }

    #[test]
    fn test_infinite_weight_rejected() {
        let result = ConsumptionProfile::from_reader(
            h4_with_first_weight("inf").as_bytes(),
            ConsumptionProfile::H4_ANNUAL_TOTAL,
        );
        assert!(matches!(result, Err(TariffError::CorruptReference(_))));
    }

    #[test]
    fn test_negative_weight_rejected() {
        // The sum still matches the declared total:
        let result = ConsumptionProfile::from_reader(
            "season,hour,weight\nwinter,0,-10\nwinter,1,30\n".as_bytes(),
            KilowattHours(20.0),
        );
        assert!(matches!(result, Err(TariffError::CorruptReference(_))));
    }
}
