use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::{
    error::TariffError,
    prelude::*,
    quantity::rate::RappenPerKilowattHour,
    tariff::{
        DayType,
        FeeCategory,
        FeeValue,
        FlatFeeEntry,
        Hour,
        Season,
        TariffCategory,
        TariffScheduleEntry,
        parse_start_hour,
    },
};

/// Hour-range label to price, for example `"06:00-07:00": 21.4`.
pub type HourlyPrices = BTreeMap<String, RappenPerKilowattHour>;

pub type CategorySchedule = BTreeMap<Season, BTreeMap<DayType, HourlyPrices>>;

/// Tariff sheet as produced by the upstream harmonisation stage.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TariffDocument {
    pub tariffs: Tariffs,
    pub flat_fees: BTreeMap<FeeCategory, FeeValue>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tariffs {
    pub network_usage: CategorySchedule,
    pub energy_supply: CategorySchedule,
}

impl Tariffs {
    pub fn iter(&self) -> impl Iterator<Item = (TariffCategory, &CategorySchedule)> {
        [
            (TariffCategory::NetworkUsage, &self.network_usage),
            (TariffCategory::EnergySupply, &self.energy_supply),
        ]
        .into_iter()
    }
}

impl TariffDocument {
    pub fn parse(raw: &str) -> Result<Self, TariffError> {
        serde_json::from_str(raw).map_err(|error| TariffError::MalformedInput(error.to_string()))
    }

    /// Flatten the nested schedule into one entry per hour.
    pub fn schedule_entries(&self) -> Result<Vec<TariffScheduleEntry>, TariffError> {
        let mut entries = Vec::new();
        for (category, schedule) in self.tariffs.iter() {
            for (season, day_types) in schedule {
                for (day_type, prices) in day_types {
                    let mut seen_hours = BTreeSet::new();
                    for (label, value) in prices {
                        let hour = parse_start_hour(label)?;
                        if !seen_hours.insert(hour) {
                            return Err(TariffError::MalformedInput(format!(
                                "`{label}` repeats {hour} in {category}/{season}/{day_type}",
                            )));
                        }
                        entries.push(TariffScheduleEntry {
                            category,
                            season: *season,
                            day_type: *day_type,
                            hour,
                            value: *value,
                        });
                    }
                    if seen_hours.len() != Hour::all().count() {
                        warn!(
                            %category,
                            %season,
                            %day_type,
                            n_hours = seen_hours.len(),
                            "incomplete hourly prices",
                        );
                    }
                }
            }
        }
        Ok(entries)
    }

    pub fn fee_entries(&self) -> Result<Vec<FlatFeeEntry>, TariffError> {
        let mut entries = Vec::new();
        for (category, value) in &self.flat_fees {
            entries.extend(value.normalize(*category)?);
        }
        Ok(entries)
    }
}
