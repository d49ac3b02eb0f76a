mod document;
mod fee;
mod hour_label;
mod schedule;

use serde::Deserialize;

pub use self::{
    document::TariffDocument,
    fee::{ADDITIONAL_DISCOUNT, BASE_PRICE, CAPACITY_PRICE, FeeValue, FlatFeeEntry, SYSTEM_SERVICE},
    hour_label::parse_start_hour,
    schedule::TariffScheduleEntry,
};
use crate::{error::TariffError, prelude::*};

#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    derive_more::Display,
)]
pub enum TariffCategory {
    #[display("network_usage")]
    NetworkUsage,

    #[display("energy_supply")]
    EnergySupply,
}

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
#[serde(rename_all = "snake_case")]
pub enum FeeCategory {
    #[display("network_usage")]
    NetworkUsage,

    #[display("energy_supply")]
    EnergySupply,

    /// Municipal levies, one candidate value per municipality.
    #[display("levies")]
    Levies,

    #[display("grid_surcharge")]
    GridSurcharge,

    #[display("strategic_reserve")]
    StrategicReserve,
}

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
#[serde(rename_all = "snake_case")]
pub enum Season {
    #[display("winter")]
    Winter,

    #[display("summer")]
    Summer,
}

impl Season {
    #[cfg(test)]
    pub const ALL: [Self; 2] = [Self::Winter, Self::Summer];
}

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
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday to Friday.
    #[display("weekday")]
    Weekday,

    /// Saturday and Sunday.
    #[display("weekend")]
    Weekend,
}

impl DayType {
    pub const DAYS_IN_WEEK: u32 = 7;

    #[must_use]
    pub const fn n_days(self) -> u32 {
        match self {
            Self::Weekday => 5,
            Self::Weekend => Self::DAYS_IN_WEEK - 5,
        }
    }

    /// Fraction of the week covered by the day type.
    #[must_use]
    pub fn share_of_week(self) -> f64 {
        f64::from(self.n_days()) / f64::from(Self::DAYS_IN_WEEK)
    }
}

/// Hour of a day, `0..=23`.
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
#[serde(try_from = "u32")]
#[display("{_0:02}:00")]
pub struct Hour(u8);

impl Hour {
    pub const N_HOURS: u32 = 24;

    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (0..Self::N_HOURS).filter_map(|hour| Self::try_from(hour).ok())
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0 as u32
    }
}

#[derive(Debug, thiserror::Error)]
#[error("hour {0} is outside of a day")]
pub struct HourOutOfRange(pub u32);

impl TryFrom<u32> for Hour {
    type Error = HourOutOfRange;

    fn try_from(hour: u32) -> Result<Self, Self::Error> {
        u8::try_from(hour)
            .ok()
            .filter(|hour| u32::from(*hour) < Self::N_HOURS)
            .map(Self)
            .ok_or(HourOutOfRange(hour))
    }
}

/// Flat records extracted from a tariff document.
#[must_use]
pub struct Tariff {
    pub schedule: Vec<TariffScheduleEntry>,
    pub fees: Vec<FlatFeeEntry>,
}

impl Tariff {
    /// Parse the raw document and flatten it into schedule and fee records.
    #[instrument(skip_all)]
    pub fn extract(raw: &str) -> Result<Self, TariffError> {
        let document = TariffDocument::parse(raw)?;
        let schedule = document.schedule_entries()?;
        let fees = document.fee_entries()?;
        info!(n_schedule_entries = schedule.len(), n_fees = fees.len(), "extracted the tariff");
        Ok(Self { schedule, fees })
    }
}
