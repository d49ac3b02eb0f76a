use std::ops::{Index, IndexMut};

use itertools::Itertools;

use crate::{
    error::TariffError,
    prelude::*,
    profile::ConsumptionProfile,
    quantity::{currency::Francs, energy::KilowattHours, rate::RappenPerKilowattHour},
    tariff::{Hour, Season, TariffCategory, TariffScheduleEntry},
};

/// Fixed daily time band in which the provider differentiates prices.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, derive_more::Display)]
pub enum DayPeriod {
    /// `06:00..12:00`
    #[display("morning")]
    Morning,

    /// `12:00..18:00`
    #[display("afternoon")]
    Afternoon,

    /// `18:00..22:00`
    #[display("evening")]
    Evening,

    /// `22:00..06:00` across midnight.
    #[display("night")]
    Night,
}

impl DayPeriod {
    #[cfg(test)]
    pub const ALL: [Self; 4] = [Self::Morning, Self::Afternoon, Self::Evening, Self::Night];

    pub const fn of(hour: Hour) -> Self {
        match hour.get() {
            6..12 => Self::Morning,
            12..18 => Self::Afternoon,
            18..22 => Self::Evening,
            _ => Self::Night,
        }
    }
}

/// Weighted yearly cost of one tariff category, per season.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct SeasonalTotals {
    pub winter: Francs,
    pub summer: Francs,
}

impl SeasonalTotals {
    pub fn sum(self) -> Francs {
        self.winter + self.summer
    }
}

impl Index<Season> for SeasonalTotals {
    type Output = Francs;

    fn index(&self, season: Season) -> &Self::Output {
        match season {
            Season::Winter => &self.winter,
            Season::Summer => &self.summer,
        }
    }
}

impl IndexMut<Season> for SeasonalTotals {
    fn index_mut(&mut self, season: Season) -> &mut Self::Output {
        match season {
            Season::Winter => &mut self.winter,
            Season::Summer => &mut self.summer,
        }
    }
}

/// Joins hourly prices with the consumption profile and reduces them to seasonal totals.
pub struct PeriodAverager<'a> {
    profile: &'a ConsumptionProfile,
}

impl<'a> PeriodAverager<'a> {
    pub const fn new(profile: &'a ConsumptionProfile) -> Self {
        Self { profile }
    }

    /// Sum the weighted period contributions of the category into one total per season.
    ///
    /// Within each `(period, season, day type)` group, the unweighted mean price is multiplied by
    /// the group consumption share of the day type. Groups without entries contribute nothing.
    #[instrument(skip(self, entries))]
    pub fn seasonal_totals(
        &self,
        category: TariffCategory,
        entries: &[TariffScheduleEntry],
    ) -> Result<SeasonalTotals, TariffError> {
        let joined = entries
            .iter()
            .filter(|entry| entry.category == category)
            .map(|entry| Ok((entry, self.profile.weight_of(entry.season, entry.hour)?)))
            .collect::<Result<Vec<_>, TariffError>>()?;

        let mut totals = SeasonalTotals::default();
        for ((period, season, day_type), group) in joined
            .into_iter()
            .into_group_map_by(|(entry, _)| (DayPeriod::of(entry.hour), entry.season, entry.day_type))
            .into_iter()
            .sorted_unstable_by_key(|(key, _)| *key)
        {
            #[expect(clippy::cast_precision_loss)]
            let n_hours = group.len() as f64;
            let mean_price =
                group.iter().map(|(entry, _)| entry.value).sum::<RappenPerKilowattHour>() / n_hours;
            let consumption = group.iter().map(|(_, weight)| *weight).sum::<KilowattHours>();
            let contribution = mean_price * (consumption * day_type.share_of_week());
            debug!(%period, %season, %day_type, %mean_price, %consumption, %contribution);
            totals[season] += contribution;
        }
        info!(%category, winter = %totals.winter, summer = %totals.summer, "averaged");
        Ok(totals)
    }
}
