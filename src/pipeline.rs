use crate::{
    aggregate::{PriceAggregator, PriceBreakdown},
    error::TariffError,
    period::PeriodAverager,
    prelude::*,
    profile::ConsumptionProfile,
    tariff::{Tariff, TariffCategory},
};

/// Run the tariff document through extraction, period averaging, and aggregation.
#[instrument(skip_all)]
pub fn estimate(input: &str, profile: &ConsumptionProfile) -> Result<PriceBreakdown, TariffError> {
    let tariff = Tariff::extract(input)?;
    let averager = PeriodAverager::new(profile);
    PriceAggregator::builder()
        .profile(profile)
        .network_usage(averager.seasonal_totals(TariffCategory::NetworkUsage, &tariff.schedule)?)
        .energy_supply(averager.seasonal_totals(TariffCategory::EnergySupply, &tariff.schedule)?)
        .fees(&tariff.fees)
        .build()
        .aggregate()
}
