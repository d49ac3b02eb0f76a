use bon::Builder;
use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};

use crate::{
    error::TariffError,
    period::SeasonalTotals,
    prelude::*,
    profile::ConsumptionProfile,
    quantity::{currency::Francs, rate::RappenPerKilowattHour},
    tariff::{
        ADDITIONAL_DISCOUNT,
        BASE_PRICE,
        CAPACITY_PRICE,
        FeeCategory,
        FeeValue,
        FlatFeeEntry,
        SYSTEM_SERVICE,
    },
};

/// Lookup over the flat fee records.
#[derive(Copy, Clone)]
struct FlatFees<'a>(&'a [FlatFeeEntry]);

impl FlatFees<'_> {
    fn values(self, category: FeeCategory) -> impl Iterator<Item = f64> {
        self.0.iter().filter(move |entry| entry.category == category).map(|entry| entry.value)
    }

    fn get(self, category: FeeCategory, label: &'static str) -> Result<f64, TariffError> {
        self.0
            .iter()
            .find(|entry| entry.category == category && entry.label == label)
            .map(|entry| entry.value)
            .ok_or(TariffError::MissingFeeCategory { category, label })
    }

    /// Value of a category which must consist of exactly one fee.
    fn single(self, category: FeeCategory) -> Result<RappenPerKilowattHour, TariffError> {
        match self.values(category).exactly_one() {
            Ok(value) => Ok(RappenPerKilowattHour(value)),
            Err(mut values) => {
                if values.next().is_none() {
                    Err(TariffError::MissingFeeCategory { category, label: FeeValue::SCALAR_LABEL })
                } else {
                    Err(TariffError::MalformedInput(format!("`{category}` must be a single value")))
                }
            }
        }
    }

    fn levy_range(self) -> Result<(RappenPerKilowattHour, RappenPerKilowattHour), TariffError> {
        match self.values(FeeCategory::Levies).map(RappenPerKilowattHour).minmax() {
            MinMaxResult::NoElements => Err(TariffError::EmptyLevySet),
            MinMaxResult::OneElement(levy) => Ok((levy, levy)),
            MinMaxResult::MinMax(min_levy, max_levy) => Ok((min_levy, max_levy)),
        }
    }
}

/// Combines the seasonal totals with the flat fees into the annual price bounds.
#[derive(Builder)]
pub struct PriceAggregator<'a> {
    profile: &'a ConsumptionProfile,
    network_usage: SeasonalTotals,
    energy_supply: SeasonalTotals,
    fees: &'a [FlatFeeEntry],
}

impl PriceAggregator<'_> {
    /// Annual average price of the weighted seasonal totals.
    pub fn yearly_average_tariff(&self, totals: SeasonalTotals) -> RappenPerKilowattHour {
        totals.sum() / self.profile.annual_total()
    }

    /// Yearly base and capacity prices, spread over the annual consumption.
    fn fixed_price(&self, category: FeeCategory) -> Result<RappenPerKilowattHour, TariffError> {
        let fees = FlatFees(self.fees);
        let yearly = Francs(fees.get(category, BASE_PRICE)? + fees.get(category, CAPACITY_PRICE)?);
        Ok(yearly / self.profile.annual_total())
    }

    #[instrument(skip_all)]
    pub fn aggregate(&self) -> Result<PriceBreakdown, TariffError> {
        let fees = FlatFees(self.fees);

        let network_usage = self.fixed_price(FeeCategory::NetworkUsage)?
            + RappenPerKilowattHour(fees.get(FeeCategory::NetworkUsage, SYSTEM_SERVICE)?)
            + self.yearly_average_tariff(self.network_usage)
            - RappenPerKilowattHour(fees.get(FeeCategory::NetworkUsage, ADDITIONAL_DISCOUNT)?);

        let energy_supply = self.fixed_price(FeeCategory::EnergySupply)?
            + self.yearly_average_tariff(self.energy_supply)
            - RappenPerKilowattHour(fees.get(FeeCategory::EnergySupply, ADDITIONAL_DISCOUNT)?);

        let (min_levy, max_levy) = fees.levy_range()?;
        let breakdown = PriceBreakdown {
            network_usage,
            energy_supply,
            min_levy,
            max_levy,
            grid_surcharge: fees.single(FeeCategory::GridSurcharge)?,
            strategic_reserve: fees.single(FeeCategory::StrategicReserve)?,
        };
        info!(low = %breakdown.low(), high = %breakdown.high(), "aggregated");
        Ok(breakdown)
    }
}

/// Components of the annual average price, unrounded.
#[derive(Copy, Clone, Debug)]
#[must_use]
pub struct PriceBreakdown {
    pub network_usage: RappenPerKilowattHour,
    pub energy_supply: RappenPerKilowattHour,
    pub min_levy: RappenPerKilowattHour,
    pub max_levy: RappenPerKilowattHour,
    pub grid_surcharge: RappenPerKilowattHour,
    pub strategic_reserve: RappenPerKilowattHour,
}

impl PriceBreakdown {
    fn with_levy(&self, levy: RappenPerKilowattHour) -> RappenPerKilowattHour {
        self.network_usage + self.energy_supply + levy + self.grid_surcharge + self.strategic_reserve
    }

    pub fn low(&self) -> RappenPerKilowattHour {
        self.with_levy(self.min_levy)
    }

    pub fn high(&self) -> RappenPerKilowattHour {
        self.with_levy(self.max_levy)
    }

    pub fn to_result(self) -> PriceResult {
        PriceResult {
            low: self.low().round_to_hundredths(),
            high: self.high().round_to_hundredths(),
        }
    }
}

/// Annual average price bounds, rounded to hundredths of a rappen.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct PriceResult {
    #[serde(rename = "lowest_price_rp_per_kwh")]
    pub low: RappenPerKilowattHour,

    #[serde(rename = "highest_price_rp_per_kwh")]
    pub high: RappenPerKilowattHour,
}
