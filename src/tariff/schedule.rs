use crate::{
    quantity::rate::RappenPerKilowattHour,
    tariff::{DayType, Hour, Season, TariffCategory},
};

/// Price of one hour of one day type in one season.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TariffScheduleEntry {
    pub category: TariffCategory,
    pub season: Season,
    pub day_type: DayType,
    pub hour: Hour,
    pub value: RappenPerKilowattHour,
}
