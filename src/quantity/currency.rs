use std::ops::Div;

use crate::quantity::{energy::KilowattHours, rate::RappenPerKilowattHour};

quantity!(Francs, suffix: "CHF", precision: 2);

impl Div<KilowattHours> for Francs {
    type Output = RappenPerKilowattHour;

    /// Spread the amount over the energy, in hundredths per kilowatt-hour.
    fn div(self, energy: KilowattHours) -> Self::Output {
        RappenPerKilowattHour(self.0 * 100.0 / energy.0)
    }
}
