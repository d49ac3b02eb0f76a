use std::ops::Mul;

use crate::quantity::{currency::Francs, energy::KilowattHours};

quantity!(RappenPerKilowattHour, suffix: "Rp./kWh", precision: 2);

impl RappenPerKilowattHour {
    /// Round to the hundredth of a rappen.
    pub fn round_to_hundredths(self) -> Self {
        Self((self.0 * 100.0).round() / 100.0)
    }
}

impl Mul<KilowattHours> for RappenPerKilowattHour {
    type Output = Francs;

    fn mul(self, energy: KilowattHours) -> Self::Output {
        Francs(self.0 * energy.0 / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_mul_energy() {
        let cost = RappenPerKilowattHour(20.0) * KilowattHours(600.0);
        assert_abs_diff_eq!(cost.0, 120.0);
    }

    #[test]
    fn test_round_to_hundredths() {
        assert_abs_diff_eq!(RappenPerKilowattHour(43.504_999).round_to_hundredths().0, 43.5);
        assert_abs_diff_eq!(RappenPerKilowattHour(43.505_001).round_to_hundredths().0, 43.51);
    }

    #[test]
    fn test_ordering() {
        assert!(RappenPerKilowattHour(2.0) < RappenPerKilowattHour(3.0));
        assert_abs_diff_eq!(RappenPerKilowattHour(2.0).max(RappenPerKilowattHour(3.0)).0, 3.0);
    }
}
