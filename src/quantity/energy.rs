use crate::quantity::power::Watts;

quantity!(CumulativePower, suffix: "W", precision: 0);
quantity!(WattHours, suffix: "Wh", precision: 1);

impl CumulativePower {
    /// Convert the sum of per-sample power into energy, given the number of samples per hour.
    pub fn to_watt_hours(self, hourly_data_points: f64) -> WattHours {
        WattHours(self.0 / hourly_data_points)
    }
}

impl std::ops::AddAssign<Watts> for CumulativePower {
    fn add_assign(&mut self, rhs: Watts) {
        self.0 += rhs.0;
    }
}
