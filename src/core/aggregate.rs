use crate::{
    core::{CurveShape, Error, FrequencyDistribution, PowerCurveFamily, Result},
    ops::FirstMax,
    prelude::{info, instrument},
    quantity::energy::CumulativePower,
};

/// Cumulative energy of a single curve over all the nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CurveEnergy {
    pub shape: CurveShape,
    pub energy: CumulativePower,
}

/// Frequency-based energy estimate of every curve in a family, in the family's order.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveFamilyYield {
    entries: Vec<CurveEnergy>,
}

impl CurveFamilyYield {
    /// Scale the relative frequencies back into hourly sample counts, and sum up
    /// `frequency × power` over all the nodes and bins, separately for each curve.
    #[instrument(
        skip_all,
        fields(
            n_nodes = distribution.columns().len(),
            n_curves = family.curves().len(),
            hourly_data_points = hourly_data_points,
        ),
    )]
    pub fn aggregate(
        distribution: &FrequencyDistribution,
        family: &PowerCurveFamily,
        hourly_data_points: f64,
    ) -> Result<Self> {
        if !(hourly_data_points > 0.0) || !hourly_data_points.is_finite() {
            return Err(Error::InvalidParameter("hourly data points must be positive"));
        }
        if distribution.velocities().len() != family.velocities().len() {
            return Err(Error::InvalidParameter("power curves are not aligned with the bins"));
        }
        let entries = family
            .curves()
            .iter()
            .map(|curve| {
                let mut energy = CumulativePower::ZERO;
                for column in distribution.columns() {
                    energy += column
                        .frequencies
                        .iter()
                        .zip(&curve.power)
                        .map(|(frequency, power)| {
                            CumulativePower(frequency * hourly_data_points * power.0)
                        })
                        .sum::<CumulativePower>();
                }
                CurveEnergy { shape: curve.shape, energy }
            })
            .collect();
        let this = Self { entries };
        if let Some((index, best)) = this.best() {
            info!(
                index,
                cut_in = %best.shape.cut_in,
                cut_out = %best.shape.cut_out,
                energy = %best.energy,
                "best curve",
            );
        }
        Ok(this)
    }

    pub fn entries(&self) -> &[CurveEnergy] {
        &self.entries
    }

    /// Curve capturing the most energy, the earliest one on ties.
    pub fn best(&self) -> Option<(usize, &CurveEnergy)> {
        self.entries.iter().first_max_by_key(|entry| entry.energy)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        core::{BinConfig, CurveFamilyConfig, Histogram, Node, Turbine, VelocityTable},
        quantity::{
            area::SquareMetres,
            density::KilogramsPerCubicMetre,
            percentage::Percentage,
            velocity::MetresPerSecond,
        },
    };

    fn turbine() -> Turbine {
        Turbine {
            swept_area: SquareMetres(0.7854),
            power_coefficient: 0.37,
            density: KilogramsPerCubicMetre(1025.0),
        }
    }

    fn family_config() -> CurveFamilyConfig {
        CurveFamilyConfig {
            min_cut_in: MetresPerSecond(0.2),
            min_rate: Percentage(30.0),
            delta_speed: MetresPerSecond(0.025),
        }
    }

    fn distribution(nodes: Vec<Node>) -> Result<FrequencyDistribution> {
        let config =
            BinConfig { bin_size: MetresPerSecond(0.025), max_velocity: MetresPerSecond(2.75) };
        Histogram::build(&VelocityTable::try_new(nodes)?, config)?.normalize()
    }

    #[test]
    fn test_single_bin_matches_curve_value() -> Result {
        // All the samples fall into the bin `[1.0, 1.025)`, whose upper edge is 1.025 m/s:
        let distribution = distribution(vec![Node::new("a", [1.01; 6])])?;
        let family =
            PowerCurveFamily::generate(family_config(), &turbine(), distribution.velocities())?;
        let result = CurveFamilyYield::aggregate(&distribution, &family, 6.0)?;
        assert_eq!(result.entries().len(), family.curves().len());
        for (entry, curve) in result.entries().iter().zip(family.curves()) {
            assert_relative_eq!(entry.energy.0, 6.0 * curve.power[40].0, max_relative = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_sums_over_nodes() -> Result {
        let single = distribution(vec![Node::new("a", [0.5, 1.0, 1.5, 2.0])])?;
        let double = distribution(vec![
            Node::new("a", [0.5, 1.0, 1.5, 2.0]),
            Node::new("b", [2.0, 1.5, 1.0, 0.5]),
        ])?;
        let family = PowerCurveFamily::generate(family_config(), &turbine(), single.velocities())?;
        let single = CurveFamilyYield::aggregate(&single, &family, 4.0)?;
        let double = CurveFamilyYield::aggregate(&double, &family, 4.0)?;
        for (single, double) in single.entries().iter().zip(double.entries()) {
            assert_relative_eq!(double.energy.0, 2.0 * single.energy.0, max_relative = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_best_curve() -> Result {
        // Fast flow favours the highest cut-out, the last curve in the family:
        let distribution = distribution(vec![Node::new("a", [2.7; 10])])?;
        let family =
            PowerCurveFamily::generate(family_config(), &turbine(), distribution.velocities())?;
        let result = CurveFamilyYield::aggregate(&distribution, &family, 1.0)?;
        let (index, best) = result.best().unwrap();
        assert_eq!(index, family.curves().len() - 1);
        assert_eq!(best.shape, family.curves()[index].shape);
        Ok(())
    }

    #[test]
    fn test_best_curve_tie_resolves_to_first() -> Result {
        // Slow flow below every cut-in speed: all the curves capture nothing.
        let distribution = distribution(vec![Node::new("a", [0.05; 10])])?;
        let family =
            PowerCurveFamily::generate(family_config(), &turbine(), distribution.velocities())?;
        let result = CurveFamilyYield::aggregate(&distribution, &family, 1.0)?;
        assert_eq!(result.best().unwrap().0, 0);
        Ok(())
    }

    #[test]
    fn test_invalid_hourly_data_points() -> Result {
        let distribution = distribution(vec![Node::new("a", [1.0])])?;
        let family =
            PowerCurveFamily::generate(family_config(), &turbine(), distribution.velocities())?;
        assert!(CurveFamilyYield::aggregate(&distribution, &family, 0.0).is_err());
        Ok(())
    }

    #[test]
    fn test_misaligned_curves() -> Result {
        let distribution = distribution(vec![Node::new("a", [1.0])])?;
        let velocities = &distribution.velocities()[1..];
        let family = PowerCurveFamily::generate(family_config(), &turbine(), velocities)?;
        assert!(CurveFamilyYield::aggregate(&distribution, &family, 1.0).is_err());
        Ok(())
    }
}
