use bon::Builder;
use rayon::prelude::*;

use crate::{
    core::{
        CurveShape,
        Error,
        RatedSpeedSweep,
        Result,
        Turbine,
        VelocityTable,
        sweep::node_energy,
    },
    ops::FirstMax,
    prelude::{debug, instrument},
    quantity::{energy::CumulativePower, velocity::MetresPerSecond},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptimalRatedSpeed {
    pub node: String,
    pub rated_speed: MetresPerSecond,
    pub energy: CumulativePower,
}

/// Searches the rated speed capturing the most energy, for every node on its own.
#[derive(Builder)]
pub struct RatedSpeedOptimizer<'a> {
    table: &'a VelocityTable,
    sweep: RatedSpeedSweep,
    turbine: &'a Turbine,
}

impl RatedSpeedOptimizer<'_> {
    /// Optimal rated speed per node, in the table's node order.
    ///
    /// On ties, the lowest rated speed wins.
    #[instrument(
        name = "Optimising rated speeds…",
        skip_all,
        fields(n_nodes = self.table.n_nodes(), n_samples = self.table.n_samples()),
    )]
    pub fn run(self) -> Result<Vec<OptimalRatedSpeed>> {
        let rated_speeds = self.sweep.points()?;
        self.table
            .nodes()
            .par_iter()
            .map(|node| {
                let (_, (rated_speed, energy)) = rated_speeds
                    .iter()
                    .map(|rated_speed| {
                        let shape = CurveShape::from_rated_speed(rated_speed);
                        (rated_speed, node_energy(&node.samples, &shape, self.turbine))
                    })
                    .first_max_by_key(|(_, energy)| *energy)
                    .ok_or(Error::EmptySweepRange {
                        min: self.sweep.min,
                        max: self.sweep.max,
                        step: self.sweep.step,
                    })?;
                debug!(node = %node.id, %rated_speed, %energy, "optimised");
                Ok(OptimalRatedSpeed { node: node.id.clone(), rated_speed, energy })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        core::Node,
        quantity::{area::SquareMetres, density::KilogramsPerCubicMetre},
    };

    fn turbine() -> Turbine {
        Turbine {
            swept_area: SquareMetres(0.7854),
            power_coefficient: 0.37,
            density: KilogramsPerCubicMetre(1025.0),
        }
    }

    fn sweep(min: f64, max: f64, step: f64) -> RatedSpeedSweep {
        RatedSpeedSweep {
            min: MetresPerSecond(min),
            max: MetresPerSecond(max),
            step: MetresPerSecond(step),
        }
    }

    fn optimize(table: &VelocityTable, sweep: RatedSpeedSweep) -> Result<Vec<OptimalRatedSpeed>> {
        RatedSpeedOptimizer::builder().table(table).sweep(sweep).turbine(&turbine()).build().run()
    }

    #[test]
    fn test_optimum_per_node() -> Result {
        let table = VelocityTable::try_new(vec![
            Node::new("slow", [0.5; 10]),
            Node::new("fast", [1.0; 10]),
        ])?;
        let optima = optimize(&table, sweep(0.25, 1.0, 0.25))?;
        assert_eq!(optima.len(), 2);

        assert_eq!(optima[0].node, "slow");
        assert_eq!(optima[0].rated_speed, MetresPerSecond(0.5));
        assert_relative_eq!(
            optima[0].energy.0,
            10.0 * turbine().power(MetresPerSecond(0.5)).0,
            max_relative = 1e-12,
        );

        assert_eq!(optima[1].node, "fast");
        assert_eq!(optima[1].rated_speed, MetresPerSecond(1.0));
        Ok(())
    }

    #[test]
    fn test_ties_resolve_to_lowest_rated_speed() -> Result {
        // Every candidate keeps the flow within the cubic region, so all energies are equal:
        let table = VelocityTable::try_new(vec![Node::new("a", [1.0; 5])])?;
        let optima = optimize(&table, sweep(1.5, 3.0, 0.5))?;
        assert_eq!(optima[0].rated_speed, MetresPerSecond(1.5));
        assert_relative_eq!(
            optima[0].energy.0,
            5.0 * turbine().power(MetresPerSecond(1.0)).0,
            max_relative = 1e-12,
        );
        Ok(())
    }

    #[test]
    fn test_matches_sequential_search() -> Result {
        let table = VelocityTable::try_new(vec![
            Node::new("a", (0..300).map(|i| 2.0 * (f64::from(i) * 0.05).sin().abs())),
            Node::new("b", (0..300).map(|i| 1.2 + 0.8 * (f64::from(i) * 0.11).cos())),
        ])?;
        let sweep = sweep(0.5, 2.5, 0.05);
        let optima = optimize(&table, sweep)?;
        for (node, optimum) in table.nodes().iter().zip(&optima) {
            let energies = sweep
                .points()?
                .iter()
                .map(|rated_speed| {
                    let shape = CurveShape::from_rated_speed(rated_speed);
                    node_energy(&node.samples, &shape, &turbine())
                })
                .collect::<Vec<_>>();
            let max = energies.iter().copied().max().unwrap();
            let first_index = energies.iter().position(|energy| *energy == max).unwrap();
            assert_eq!(optimum.energy, max);
            assert_eq!(optimum.rated_speed, sweep.points()?.point(first_index));
        }
        Ok(())
    }

    #[test]
    fn test_no_nodes() -> Result {
        assert!(optimize(&VelocityTable::default(), sweep(0.5, 1.0, 0.1))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_sweep() -> Result {
        let table = VelocityTable::try_new(vec![Node::new("a", [1.0])])?;
        assert!(matches!(
            optimize(&table, sweep(1.0, 0.5, 0.1)),
            Err(Error::EmptySweepRange { .. })
        ));
        Ok(())
    }
}
