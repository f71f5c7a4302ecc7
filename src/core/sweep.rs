use bon::Builder;
use rayon::prelude::*;

use crate::{
    core::{CurveShape, Error, Result, Turbine, VelocityTable},
    ops::{FirstMax, Stepped},
    prelude::{info, instrument},
    quantity::{energy::CumulativePower, velocity::MetresPerSecond},
};

/// Inclusive range of candidate rated speeds.
#[derive(Copy, Clone, Debug)]
pub struct RatedSpeedSweep {
    pub min: MetresPerSecond,
    pub max: MetresPerSecond,
    pub step: MetresPerSecond,
}

impl RatedSpeedSweep {
    pub fn points(self) -> Result<Stepped> {
        if !(self.min.0 > 0.0) {
            return Err(Error::InvalidParameter("minimal rated speed must be positive"));
        }
        Stepped::try_new(self.min, self.max, self.step)
    }
}

/// Energy captured over the whole table with a single rated speed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SweepPoint {
    pub rated_speed: MetresPerSecond,

    /// Energy captured by the piecewise power curve.
    pub energy: CumulativePower,

    /// Energy if every sample produced the rated power.
    pub ideal_energy: CumulativePower,

    /// Ratio of the actual energy to the ideal one.
    pub capacity_factor: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SweepYield {
    points: Vec<SweepPoint>,
}

impl SweepYield {
    /// Points in the sweep order.
    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    /// Sweep point capturing the most energy, the lowest rated speed on ties.
    pub fn best(&self) -> Option<(usize, &SweepPoint)> {
        self.points.iter().first_max_by_key(|point| point.energy)
    }
}

/// Re-evaluates the energy directly from the raw time series, for each rated speed
/// of the sweep.
#[derive(Builder)]
pub struct TimeSeriesEvaluator<'a> {
    table: &'a VelocityTable,
    sweep: RatedSpeedSweep,
    turbine: &'a Turbine,
}

impl TimeSeriesEvaluator<'_> {
    #[instrument(
        name = "Sweeping rated speeds…",
        skip_all,
        fields(
            n_nodes = self.table.n_nodes(),
            n_samples = self.table.n_samples(),
            min = %self.sweep.min,
            max = %self.sweep.max,
        ),
    )]
    pub fn run(self) -> Result<SweepYield> {
        if self.table.is_empty() {
            return Err(Error::EmptySeries);
        }
        let rated_speeds = self.sweep.points()?;

        let points = (0..rated_speeds.len())
            .into_par_iter()
            .map(|index| {
                let rated_speed = rated_speeds.point(index);
                let shape = CurveShape::from_rated_speed(rated_speed);
                let (energy, ideal_energy) = self
                    .table
                    .nodes()
                    .iter()
                    .map(|node| node_yield(&node.samples, &shape, self.turbine))
                    .fold((CumulativePower::ZERO, CumulativePower::ZERO), |lhs, rhs| {
                        (lhs.0 + rhs.0, lhs.1 + rhs.1)
                    });
                SweepPoint {
                    rated_speed,
                    energy,
                    ideal_energy,
                    capacity_factor: energy / ideal_energy,
                }
            })
            .collect::<Vec<_>>();

        let result = SweepYield { points };
        if let Some((_, best)) = result.best() {
            info!(
                n_points = result.points.len(),
                rated_speed = %best.rated_speed,
                energy = %best.energy,
                capacity_factor = best.capacity_factor,
                "done",
            );
        }
        Ok(result)
    }
}

/// Sum of the per-sample power of the curve over the series.
pub fn node_energy(
    samples: &[MetresPerSecond],
    shape: &CurveShape,
    turbine: &Turbine,
) -> CumulativePower {
    samples.iter().fold(CumulativePower::ZERO, |mut energy, sample| {
        energy += shape.power(turbine, *sample);
        energy
    })
}

/// Actual and ideal energy of the series.
///
/// Both are accumulated sample by sample in the same order, so that the actual energy
/// never exceeds the ideal one, even after rounding.
fn node_yield(
    samples: &[MetresPerSecond],
    shape: &CurveShape,
    turbine: &Turbine,
) -> (CumulativePower, CumulativePower) {
    let rated_power = shape.rated_power(turbine);
    samples.iter().fold(
        (CumulativePower::ZERO, CumulativePower::ZERO),
        |(mut energy, mut ideal_energy), sample| {
            energy += shape.power(turbine, *sample);
            ideal_energy += rated_power;
            (energy, ideal_energy)
        },
    )
}
