use crate::{
    core::{CurveShape, Error, Result, Turbine},
    ops::Stepped,
    prelude::{debug, instrument},
    quantity::{percentage::Percentage, power::Watts, velocity::MetresPerSecond},
};

/// The cut-in sweep ends at this multiple of the minimal cut-in speed.
pub const MAX_CUT_IN_FACTOR: f64 = 4.0;

#[derive(Copy, Clone, Debug)]
pub struct CurveFamilyConfig {
    /// First cut-in speed of the sweep.
    pub min_cut_in: MetresPerSecond,

    /// Cut-in speed as a percentage of the cut-out speed.
    pub min_rate: Percentage,

    /// Sweep step, also the resolution the cut-out speeds are rounded to.
    pub delta_speed: MetresPerSecond,
}

/// Power output per velocity bin for one curve shape.
#[derive(Clone, Debug, PartialEq)]
pub struct PowerCurve {
    pub shape: CurveShape,
    pub power: Vec<Watts>,
}

/// Family of candidate power curves evaluated over the same velocities.
#[derive(Clone, Debug, PartialEq)]
pub struct PowerCurveFamily {
    velocities: Vec<MetresPerSecond>,
    curves: Vec<PowerCurve>,
}

impl PowerCurveFamily {
    /// Sweep the cut-in speed from the minimum up to four times it, derive the matching
    /// cut-out speeds, and evaluate every resulting curve at the given velocities.
    #[instrument(
        skip_all,
        fields(
            min_cut_in = %config.min_cut_in,
            min_rate = %config.min_rate,
            n_velocities = velocities.len(),
        ),
    )]
    pub fn generate(
        config: CurveFamilyConfig,
        turbine: &Turbine,
        velocities: &[MetresPerSecond],
    ) -> Result<Self> {
        if !(config.min_cut_in.0 > 0.0) {
            return Err(Error::InvalidParameter("minimal cut-in speed must be positive"));
        }
        if !(config.min_rate.0 > 0.0 && config.min_rate.0 < 100.0) {
            return Err(Error::InvalidParameter("minimal rate must be within (0, 100) percent"));
        }
        let cut_ins = Stepped::try_new(
            config.min_cut_in,
            config.min_cut_in * MAX_CUT_IN_FACTOR,
            config.delta_speed,
        )?;
        let curves = cut_ins
            .iter()
            .map(|cut_in| {
                let shape = CurveShape {
                    cut_in,
                    cut_out: cut_out(cut_in, config.min_rate, config.delta_speed),
                };
                if shape.cut_out <= shape.cut_in {
                    return Err(Error::InvalidParameter(
                        "cut-out speed must exceed the cut-in speed",
                    ));
                }
                let power =
                    velocities.iter().map(|velocity| shape.power(turbine, *velocity)).collect();
                Ok(PowerCurve { shape, power })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(n_curves = curves.len(), "generated");
        Ok(Self { velocities: velocities.to_vec(), curves })
    }

    pub fn velocities(&self) -> &[MetresPerSecond] {
        &self.velocities
    }

    pub fn curves(&self) -> &[PowerCurve] {
        &self.curves
    }
}

/// Cut-out speed for the cut-in speed, rounded half-to-even to the sweep resolution.
fn cut_out(
    cut_in: MetresPerSecond,
    min_rate: Percentage,
    delta_speed: MetresPerSecond,
) -> MetresPerSecond {
    let unrounded = cut_in * (100.0 / min_rate.0);
    delta_speed * (unrounded / delta_speed).round_ties_even()
}
