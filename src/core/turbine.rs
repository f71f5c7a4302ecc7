use crate::{
    core::{Error, Result},
    quantity::{
        area::SquareMetres,
        density::KilogramsPerCubicMetre,
        power::Watts,
        velocity::MetresPerSecond,
    },
};

/// Cut-in speed as a fraction of the rated speed, when the curve is derived from the latter.
pub const RATED_CUT_IN_RATIO: f64 = 0.3;

/// Physical constants of a hydrokinetic turbine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Turbine {
    /// Cross-section of the rotor exposed to the flow.
    pub swept_area: SquareMetres,

    /// Fraction of the flow's kinetic power converted by the rotor.
    pub power_coefficient: f64,

    /// Fluid density.
    pub density: KilogramsPerCubicMetre,
}

impl Turbine {
    pub fn try_new(
        swept_area: SquareMetres,
        power_coefficient: f64,
        density: KilogramsPerCubicMetre,
    ) -> Result<Self> {
        if !(swept_area.0 > 0.0) || !swept_area.0.is_finite() {
            return Err(Error::InvalidParameter("swept area must be positive"));
        }
        if !(power_coefficient > 0.0) || !power_coefficient.is_finite() {
            return Err(Error::InvalidParameter("power coefficient must be positive"));
        }
        if !(density.0 > 0.0) || !density.0.is_finite() {
            return Err(Error::InvalidParameter("fluid density must be positive"));
        }
        Ok(Self { swept_area, power_coefficient, density })
    }

    /// Unconstrained power extracted from the flow: `½ × Cp × A × ρ × v³`.
    pub fn power(&self, velocity: MetresPerSecond) -> Watts {
        Watts(
            0.5 * self.power_coefficient * self.swept_area.0 * self.density.0 * velocity.cubed(),
        )
    }
}

/// Cut-in and cut-out speeds of a power curve.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CurveShape {
    pub cut_in: MetresPerSecond,

    /// Speed at which the output saturates at the rated power.
    pub cut_out: MetresPerSecond,
}

impl CurveShape {
    /// Shape with the cut-out at the rated speed and the cut-in at 30 % of it.
    pub fn from_rated_speed(rated_speed: MetresPerSecond) -> Self {
        Self { cut_in: rated_speed * RATED_CUT_IN_RATIO, cut_out: rated_speed }
    }

    /// Piecewise power output: nothing below the cut-in, cubic up to the cut-out,
    /// and flat at the rated power from the cut-out on.
    pub fn power(&self, turbine: &Turbine, velocity: MetresPerSecond) -> Watts {
        if velocity < self.cut_in {
            Watts::ZERO
        } else if velocity < self.cut_out {
            turbine.power(velocity)
        } else {
            self.rated_power(turbine)
        }
    }

    pub fn rated_power(&self, turbine: &Turbine) -> Watts {
        turbine.power(self.cut_out)
    }
}
