use clap::Parser;

use crate::{
    core::Turbine,
    prelude::*,
    quantity::{area::SquareMetres, density::KilogramsPerCubicMetre},
};

#[derive(Copy, Clone, Parser)]
pub struct TurbineArgs {
    /// Rotor swept area in square metres.
    #[clap(long = "swept-area", default_value = "0.7854", env = "SWEPT_AREA")]
    pub swept_area: SquareMetres,

    /// Power coefficient, the fraction of the flow's power converted by the rotor.
    #[clap(long = "power-coefficient", default_value = "0.37", env = "POWER_COEFFICIENT")]
    pub power_coefficient: f64,

    /// Fluid density in kilograms per cubic metre.
    #[clap(long = "density", default_value = "1025", env = "FLUID_DENSITY")]
    pub density: KilogramsPerCubicMetre,
}

impl TurbineArgs {
    pub fn turbine(self) -> Result<Turbine> {
        Ok(Turbine::try_new(self.swept_area, self.power_coefficient, self.density)?)
    }
}
