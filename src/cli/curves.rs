use std::path::PathBuf;

use clap::Parser;

use crate::{
    cli::{bins::BinArgs, input::InputArgs, turbine::TurbineArgs},
    core::{CurveFamilyConfig, CurveFamilyYield, Histogram, PowerCurveFamily},
    io::export::{CurveRecord, write_records},
    prelude::*,
    quantity::{percentage::Percentage, velocity::MetresPerSecond},
    tables::build_curve_family_table,
};

#[derive(Parser)]
pub struct CurvesArgs {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub bins: BinArgs,

    #[clap(flatten)]
    pub turbine: TurbineArgs,

    /// First cut-in speed of the family, in metres per second.
    #[clap(long = "min-cut-in", default_value = "0.2", env = "MIN_CUT_IN")]
    pub min_cut_in: MetresPerSecond,

    /// Cut-in speed as a percentage of the cut-out speed.
    #[clap(long = "min-rate-percent", default_value = "30", env = "MIN_RATE_PERCENT")]
    pub min_rate: Percentage,

    /// Cut-in step, also the resolution of the cut-out speeds.
    #[clap(long = "delta-speed", default_value = "0.025", env = "DELTA_SPEED")]
    pub delta_speed: MetresPerSecond,

    /// Also write the curve energies into this CSV or JSON file.
    #[clap(long = "output", short = 'o')]
    pub output: Option<PathBuf>,
}

impl CurvesArgs {
    #[instrument(name = "Evaluating the curve family…", skip_all)]
    pub fn run(&self) -> Result {
        let turbine = self.turbine.turbine()?;
        let file = self.input.load()?;
        let hourly_data_points = self.input.hourly_data_points(&file)?;

        let distribution = Histogram::build(&file.table, self.bins.into())?.normalize()?;
        let config = CurveFamilyConfig {
            min_cut_in: self.min_cut_in,
            min_rate: self.min_rate,
            delta_speed: self.delta_speed,
        };
        let family = PowerCurveFamily::generate(config, &turbine, distribution.velocities())?;
        let family_yield =
            CurveFamilyYield::aggregate(&distribution, &family, hourly_data_points)?;

        println!("{}", build_curve_family_table(&family_yield, hourly_data_points));
        if let Some(output) = &self.output {
            write_records(output, &CurveRecord::collect(&family_yield, hourly_data_points))?;
        }
        Ok(())
    }
}
