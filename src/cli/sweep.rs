use std::path::PathBuf;

use clap::Parser;

use crate::{
    cli::{input::InputArgs, turbine::TurbineArgs},
    core::{RatedSpeedSweep, TimeSeriesEvaluator},
    io::export::{SweepRecord, write_records},
    prelude::*,
    quantity::velocity::MetresPerSecond,
    tables::build_sweep_table,
};

#[derive(Copy, Clone, Parser)]
pub struct SweepRangeArgs {
    /// Lowest candidate rated speed in metres per second.
    #[clap(long = "min-rated-speed", default_value = "0.5", env = "MIN_RATED_SPEED")]
    pub min: MetresPerSecond,

    /// Highest candidate rated speed in metres per second, inclusive.
    #[clap(long = "max-rated-speed", default_value = "3.0", env = "MAX_RATED_SPEED")]
    pub max: MetresPerSecond,

    #[clap(long = "rated-speed-step", default_value = "0.01", env = "RATED_SPEED_STEP")]
    pub step: MetresPerSecond,
}

impl From<SweepRangeArgs> for RatedSpeedSweep {
    fn from(args: SweepRangeArgs) -> Self {
        Self { min: args.min, max: args.max, step: args.step }
    }
}

#[derive(Parser)]
pub struct SweepArgs {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub turbine: TurbineArgs,

    #[clap(flatten)]
    pub range: SweepRangeArgs,

    /// Also write the sweep points into this CSV or JSON file.
    #[clap(long = "output", short = 'o')]
    pub output: Option<PathBuf>,
}

impl SweepArgs {
    #[instrument(name = "Evaluating the time series…", skip_all)]
    pub fn run(&self) -> Result {
        let turbine = self.turbine.turbine()?;
        let file = self.input.load()?;
        let hourly_data_points = self.input.hourly_data_points(&file)?;

        let sweep_yield = TimeSeriesEvaluator::builder()
            .table(&file.table)
            .sweep(self.range.into())
            .turbine(&turbine)
            .build()
            .run()?;

        println!("{}", build_sweep_table(&sweep_yield, hourly_data_points));
        if let Some(output) = &self.output {
            write_records(output, &SweepRecord::collect(&sweep_yield))?;
        }
        Ok(())
    }
}
