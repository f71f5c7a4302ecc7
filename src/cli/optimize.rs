use std::path::PathBuf;

use clap::Parser;

use crate::{
    cli::{input::InputArgs, sweep::SweepRangeArgs, turbine::TurbineArgs},
    core::RatedSpeedOptimizer,
    io::export::{OptimumRecord, write_records},
    prelude::*,
    tables::build_optimum_table,
};

#[derive(Parser)]
pub struct OptimizeArgs {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub turbine: TurbineArgs,

    #[clap(flatten)]
    pub range: SweepRangeArgs,

    /// Also write the per-node optima into this CSV or JSON file.
    #[clap(long = "output", short = 'o')]
    pub output: Option<PathBuf>,
}

impl OptimizeArgs {
    #[instrument(name = "Optimising per node…", skip_all)]
    pub fn run(&self) -> Result {
        let turbine = self.turbine.turbine()?;
        let file = self.input.load()?;
        let hourly_data_points = self.input.hourly_data_points(&file)?;

        let optima = RatedSpeedOptimizer::builder()
            .table(&file.table)
            .sweep(self.range.into())
            .turbine(&turbine)
            .build()
            .run()?;

        println!("{}", build_optimum_table(&optima, hourly_data_points));
        if let Some(output) = &self.output {
            write_records(output, &OptimumRecord::collect(&optima))?;
        }
        Ok(())
    }
}
