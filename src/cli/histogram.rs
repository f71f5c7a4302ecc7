use std::path::PathBuf;

use clap::Parser;

use crate::{
    cli::{bins::BinArgs, input::InputArgs},
    core::Histogram,
    io::export::{BinRecord, write_records},
    prelude::*,
    tables::build_histogram_table,
};

#[derive(Parser)]
pub struct HistogramArgs {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub bins: BinArgs,

    /// Also write the per-node bins into this CSV or JSON file.
    #[clap(long = "output", short = 'o')]
    pub output: Option<PathBuf>,
}

impl HistogramArgs {
    #[instrument(name = "Binning velocities…", skip_all)]
    pub fn run(&self) -> Result {
        let file = self.input.load()?;
        let histogram = Histogram::build(&file.table, self.bins.into())?;
        let distribution = histogram.normalize()?;
        println!("{}", build_histogram_table(&histogram, &distribution));
        if let Some(output) = &self.output {
            write_records(output, &BinRecord::collect(&histogram, &distribution))?;
        }
        Ok(())
    }
}
