mod bins;
mod curves;
mod histogram;
mod input;
mod nodes;
mod optimize;
mod sweep;
mod turbine;

use clap::{Parser, Subcommand};

use crate::{
    cli::{
        curves::CurvesArgs,
        histogram::HistogramArgs,
        nodes::NodesArgs,
        optimize::OptimizeArgs,
        sweep::SweepArgs,
    },
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// Log debug events too.
    #[clap(long, short, global = true, env = "VERBOSE")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the monitoring nodes of the geographic catalogue.
    #[clap(name = "nodes")]
    Nodes(NodesArgs),

    /// Bin the velocities into per-node histograms and relative frequencies.
    #[clap(name = "histogram")]
    Histogram(Box<HistogramArgs>),

    /// Generate the power curve family and estimate its energy from the velocity frequencies.
    #[clap(name = "curves")]
    Curves(Box<CurvesArgs>),

    /// Evaluate the energy and capacity factor over a sweep of rated speeds.
    #[clap(name = "sweep")]
    Sweep(Box<SweepArgs>),

    /// Find the rated speed capturing the most energy, for each node.
    #[clap(name = "optimize")]
    Optimize(Box<OptimizeArgs>),
}

impl Command {
    pub fn run(self) -> Result {
        match self {
            Self::Nodes(args) => args.run(),
            Self::Histogram(args) => args.run(),
            Self::Curves(args) => args.run(),
            Self::Sweep(args) => args.run(),
            Self::Optimize(args) => args.run(),
        }
    }
}
