use clap::Parser;

use crate::{core::BinConfig, quantity::velocity::MetresPerSecond};

#[derive(Copy, Clone, Parser)]
pub struct BinArgs {
    /// Histogram bin width in metres per second.
    #[clap(long = "bin-size", default_value = "0.025", env = "BIN_SIZE")]
    pub bin_size: MetresPerSecond,

    /// Upper bound of the histogram in metres per second.
    #[clap(long = "max-velocity", default_value = "2.75", env = "MAX_VELOCITY")]
    pub max_velocity: MetresPerSecond,
}

impl From<BinArgs> for BinConfig {
    fn from(args: BinArgs) -> Self {
        Self { bin_size: args.bin_size, max_velocity: args.max_velocity }
    }
}
