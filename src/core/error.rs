use thiserror::Error;

use crate::quantity::velocity::MetresPerSecond;

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("invalid bin configuration: bin size {bin_size:?} and max velocity {max_velocity:?}")]
    InvalidBinConfiguration { bin_size: MetresPerSecond, max_velocity: MetresPerSecond },

    #[error("node `{node}` has no samples to normalise")]
    DivisionByZero { node: String },

    #[error("node `{node}` has {actual} samples, expected {expected}")]
    MismatchedSeriesLength { node: String, expected: usize, actual: usize },

    #[error("empty sweep from {min:?} to {max:?} with step {step:?}")]
    EmptySweepRange { min: MetresPerSecond, max: MetresPerSecond, step: MetresPerSecond },

    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("node `{node}` has a non-finite sample at #{index}")]
    NonFiniteSample { node: String, index: usize },

    #[error("unknown node `{0}`")]
    UnknownNode(String),

    #[error("the velocity table has no samples")]
    EmptySeries,
}
