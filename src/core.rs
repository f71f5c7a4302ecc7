//! Power-curve generation and energy-capture evaluation.
//!
//! Every stage is a pure transformation returning new values: nothing here performs I/O
//! or holds shared state.

mod aggregate;
mod curve;
mod error;
mod frequency;
mod histogram;
mod optimizer;
mod sweep;
mod table;
mod turbine;

pub use self::{
    aggregate::CurveFamilyYield,
    curve::{CurveFamilyConfig, PowerCurveFamily},
    error::{Error, Result},
    frequency::FrequencyDistribution,
    histogram::{BinConfig, Histogram},
    optimizer::{OptimalRatedSpeed, RatedSpeedOptimizer},
    sweep::{RatedSpeedSweep, SweepYield, TimeSeriesEvaluator},
    table::{Node, VelocityTable},
    turbine::{CurveShape, Turbine},
};
