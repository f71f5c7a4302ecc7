use std::path::PathBuf;

use clap::Parser;

use crate::{io::velocity::VelocityFile, prelude::*};

#[derive(Parser)]
pub struct InputArgs {
    /// Velocity CSV: a timestamp column and one velocity column per node.
    #[clap(long = "velocities", env = "VELOCITIES_PATH")]
    pub path: PathBuf,

    /// Timestamp column name.
    #[clap(long = "index-column", default_value = "Date", env = "INDEX_COLUMN")]
    pub index_column: String,

    /// Nodes to evaluate, in order. All the nodes by default.
    #[clap(long = "nodes", env = "NODES", value_delimiter = ',', num_args = 1..)]
    pub nodes: Vec<String>,

    /// Number of samples per hour. Inferred from the timestamps by default.
    #[clap(long = "hourly-data-points", env = "HOURLY_DATA_POINTS")]
    pub hourly_data_points: Option<f64>,
}

impl InputArgs {
    pub fn load(&self) -> Result<VelocityFile> {
        VelocityFile::read(&self.path, &self.index_column)?.select(&self.nodes)
    }

    pub fn hourly_data_points(&self, file: &VelocityFile) -> Result<f64> {
        match self.hourly_data_points {
            Some(hourly_data_points) => {
                ensure!(
                    hourly_data_points > 0.0 && hourly_data_points.is_finite(),
                    "hourly data points must be positive, got {hourly_data_points}",
                );
                Ok(hourly_data_points)
            }
            None => file.hourly_data_points(),
        }
    }
}
