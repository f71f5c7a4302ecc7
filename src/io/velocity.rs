use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use itertools::Itertools;

use crate::{
    core::{Node, VelocityTable},
    prelude::*,
};

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Velocity table together with its time index.
pub struct VelocityFile {
    pub timestamps: Vec<NaiveDateTime>,
    pub table: VelocityTable,
}

impl VelocityFile {
    /// Read the velocity CSV: one timestamp column and one velocity column per node.
    #[instrument(skip_all, fields(path = %path.display(), index_column = index_column))]
    pub fn read(path: &Path, index_column: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("failed to open `{}`", path.display()))?;
        let headers = reader.headers()?.clone();
        let index_position = headers
            .iter()
            .position(|header| header == index_column)
            .with_context(|| format!("there is no index column `{index_column}`"))?;
        let node_ids = headers
            .iter()
            .enumerate()
            .filter(|(position, _)| *position != index_position)
            .map(|(_, header)| header.to_owned())
            .collect_vec();

        let mut timestamps = Vec::new();
        let mut columns = vec![Vec::new(); node_ids.len()];
        for (row, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("failed to read row #{row}"))?;
            timestamps.push(parse_timestamp(&record[index_position])?);
            let values =
                record.iter().enumerate().filter(|(position, _)| *position != index_position);
            for ((_, cell), (column, node_id)) in values.zip(columns.iter_mut().zip(&node_ids)) {
                let value = cell
                    .trim()
                    .parse::<f64>()
                    .with_context(|| {
                        format!("invalid velocity `{cell}` at row #{row}, node `{node_id}`")
                    })?;
                column.push(value);
            }
        }

        let nodes = node_ids
            .into_iter()
            .zip(columns)
            .map(|(id, samples)| Node::new(id, samples))
            .collect();
        let table = VelocityTable::try_new(nodes)?;
        info!(n_nodes = table.n_nodes(), n_samples = table.n_samples(), "loaded");
        debug!(nodes = %table.ids().join(", "), "columns");
        Ok(Self { timestamps, table })
    }

    /// Keep the selected nodes only, in the selection order. Empty selection keeps all.
    pub fn select<S: AsRef<str>>(self, nodes: &[S]) -> Result<Self> {
        if nodes.is_empty() {
            return Ok(self);
        }
        Ok(Self { table: self.table.select(nodes)?, ..self })
    }

    /// Number of samples per hour, from the median interval between the timestamps.
    pub fn hourly_data_points(&self) -> Result<f64> {
        let mut intervals =
            self.timestamps.iter().tuple_windows().map(|(lhs, rhs)| *rhs - *lhs).collect_vec();
        ensure!(
            !intervals.is_empty(),
            "at least two timestamps are needed to infer the sampling interval",
        );
        let middle = intervals.len() / 2;
        let median = *intervals.select_nth_unstable(middle).1;
        ensure!(median > TimeDelta::zero(), "the sampling interval must be positive, got {median}");
        let hourly_data_points = 3600.0 / median.as_seconds_f64();
        debug!(%median, hourly_data_points, "inferred the sampling interval");
        Ok(hourly_data_points)
    }
}

fn parse_timestamp(cell: &str) -> Result<NaiveDateTime> {
    let cell = cell.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(cell, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(cell).ok().map(|timestamp| timestamp.naive_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(cell, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .with_context(|| format!("invalid timestamp `{cell}`"))
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use super::*;

    fn write_temporary(name: &str, contents: &str) -> Result<PathBuf> {
        let path = std::env::temp_dir().join(format!("tidal-yield-{}-{name}", std::process::id()));
        fs::write(&path, contents)?;
        Ok(path)
    }

    #[test]
    fn test_read() -> Result {
        let path = write_temporary(
            "read.csv",
            "Date,n1,n2\n\
             2020-01-01 00:00:00,0.5,1.0\n\
             2020-01-01 00:10:00,0.6,1.1\n\
             2020-01-01 00:20:00,0.7,1.2\n",
        )?;
        let file = VelocityFile::read(&path, "Date")?;
        fs::remove_file(&path)?;

        assert_eq!(file.timestamps.len(), 3);
        assert_eq!(file.table.ids().collect_vec(), ["n1", "n2"]);
        assert_eq!(file.table.n_samples(), 3);
        assert_eq!(file.hourly_data_points()?, 6.0);
        Ok(())
    }

    #[test]
    fn test_select() -> Result {
        let path = write_temporary("select.csv", "n1,Date,n2\n0.5,2020-01-01 00:00,1.0\n")?;
        let file = VelocityFile::read(&path, "Date")?.select(&["n2"])?;
        fs::remove_file(&path)?;
        assert_eq!(file.table.ids().collect_vec(), ["n2"]);
        Ok(())
    }

    #[test]
    fn test_invalid_velocity() -> Result {
        let path = write_temporary("invalid.csv", "Date,n1\n2020-01-01 00:00,fast\n")?;
        let result = VelocityFile::read(&path, "Date");
        fs::remove_file(&path)?;
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_missing_index_column() -> Result {
        let path = write_temporary("missing.csv", "Time,n1\n2020-01-01 00:00,1.0\n")?;
        let result = VelocityFile::read(&path, "Date");
        fs::remove_file(&path)?;
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_parse_timestamp() -> Result {
        let expected = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap().and_hms_opt(3, 4, 0).unwrap();
        assert_eq!(parse_timestamp("2020-01-02 03:04:00")?, expected);
        assert_eq!(parse_timestamp("2020-01-02 03:04")?, expected);
        assert_eq!(parse_timestamp("2020-01-02T03:04:00Z")?, expected);
        assert!(parse_timestamp("yesterday").is_err());
        Ok(())
    }

    #[test]
    fn test_hourly_data_points_needs_two_timestamps() {
        let file = VelocityFile { timestamps: vec![], table: VelocityTable::default() };
        assert!(file.hourly_data_points().is_err());
    }
}
