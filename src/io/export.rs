use std::{fs::File, io::BufWriter, path::Path};

use serde::Serialize;

use crate::{
    core::{CurveFamilyYield, FrequencyDistribution, Histogram, OptimalRatedSpeed, SweepYield},
    prelude::*,
};

/// Write the records into a JSON file if the path ends with `.json`, and into CSV otherwise.
#[instrument(skip_all, fields(path = %path.display(), n_records = records.len()))]
pub fn write_records<R: Serialize>(path: &Path, records: &[R]) -> Result {
    let is_json = path.extension().is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
    if is_json {
        let file = File::create(path)
            .with_context(|| format!("failed to create `{}`", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), records)?;
    } else {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("failed to create `{}`", path.display()))?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }
    info!("exported");
    Ok(())
}

/// Bin of one node in the long format.
#[derive(Serialize)]
pub struct BinRecord<'a> {
    pub node: &'a str,
    pub lower_edge: f64,
    pub upper_edge: f64,
    pub count: u64,
    pub frequency: f64,
}

impl<'a> BinRecord<'a> {
    pub fn collect(histogram: &'a Histogram, distribution: &FrequencyDistribution) -> Vec<Self> {
        let edges = histogram.edges();
        histogram
            .columns()
            .iter()
            .zip(distribution.columns())
            .flat_map(move |(counts, frequencies)| {
                edges.iter().zip(&edges[1..]).zip(&counts.counts).zip(&frequencies.frequencies).map(
                    move |(((lower_edge, upper_edge), count), frequency)| Self {
                        node: &counts.node,
                        lower_edge: lower_edge.0,
                        upper_edge: upper_edge.0,
                        count: *count,
                        frequency: *frequency,
                    },
                )
            })
            .collect()
    }
}

#[derive(Serialize)]
pub struct CurveRecord {
    pub cut_in: f64,
    pub cut_out: f64,

    /// Expected energy over one hour, weighted by the velocity frequencies.
    pub hourly_energy_wh: f64,
}

impl CurveRecord {
    pub fn collect(family_yield: &CurveFamilyYield, hourly_data_points: f64) -> Vec<Self> {
        family_yield
            .entries()
            .iter()
            .map(|entry| Self {
                cut_in: entry.shape.cut_in.0,
                cut_out: entry.shape.cut_out.0,
                hourly_energy_wh: entry.energy.to_watt_hours(hourly_data_points).0,
            })
            .collect()
    }
}

#[derive(Serialize)]
pub struct SweepRecord {
    pub rated_speed: f64,
    pub energy: f64,
    pub ideal_energy: f64,
    pub capacity_factor: f64,
}

impl SweepRecord {
    pub fn collect(sweep_yield: &SweepYield) -> Vec<Self> {
        sweep_yield
            .points()
            .iter()
            .map(|point| Self {
                rated_speed: point.rated_speed.0,
                energy: point.energy.0,
                ideal_energy: point.ideal_energy.0,
                capacity_factor: point.capacity_factor,
            })
            .collect()
    }
}

#[derive(Serialize)]
pub struct OptimumRecord<'a> {
    pub node: &'a str,
    pub rated_speed: f64,
    pub energy: f64,
}

impl<'a> OptimumRecord<'a> {
    pub fn collect(optima: &'a [OptimalRatedSpeed]) -> Vec<Self> {
        optima
            .iter()
            .map(|optimum| Self {
                node: &optimum.node,
                rated_speed: optimum.rated_speed.0,
                energy: optimum.energy.0,
            })
            .collect()
    }
}
