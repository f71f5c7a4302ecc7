use std::path::Path;

use serde::Serialize;

use crate::prelude::*;

/// Column names of the geographic node catalogue.
#[derive(Copy, Clone)]
pub struct CatalogueColumns<'a> {
    pub tag: &'a str,
    pub latitude: &'a str,
    pub longitude: &'a str,
}

/// Monitoring node location.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeLocation {
    pub tag: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NodeLocation {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_all(path: &Path, columns: CatalogueColumns) -> Result<Vec<Self>> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("failed to open `{}`", path.display()))?;
        let headers = reader.headers()?.clone();
        let position = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .with_context(|| format!("there is no column `{name}`"))
        };
        let tag_position = position(columns.tag)?;
        let latitude_position = position(columns.latitude)?;
        let longitude_position = position(columns.longitude)?;

        let mut locations = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("failed to read row #{row}"))?;
            let coordinate = |position: usize| {
                record[position]
                    .trim()
                    .parse::<f64>()
                    .with_context(|| {
                        format!("invalid coordinate `{}` at row #{row}", &record[position])
                    })
            };
            locations.push(Self {
                tag: record[tag_position].trim().to_owned(),
                latitude: coordinate(latitude_position)?,
                longitude: coordinate(longitude_position)?,
            });
        }
        info!(n_nodes = locations.len(), "loaded");
        Ok(locations)
    }
}
