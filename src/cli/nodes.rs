use std::path::PathBuf;

use clap::Parser;

use crate::{
    io::{
        catalogue::{CatalogueColumns, NodeLocation},
        export::write_records,
    },
    prelude::*,
    tables::build_catalogue_table,
};

#[derive(Parser)]
pub struct NodesArgs {
    /// Geographic catalogue CSV: node tag with its latitude and longitude.
    #[clap(long = "catalogue", env = "CATALOGUE_PATH")]
    pub path: PathBuf,

    #[clap(long = "tag-column", default_value = "tag", env = "TAG_COLUMN")]
    pub tag_column: String,

    #[clap(long = "latitude-column", default_value = "lat", env = "LATITUDE_COLUMN")]
    pub latitude_column: String,

    #[clap(long = "longitude-column", default_value = "lon", env = "LONGITUDE_COLUMN")]
    pub longitude_column: String,

    /// Also write the nodes into this CSV or JSON file.
    #[clap(long = "output", short = 'o')]
    pub output: Option<PathBuf>,
}

impl NodesArgs {
    #[instrument(name = "Listing nodes…", skip_all)]
    pub fn run(&self) -> Result {
        let columns = CatalogueColumns {
            tag: &self.tag_column,
            latitude: &self.latitude_column,
            longitude: &self.longitude_column,
        };
        let locations = NodeLocation::read_all(&self.path, columns)?;
        println!("{}", build_catalogue_table(&locations));
        if let Some(output) = &self.output {
            write_records(output, &locations)?;
        }
        Ok(())
    }
}
