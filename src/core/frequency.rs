use crate::{
    core::{Error, Histogram, Result},
    prelude::instrument,
    quantity::velocity::MetresPerSecond,
};

/// Relative frequencies of a single node, summing up to one.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeFrequencies {
    pub node: String,
    pub frequencies: Vec<f64>,
}

/// Per-node relative frequency distributions over the histogram bins.
///
/// The absolute sample count is lost here: scale the frequencies back
/// by an external count when converting into energy.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyDistribution {
    velocities: Vec<MetresPerSecond>,
    columns: Vec<NodeFrequencies>,
}

impl FrequencyDistribution {
    pub fn velocities(&self) -> &[MetresPerSecond] {
        &self.velocities
    }

    pub fn columns(&self) -> &[NodeFrequencies] {
        &self.columns
    }
}

impl Histogram {
    /// Divide each node's counts by the node's total count.
    #[instrument(skip_all, fields(n_nodes = self.columns().len(), n_bins = self.n_bins()))]
    pub fn normalize(&self) -> Result<FrequencyDistribution> {
        let columns = self
            .columns()
            .iter()
            .map(|column| {
                let total = column.total();
                if total == 0 {
                    return Err(Error::DivisionByZero { node: column.node.clone() });
                }
                #[expect(clippy::cast_precision_loss)]
                let frequencies =
                    column.counts.iter().map(|count| *count as f64 / total as f64).collect();
                Ok(NodeFrequencies { node: column.node.clone(), frequencies })
            })
            .collect::<Result<_>>()?;
        Ok(FrequencyDistribution { velocities: self.upper_edges().to_vec(), columns })
    }
}
