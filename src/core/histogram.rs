use crate::{
    core::{Error, Result, VelocityTable},
    prelude::{debug, instrument},
    quantity::velocity::MetresPerSecond,
};

/// Tolerance, in bins, when deciding whether the max velocity falls on an edge.
const TOLERANCE: f64 = 1e-9;

/// Upper bound on the number of bins.
const MAX_BINS: f64 = 1e7;

#[derive(Copy, Clone, Debug)]
pub struct BinConfig {
    pub bin_size: MetresPerSecond,
    pub max_velocity: MetresPerSecond,
}

impl BinConfig {
    /// Bin edges `0, Δv, 2Δv, …` exactly covering `[0, max_velocity]`.
    ///
    /// When the max velocity is not a whole number of bins, the last edge lies beyond it.
    pub fn edges(self) -> Result<Vec<MetresPerSecond>> {
        let error = Error::InvalidBinConfiguration {
            bin_size: self.bin_size,
            max_velocity: self.max_velocity,
        };
        // Negated comparisons also reject `NaN`:
        if !(self.bin_size.is_finite() && self.bin_size.0 > 0.0)
            || !(self.max_velocity.is_finite() && self.max_velocity.0 > 0.0)
        {
            return Err(error);
        }
        let n_bins = ((self.max_velocity / self.bin_size) - TOLERANCE).ceil().max(1.0);
        if !(n_bins <= MAX_BINS) {
            return Err(error);
        }
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n_bins = n_bins as usize;
        #[expect(clippy::cast_precision_loss)]
        Ok((0..=n_bins).map(|index| self.bin_size * index as f64).collect())
    }
}

/// Sample counts of a single node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeCounts {
    pub node: String,

    /// Sample count per bin.
    pub counts: Vec<u64>,

    /// Number of samples outside the histogram range.
    pub n_dropped: usize,
}

impl NodeCounts {
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Velocity histograms sharing the same bin edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    edges: Vec<MetresPerSecond>,
    columns: Vec<NodeCounts>,
}

impl Histogram {
    /// Count the samples of each node per bin.
    ///
    /// Bins are half-open `[edge_i, edge_i+1)` except the last one, which is closed on both
    /// ends. Samples below zero or beyond the last edge are dropped.
    #[instrument(skip_all, fields(n_nodes = table.n_nodes(), n_samples = table.n_samples()))]
    pub fn build(table: &VelocityTable, config: BinConfig) -> Result<Self> {
        let edges = config.edges()?;
        let columns = table
            .nodes()
            .iter()
            .map(|node| {
                let mut counts = vec![0; edges.len() - 1];
                let mut n_dropped = 0;
                for sample in &node.samples {
                    match bin_index(&edges, *sample) {
                        Some(index) => counts[index] += 1,
                        None => n_dropped += 1,
                    }
                }
                if n_dropped != 0 {
                    debug!(node = %node.id, n_dropped, "dropped out-of-range samples");
                }
                NodeCounts { node: node.id.clone(), counts, n_dropped }
            })
            .collect();
        debug!(n_bins = edges.len() - 1, "built");
        Ok(Self { edges, columns })
    }

    pub fn edges(&self) -> &[MetresPerSecond] {
        &self.edges
    }

    /// Upper edge of every bin, used as the bin's representative velocity.
    pub fn upper_edges(&self) -> &[MetresPerSecond] {
        &self.edges[1..]
    }

    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn columns(&self) -> &[NodeCounts] {
        &self.columns
    }
}

fn bin_index(edges: &[MetresPerSecond], sample: MetresPerSecond) -> Option<usize> {
    let n_bins = edges.len() - 1;
    if sample < edges[0] || sample > edges[n_bins] {
        return None;
    }
    // Number of edges not greater than the sample, which is at least one here:
    let index = edges.partition_point(|edge| *edge <= sample) - 1;
    Some(index.min(n_bins - 1))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::Node;

    fn config(bin_size: f64, max_velocity: f64) -> BinConfig {
        BinConfig {
            bin_size: MetresPerSecond(bin_size),
            max_velocity: MetresPerSecond(max_velocity),
        }
    }

    #[test]
    fn test_edges_exact_multiple() -> Result {
        let edges = config(0.025, 2.75).edges()?;
        assert_eq!(edges.len(), 111);
        assert_abs_diff_eq!(edges[110].0, 2.75, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_edges_extra_edge_beyond_max() -> Result {
        let edges = config(0.5, 1.2).edges()?;
        assert_eq!(edges, [0.0, 0.5, 1.0, 1.5].map(MetresPerSecond));
        Ok(())
    }

    #[test]
    fn test_invalid_configuration() {
        let cases = [
            (0.0, 1.0),
            (-0.1, 1.0),
            (0.1, 0.0),
            (0.1, -1.0),
            (f64::INFINITY, 1.0),
            (1e-300, 2.75),
            (f64::MIN_POSITIVE, 2.75),
        ];
        for (bin_size, max_velocity) in cases {
            assert!(matches!(
                config(bin_size, max_velocity).edges(),
                Err(Error::InvalidBinConfiguration { .. })
            ));
        }
    }

    #[test]
    fn test_sample_beyond_max_velocity_counts_in_last_bin() -> Result {
        // The last edge is 1.5, so 1.3 is still within range:
        let table = VelocityTable::try_new(vec![Node::new("a", [0.2, 1.3, 1.5, 1.6])])?;
        let histogram = Histogram::build(&table, config(0.5, 1.2))?;
        let column = &histogram.columns()[0];
        assert_eq!(column.counts, [1, 0, 2]);
        assert_eq!(column.n_dropped, 1);
        Ok(())
    }

    #[test]
    fn test_bin_boundaries() -> Result {
        let table =
            VelocityTable::try_new(vec![Node::new("a", [0.0, 0.49, 0.5, 0.99, 1.0, 1.5, -0.1])])?;
        let histogram = Histogram::build(&table, config(0.5, 1.0))?;
        let column = &histogram.columns()[0];
        // Lower edge is inclusive, the very last edge is inclusive too:
        assert_eq!(column.counts, [2, 3]);
        assert_eq!(column.n_dropped, 2);
        Ok(())
    }

    #[test]
    fn test_count_conservation() -> Result {
        let samples = (0..100).map(|i| f64::from(i) * 0.025).collect::<Vec<_>>();
        let table = VelocityTable::try_new(vec![
            Node::new("a", samples.clone()),
            Node::new("b", samples.iter().rev().copied().chain([3.0, -1.0]).skip(2)),
        ])?;
        let histogram = Histogram::build(&table, config(0.025, 2.75))?;
        assert_eq!(histogram.n_bins(), 110);
        for column in histogram.columns() {
            assert_eq!(column.total() + column.n_dropped as u64, 100);
        }
        Ok(())
    }

    #[test]
    fn test_uniform_two_nodes() -> Result {
        // Deterministic stand-in for uniformly distributed samples in `[0, 2.5]`:
        let uniform = (0..100).map(|i| 2.5 * f64::from(i) / 99.0);
        let shuffled = (0..100).map(|i| 2.5 * f64::from((i * 37) % 100) / 99.0);
        let table =
            VelocityTable::try_new(vec![Node::new("n1", uniform), Node::new("n2", shuffled)])?;
        let histogram = Histogram::build(&table, config(0.025, 2.75))?;
        for column in histogram.columns() {
            assert_eq!(column.total(), 100);
            assert_eq!(column.n_dropped, 0);
        }
        Ok(())
    }

    #[test]
    fn test_empty_table() -> Result {
        let histogram = Histogram::build(&VelocityTable::default(), config(0.1, 1.0))?;
        assert!(histogram.columns().is_empty());
        Ok(())
    }
}
