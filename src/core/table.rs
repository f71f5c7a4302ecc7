use crate::{
    core::{Error, Result},
    quantity::velocity::MetresPerSecond,
};

/// Velocity time series of a single monitoring node.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: String,
    pub samples: Vec<MetresPerSecond>,
}

impl Node {
    pub fn new(id: impl Into<String>, samples: impl IntoIterator<Item = f64>) -> Self {
        Self { id: id.into(), samples: samples.into_iter().map(MetresPerSecond).collect() }
    }
}

/// Per-node velocity series aligned to the same time index.
///
/// All the nodes have the same number of finite samples. Column order is preserved and
/// defines the order of every per-node result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VelocityTable {
    nodes: Vec<Node>,
    n_samples: usize,
}

impl VelocityTable {
    pub fn try_new(nodes: Vec<Node>) -> Result<Self> {
        let n_samples = nodes.first().map_or(0, |node| node.samples.len());
        for node in &nodes {
            if node.samples.len() != n_samples {
                return Err(Error::MismatchedSeriesLength {
                    node: node.id.clone(),
                    expected: n_samples,
                    actual: node.samples.len(),
                });
            }
            if let Some(index) = node.samples.iter().position(|sample| !sample.is_finite()) {
                return Err(Error::NonFiniteSample { node: node.id.clone(), index });
            }
        }
        Ok(Self { nodes, n_samples })
    }

    /// Pick the nodes by their identifiers, in the requested order.
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Result<Self> {
        let nodes = ids
            .iter()
            .map(|id| {
                self.nodes
                    .iter()
                    .find(|node| node.id == id.as_ref())
                    .cloned()
                    .ok_or_else(|| Error::UnknownNode(id.as_ref().to_owned()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { nodes, n_samples: self.n_samples })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.id.as_str())
    }

    pub const fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub const fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Whether there is no sample at all, either because there are no nodes or no rows.
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty() || self.n_samples == 0
    }
}
