//! Social network collaborator
//!
//! The simulation core treats topology as an external, read-only
//! collaborator: it asks for the average degree (to size the payoff
//! range) and for neighbor sets (consumed by the strategy-update rules).
//! The payoff function itself is global-mixing and never walks edges.
//!
//! Two topologies are provided: a well-mixed population (every agent is
//! everyone else's neighbor, represented implicitly) and an explicit
//! undirected graph loaded from a plain edge-list file. Network
//! *generation* (scale-free, small-world, ...) is out of scope; generate
//! elsewhere and load the edge list.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or querying a social network
///
/// All of these are fatal at experiment setup: a simulation over a
/// half-read graph is not worth running.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("cannot read network file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed edge at {path}:{line}: {text:?}")]
    MalformedEdge {
        path: PathBuf,
        line: usize,
        text: String,
    },

    #[error("edge ({a}, {b}) references a node outside the population of {size}")]
    NodeOutOfRange { a: usize, b: usize, size: usize },

    #[error("network must have at least one node")]
    Empty,
}

/// Undirected graph as adjacency lists
#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Empty graph over `size` nodes
    pub fn with_nodes(size: usize) -> Result<Self, NetworkError> {
        if size == 0 {
            return Err(NetworkError::Empty);
        }
        Ok(Self {
            adjacency: vec![Vec::new(); size],
        })
    }

    /// Add an undirected edge; self-loops and duplicates are ignored
    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<(), NetworkError> {
        let size = self.adjacency.len();
        if a >= size || b >= size {
            return Err(NetworkError::NodeOutOfRange { a, b, size });
        }
        if a == b || self.adjacency[a].contains(&b) {
            return Ok(());
        }
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
        Ok(())
    }

    /// Load an undirected graph from a plain edge-list file
    ///
    /// One edge per line, two whitespace- or `;`-separated node indices.
    /// Blank lines and `#` comments are skipped.
    pub fn from_edge_list(path: &Path, size: usize) -> Result<Self, NetworkError> {
        let text = fs::read_to_string(path).map_err(|source| NetworkError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut graph = Graph::with_nodes(size)?;
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split(|c: char| c.is_whitespace() || c == ';');
            let parsed = (
                fields.next().and_then(|f| f.trim().parse::<usize>().ok()),
                fields.next().and_then(|f| f.trim().parse::<usize>().ok()),
            );
            match parsed {
                (Some(a), Some(b)) => graph.add_edge(a, b)?,
                _ => {
                    return Err(NetworkError::MalformedEdge {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        text: raw.to_string(),
                    })
                }
            }
        }
        Ok(graph)
    }

    fn size(&self) -> usize {
        self.adjacency.len()
    }

    fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }
}

/// Read-only topology shared by every Monte Carlo run
///
/// # Example
///
/// ```rust
/// use trust_simulator_core::network::SocialNetwork;
///
/// let net = SocialNetwork::well_mixed(10).unwrap();
/// assert_eq!(net.size(), 10);
/// assert_eq!(net.degree(0), 9);
/// assert!((net.average_degree() - 9.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub enum SocialNetwork {
    /// Fully mixed population: every pair of distinct agents is connected
    WellMixed { size: usize },
    /// Explicit topology
    Graph(Graph),
}

impl SocialNetwork {
    /// Well-mixed population over `size` agents
    pub fn well_mixed(size: usize) -> Result<Self, NetworkError> {
        if size == 0 {
            return Err(NetworkError::Empty);
        }
        Ok(SocialNetwork::WellMixed { size })
    }

    /// Topology from an edge-list file over `size` agents
    pub fn from_edge_list(path: &Path, size: usize) -> Result<Self, NetworkError> {
        Ok(SocialNetwork::Graph(Graph::from_edge_list(path, size)?))
    }

    /// Number of nodes
    pub fn size(&self) -> usize {
        match self {
            SocialNetwork::WellMixed { size } => *size,
            SocialNetwork::Graph(graph) => graph.size(),
        }
    }

    /// Degree of one node
    pub fn degree(&self, node: usize) -> usize {
        match self {
            SocialNetwork::WellMixed { size } => size - 1,
            SocialNetwork::Graph(graph) => graph.degree(node),
        }
    }

    /// Mean degree over all nodes
    pub fn average_degree(&self) -> f64 {
        match self {
            SocialNetwork::WellMixed { size } => (*size as f64) - 1.0,
            SocialNetwork::Graph(graph) => {
                let total: usize = graph.adjacency.iter().map(Vec::len).sum();
                total as f64 / graph.size() as f64
            }
        }
    }

    /// Neighbor set of one node
    ///
    /// The well-mixed variant materializes "everyone else"; rules that
    /// only need a single neighbor should use [`random_neighbor`]
    /// instead, which never allocates.
    ///
    /// [`random_neighbor`]: SocialNetwork::random_neighbor
    pub fn neighbors(&self, node: usize) -> Vec<usize> {
        match self {
            SocialNetwork::WellMixed { size } => {
                (0..*size).filter(|&other| other != node).collect()
            }
            SocialNetwork::Graph(graph) => graph.adjacency[node].clone(),
        }
    }

    /// Uniformly random neighbor of `node`, if it has any
    pub fn random_neighbor(&self, node: usize, rng: &mut SmallRng) -> Option<usize> {
        match self {
            SocialNetwork::WellMixed { size } => {
                if *size < 2 {
                    return None;
                }
                let draw = rng.gen_range(0..*size - 1);
                Some(if draw >= node { draw + 1 } else { draw })
            }
            SocialNetwork::Graph(graph) => graph.adjacency[node].choose(rng).copied(),
        }
    }
}
