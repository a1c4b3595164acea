//! Compressed Sparse Row (CSR) form of the step similarity graph
//!
//! PageRank walks every adjacency list once per iteration, so the builder's
//! hash maps are flattened into contiguous arrays before ranking.

use super::builder::GraphBuilder;

/// Undirected weighted graph in CSR layout
///
/// Every undirected edge is stored once in each endpoint's adjacency list.
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of nodes
    pub num_nodes: usize,
    /// Node i's adjacency is `col_idx[row_ptr[i]..row_ptr[i + 1]]`
    pub row_ptr: Vec<usize>,
    /// Neighbor node for each stored edge
    pub col_idx: Vec<u32>,
    /// Similarity weight for each stored edge
    pub weights: Vec<f64>,
    /// Sum of edge weights per node
    pub strength: Vec<f64>,
    /// Step text per node
    pub labels: Vec<String>,
}

impl CsrGraph {
    /// Flatten a builder; neighbors are sorted by node ID for deterministic iteration
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let num_nodes = builder.node_count();
        let mut graph = Self {
            num_nodes,
            row_ptr: Vec::with_capacity(num_nodes + 1),
            col_idx: Vec::with_capacity(builder.edge_count() * 2),
            weights: Vec::with_capacity(builder.edge_count() * 2),
            strength: Vec::with_capacity(num_nodes),
            labels: Vec::with_capacity(num_nodes),
        };
        graph.row_ptr.push(0);

        for (_, node) in builder.nodes() {
            let mut adjacency: Vec<(u32, f64)> = node.edges.iter().map(|(&k, &w)| (k, w)).collect();
            adjacency.sort_unstable_by_key(|&(k, _)| k);

            graph.strength.push(adjacency.iter().map(|&(_, w)| w).sum());
            for (target, weight) in adjacency {
                graph.col_idx.push(target);
                graph.weights.push(weight);
            }
            graph.row_ptr.push(graph.col_idx.len());
            graph.labels.push(node.label.clone());
        }

        graph
    }

    /// Iterate `(neighbor, weight)` pairs of a node
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let span = self.row_ptr[node as usize]..self.row_ptr[node as usize + 1];
        self.col_idx[span.clone()]
            .iter()
            .copied()
            .zip(self.weights[span].iter().copied())
    }

    /// Number of neighbors of a node
    pub fn degree(&self, node: u32) -> usize {
        self.row_ptr[node as usize + 1] - self.row_ptr[node as usize]
    }

    /// Sum of the weights of a node's edges
    pub fn node_strength(&self, node: u32) -> f64 {
        self.strength[node as usize]
    }

    /// Step text of a node
    pub fn label(&self, node: u32) -> &str {
        &self.labels[node as usize]
    }

    /// Number of undirected edges
    pub fn num_edges(&self) -> usize {
        self.col_idx.len() / 2
    }

    /// Nodes with no edges at all
    pub fn isolated_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.degree(n) == 0)
            .collect()
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            weights: Vec::new(),
            strength: Vec::new(),
            labels: Vec::new(),
        }
    }
}
