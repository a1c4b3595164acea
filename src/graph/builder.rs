//! Graph builder with efficient edge handling
//!
//! This module provides a mutable graph builder that uses FxHashMap
//! for O(1) edge lookups during construction, and the similarity graph
//! construction over distinct steps.

use crate::summarizer::unit_vector::UnitVector;
use rustc_hash::FxHashMap;

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The step text for this node
    pub label: String,
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

impl BuilderNode {
    /// Create a new node
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            edges: FxHashMap::default(),
        }
    }
}

/// A mutable graph builder optimized for incremental construction
#[derive(Debug)]
pub struct GraphBuilder {
    /// Maps label -> node ID
    label_to_id: FxHashMap<String, u32>,
    /// Node storage
    nodes: Vec<BuilderNode>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self {
            label_to_id: FxHashMap::default(),
            nodes: Vec::new(),
        }
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            label_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create a node for the given label, returning its ID
    pub fn get_or_create_node(&mut self, label: &str) -> u32 {
        if let Some(&id) = self.label_to_id.get(label) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.label_to_id.insert(label.to_string(), id);
        self.nodes.push(BuilderNode::new(label));
        id
    }

    /// Increment the edge weight between two nodes
    ///
    /// If the edge doesn't exist, it's created with `weight`.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return; // No self-loops
        }

        // Add edge in both directions (undirected graph)
        if let Some(node) = self.nodes.get_mut(from as usize) {
            *node.edges.entry(to).or_insert(0.0) += weight;
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            *node.edges.entry(from).or_insert(0.0) += weight;
        }
    }

    /// Build the similarity graph over distinct steps
    ///
    /// `steps` and `vectors` are parallel slices. One node is created per
    /// distinct step in first-occurrence order; each unordered pair gets a
    /// single edge weighted by cosine similarity when that similarity is
    /// strictly above `threshold`. Duplicate steps reuse the first vector.
    pub fn from_similarity<S: AsRef<str>>(
        steps: &[S],
        vectors: &[UnitVector],
        threshold: f64,
    ) -> Self {
        let mut builder = Self::with_capacity(steps.len());
        let mut node_vectors: Vec<&UnitVector> = Vec::with_capacity(steps.len());

        for (step, vector) in steps.iter().zip(vectors) {
            let before = builder.node_count();
            builder.get_or_create_node(step.as_ref());
            if builder.node_count() > before {
                node_vectors.push(vector);
            }
        }

        for i in 0..node_vectors.len() {
            for j in (i + 1)..node_vectors.len() {
                let similarity = node_vectors[i].cosine_similarity(node_vectors[j]);
                if similarity > threshold {
                    builder.increment_edge(i as u32, j as u32, similarity);
                }
            }
        }

        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges (counting each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }
}
