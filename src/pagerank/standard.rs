//! Standard PageRank algorithm
//!
//! Power iteration over the weighted similarity graph. Each node passes its
//! score to its neighbors in proportion to edge weight; isolated nodes spread
//! theirs uniformly, so every node keeps at least the teleport share.

use super::PageRankResult;
use crate::graph::csr::CsrGraph;

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence threshold on the L1 change between iterations
    pub threshold: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-6,
        }
    }
}

impl StandardPageRank {
    /// Create a new StandardPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Run PageRank on a graph
    ///
    /// Returns the result even if convergence wasn't achieved, with `converged=false`.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        if n == 0 {
            return PageRankResult::new(vec![], 0, 0.0, true);
        }

        let uniform = 1.0 / n as f64;
        let mut scores = vec![uniform; n];
        let mut next = vec![0.0; n];

        let isolated = graph.isolated_nodes();
        let teleport = (1.0 - self.damping) * uniform;
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta > self.threshold {
            iterations += 1;

            // Isolated nodes have nowhere to send their mass
            let stranded: f64 = isolated.iter().map(|&d| scores[d as usize]).sum();
            next.fill(teleport + self.damping * stranded * uniform);

            for (node, &score) in scores.iter().enumerate() {
                let strength = graph.node_strength(node as u32);
                if strength > 0.0 {
                    let share = self.damping * score / strength;
                    for (neighbor, weight) in graph.neighbors(node as u32) {
                        next[neighbor as usize] += share * weight;
                    }
                }
            }

            delta = scores
                .iter()
                .zip(next.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut scores, &mut next);
        }

        // Renormalize against floating-point drift
        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            nodes = n,
            edges = graph.num_edges(),
            iterations,
            delta,
            converged = delta <= self.threshold,
            "pagerank finished"
        );

        PageRankResult::new(scores, iterations, delta, delta <= self.threshold)
    }
}
