//! Summarization components
//!
//! Graph-Rank analysis of steps (TF-IDF similarity graph + PageRank) and
//! the synopsis renderer that turns domain reports into prose.

pub mod step_rank;
pub mod synopsis;
pub mod unit_vector;
