//! Graph construction and representation
//!
//! This module builds the step similarity graph and stores it in the
//! CSR layout PageRank iterates over.

pub mod builder;
pub mod csr;
