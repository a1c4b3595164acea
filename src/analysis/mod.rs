//! Frequency/N-gram analysis
//!
//! In-memory counting over a corpus: item and n-gram frequencies, the
//! per-domain structured views, and road name extraction for routes.

pub mod counter;
pub mod frequency;
pub mod roads;
