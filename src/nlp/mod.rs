//! Natural Language Processing components
//!
//! This module provides step structure extraction, word tokenization and
//! stopword filtering.

pub mod stopwords;
pub mod structure;
pub mod tokenizer;
