// SPDX-License-Identifier: MIT OR Apache-2.0
//! Token autocomplete for CloudPipe Editor.
//!
//! Stage parameters such as point-filter expressions and per-cell metric
//! lists are comma-separated token lists. This crate provides:
//! - The two token vocabularies (filter flags, `attribute_metric` tokens)
//! - Suggestion and acceptance over the trailing in-progress fragment
//!
//! It has no dependency on the graph model; any text field bound to a
//! vocabulary can use it.

pub mod completion;
pub mod vocabulary;

pub use completion::{accept, suggest};
pub use vocabulary::{
    attribute_metrics, filter_flags, Vocabulary, ATTRIBUTES, FILTER_FLAGS, METRICS,
};
