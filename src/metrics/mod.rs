//! Metric modules for virome profiling.
//!
//! Each metric is a pure function over the annotated table or its count
//! column; nothing here holds state between calls.

pub mod abundance;
pub mod diversity;

// Re-export metric functions
pub use abundance::{family_abundance, host_distribution, rank_abundance, relevance_distribution};
pub use diversity::{alpha_diversity, AlphaDiversity};
