//! Virome Explorer core engine.
//!
//! Classification-and-diversity engine for exploratory virome analysis:
//! ingests a Kraken-style taxon/read-count table, annotates each taxon with
//! inferred host association and One Health risk tags, computes alpha
//! diversity, and derives the table views, summary text, and CSV exports a
//! presentation layer renders.
//!
//! - `data`: table ingest and count cleaning with Polars
//! - `classify`: ordered keyword rules mapping taxon labels to annotations
//! - `profile`: per-upload coordinator applying the classifier row by row
//! - `metrics/`: alpha diversity and community aggregations
//! - `summary`: plain-text One Health report
//! - `export`: annotated CSV and summary downloads

pub mod classify;
pub mod data;
pub mod export;
pub mod metrics;
pub mod profile;
pub mod summary;

// Re-export commonly used types
pub use classify::{
    HostConfidence, HostGroup, OneHealthRelevance, SpilloverPotential, TaxonAnnotation,
    TaxonClassifier,
};
pub use data::{TaxonRecord, ViromeTable, COUNT_COL, TAXON_COL};
pub use metrics::{alpha_diversity, AlphaDiversity};
pub use profile::{AnnotatedTaxon, ViromeOverview, ViromeProfile};
pub use summary::OneHealthSummary;
