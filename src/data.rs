//! Virome count table ingest.
//!
//! Loads the Taxon/Count CSV with Polars, validates the required columns as
//! a hard stop, and normalizes counts before anything downstream runs.

use anyhow::{Context, Result};
use polars::prelude::*;
use thiserror::Error;

/// Required taxon label column.
pub const TAXON_COL: &str = "Taxon";

/// Required read count column.
pub const COUNT_COL: &str = "Count";

/// Input-shape failure. Raised before any classification or diversity
/// computation; there are no partial results.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("CSV must contain columns: Taxon and Count")]
    MissingColumns { missing: Vec<String> },
}

/// One cleaned input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonRecord {
    pub name: String,
    pub count: u64,
}

/// Cleaned virome count table.
///
/// Rows keep their upload order. Counts are already coerced: non-numeric
/// values become 0 and rows with a count <= 0 are dropped.
#[derive(Debug)]
pub struct ViromeTable {
    df: DataFrame,
}

impl ViromeTable {
    /// Load and clean a count table from a CSV file.
    pub fn from_csv(path: &str) -> Result<Self> {
        println!("Loading virome count table: {}", path);

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.into()))
            .with_context(|| format!("Failed to create CSV reader: {}", path))?
            .finish()
            .with_context(|| format!("Failed to load count table: {}", path))?;

        let table = Self::from_dataframe(df)?;
        println!("  Taxa retained: {}", table.height());
        println!("  Total reads: {}", table.total_reads()?);

        Ok(table)
    }

    /// Clean an already-loaded dataframe (the seam used by tests and
    /// non-file loaders).
    pub fn from_dataframe(df: DataFrame) -> Result<Self> {
        Self::check_columns(&df)?;
        let df = Self::clean(df)?;
        Ok(Self { df })
    }

    /// Verify the required Taxon/Count columns are present.
    fn check_columns(df: &DataFrame) -> Result<(), TableError> {
        let missing: Vec<String> = [TAXON_COL, COUNT_COL]
            .iter()
            .filter(|name| df.column(name).is_err())
            .map(|name| name.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(TableError::MissingColumns { missing })
        }
    }

    /// Coerce counts and drop empty rows.
    ///
    /// Non-numeric count values cast to null, nulls fill with 0, fractional
    /// counts truncate toward zero, then rows with count <= 0 are removed.
    /// Surviving rows keep their input order.
    fn clean(df: DataFrame) -> Result<DataFrame> {
        df.lazy()
            .with_column(col(TAXON_COL).cast(DataType::String))
            .with_column(
                col(COUNT_COL)
                    .cast(DataType::Float64)
                    .fill_null(lit(0.0))
                    .cast(DataType::Int64),
            )
            .filter(col(COUNT_COL).gt(lit(0)))
            .collect()
            .with_context(|| "Failed to clean count table")
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn total_reads(&self) -> Result<u64> {
        let counts = self.df.column(COUNT_COL)?.i64()?;
        Ok(counts.into_iter().flatten().map(|c| c as u64).sum())
    }

    /// Ordered records for classification.
    pub fn records(&self) -> Result<Vec<TaxonRecord>> {
        let names = self.df.column(TAXON_COL)?.str()?;
        let counts = self.df.column(COUNT_COL)?.i64()?;

        let mut records = Vec::with_capacity(self.df.height());
        for idx in 0..self.df.height() {
            let name = names.get(idx).unwrap_or_default().to_string();
            let count = counts.get(idx).unwrap_or(0);
            records.push(TaxonRecord {
                name,
                count: count as u64,
            });
        }

        Ok(records)
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }
}
