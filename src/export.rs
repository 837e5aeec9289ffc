//! Download artifacts: the annotated CSV table and the summary text.
//! Re-parsing the exported CSV reproduces every original and derived field
//! for every row; no other wire or file formats are produced here.

use crate::profile::ViromeProfile;
use crate::summary::OneHealthSummary;
use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs;
use std::path::Path;

/// Column order of the annotated download table.
pub const ANNOTATED_COLUMNS: [&str; 7] = [
    "Taxon",
    "Count",
    "Family_Assigned",
    "Host_Inference",
    "Host_Confidence",
    "OneHealth_Relevance",
    "Spillover_Potential",
];

/// Build the full annotated table, one row per profile row in upload
/// order.
pub fn annotated_dataframe(profile: &ViromeProfile) -> Result<DataFrame> {
    let rows = profile.rows();

    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    let counts: Vec<i64> = rows.iter().map(|r| r.count as i64).collect();
    let families: Vec<&str> = rows.iter().map(|r| r.annotation.family.as_str()).collect();
    let hosts: Vec<&str> = rows.iter().map(|r| r.annotation.host.as_str()).collect();
    let confidence: Vec<&str> = rows
        .iter()
        .map(|r| r.annotation.confidence.as_str())
        .collect();
    let relevance: Vec<&str> = rows
        .iter()
        .map(|r| r.annotation.one_health_relevance.as_str())
        .collect();
    let spillover: Vec<&str> = rows
        .iter()
        .map(|r| r.annotation.spillover_potential.as_str())
        .collect();

    DataFrame::new(vec![
        Column::new("Taxon".into(), names),
        Column::new("Count".into(), counts),
        Column::new("Family_Assigned".into(), families),
        Column::new("Host_Inference".into(), hosts),
        Column::new("Host_Confidence".into(), confidence),
        Column::new("OneHealth_Relevance".into(), relevance),
        Column::new("Spillover_Potential".into(), spillover),
    ])
    .with_context(|| "Failed to assemble annotated table")
}

/// Serialize the annotated table to CSV bytes.
pub fn annotated_csv_bytes(profile: &ViromeProfile) -> Result<Vec<u8>> {
    let mut df = annotated_dataframe(profile)?;

    let mut buf = Vec::new();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| "Failed to serialize annotated table")?;

    Ok(buf)
}

/// Write the annotated table CSV to disk.
pub fn write_annotated_csv(profile: &ViromeProfile, path: &Path) -> Result<()> {
    let bytes = annotated_csv_bytes(profile)?;
    fs::write(path, bytes)
        .with_context(|| format!("Failed to write annotated table: {:?}", path))?;
    println!("Wrote annotated virome table: {:?}", path);
    Ok(())
}

/// Write the plain-text One Health summary to disk.
pub fn write_summary_text(summary: &OneHealthSummary, path: &Path) -> Result<()> {
    fs::write(path, summary.to_text())
        .with_context(|| format!("Failed to write summary: {:?}", path))?;
    println!("Wrote One Health summary: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ViromeTable;

    #[test]
    fn test_annotated_dataframe_columns() {
        let df = DataFrame::new(vec![
            Column::new("Taxon".into(), &["Escherichia phage T4"]),
            Column::new("Count".into(), &[50i64]),
        ])
        .unwrap();
        let profile =
            ViromeProfile::from_table(&ViromeTable::from_dataframe(df).unwrap()).unwrap();

        let annotated = annotated_dataframe(&profile).unwrap();
        assert_eq!(annotated.height(), 1);
        let names: Vec<&str> = annotated
            .get_column_names()
            .into_iter()
            .map(|n| n.as_str())
            .collect();
        assert_eq!(names, ANNOTATED_COLUMNS.to_vec());

        let hosts = annotated.column("Host_Inference").unwrap().str().unwrap();
        assert_eq!(hosts.get(0), Some("Bacterial"));
    }
}
