//! One-shot pipeline run over a count table CSV.
//!
//! Loads, annotates, and summarizes the table, then writes the two
//! download artifacts next to the output directory.

use anyhow::{bail, Result};
use std::env;
use std::path::PathBuf;
use virome_explorer_rust::export::{write_annotated_csv, write_summary_text};
use virome_explorer_rust::{OneHealthSummary, ViromeProfile, ViromeTable};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("Usage: annotate_virome <counts.csv> [output_dir]");
    }
    let input = &args[1];
    let out_dir = PathBuf::from(args.get(2).map(String::as_str).unwrap_or("."));

    let table = ViromeTable::from_csv(input)?;
    let profile = ViromeProfile::from_table(&table)?;

    let overview = profile.overview();
    println!("\n=== VIROME OVERVIEW ===");
    println!("  Total viral taxa: {}", overview.total_taxa);
    println!("  Total reads: {}", overview.total_reads);
    println!("  Shannon diversity: {:.3}", overview.shannon);
    println!("  Simpson diversity: {:.3}", overview.simpson);

    let summary = OneHealthSummary::from_profile(&profile);
    println!("\n{}\n", summary.to_text());

    write_annotated_csv(&profile, &out_dir.join("virome_annotated_table.csv"))?;
    write_summary_text(&summary, &out_dir.join("one_health_summary.txt"))?;

    Ok(())
}
