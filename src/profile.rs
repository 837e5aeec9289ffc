//! Virome profile - main coordinator for annotated count tables.
//!
//! Applies the taxon classifier over every row of a cleaned table and
//! serves the derived views the presentation layer renders. One upload
//! produces one profile; every query below is a pure recomputation over
//! the annotated rows.

use crate::classify::{
    HostGroup, OneHealthRelevance, SpilloverPotential, TaxonAnnotation, TaxonClassifier,
};
use crate::data::ViromeTable;
use crate::metrics::{alpha_diversity, AlphaDiversity};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One annotated output row: the original Taxon/Count pair joined with its
/// derived annotation fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedTaxon {
    pub name: String,
    pub count: u64,
    pub annotation: TaxonAnnotation,
}

/// Headline metrics for the full profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViromeOverview {
    pub total_taxa: usize,
    pub total_reads: u64,
    pub shannon: f64,
    pub simpson: f64,
}

/// Annotated virome profile for one uploaded table.
pub struct ViromeProfile {
    rows: Vec<AnnotatedTaxon>,
    total_reads: u64,
}

impl ViromeProfile {
    /// Annotate every row of a cleaned table.
    ///
    /// The classifier is applied as a stable, order-preserving map: output
    /// row order matches input row order, with no cross-row dependency and
    /// no parallel dispatch.
    pub fn from_table(table: &ViromeTable) -> Result<Self> {
        let classifier = TaxonClassifier::new();

        let mut rows = Vec::with_capacity(table.height());
        let mut total_reads = 0u64;
        for record in table.records()? {
            let annotation = classifier.classify(&record.name);
            total_reads += record.count;
            rows.push(AnnotatedTaxon {
                name: record.name,
                count: record.count,
                annotation,
            });
        }

        Ok(Self { rows, total_reads })
    }

    /// Ordered annotated rows, the core-to-presentation contract.
    pub fn rows(&self) -> &[AnnotatedTaxon] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_reads(&self) -> u64 {
        self.total_reads
    }

    /// Alpha diversity over the full count column.
    pub fn alpha_diversity(&self) -> AlphaDiversity {
        let counts: Vec<u64> = self.rows.iter().map(|r| r.count).collect();
        alpha_diversity(&counts)
    }

    /// Rows for one host group, upload order preserved.
    pub fn host_subset(&self, host: HostGroup) -> Vec<&AnnotatedTaxon> {
        self.rows
            .iter()
            .filter(|r| r.annotation.host == host)
            .collect()
    }

    /// Independent diversity computation over one host group.
    pub fn host_diversity(&self, host: HostGroup) -> AlphaDiversity {
        let counts: Vec<u64> = self
            .rows
            .iter()
            .filter(|r| r.annotation.host == host)
            .map(|r| r.count)
            .collect();
        alpha_diversity(&counts)
    }

    /// Multi-select filter over host group and relevance level, upload
    /// order preserved.
    pub fn filter_rows(
        &self,
        hosts: &[HostGroup],
        relevances: &[OneHealthRelevance],
    ) -> Vec<&AnnotatedTaxon> {
        self.rows
            .iter()
            .filter(|r| {
                hosts.contains(&r.annotation.host)
                    && relevances.contains(&r.annotation.one_health_relevance)
            })
            .collect()
    }

    /// Rows with spillover potential Likely or Possible, most abundant
    /// first.
    pub fn spillover_watchlist(&self) -> Vec<&AnnotatedTaxon> {
        let mut rows: Vec<&AnnotatedTaxon> = self
            .rows
            .iter()
            .filter(|r| {
                matches!(
                    r.annotation.spillover_potential,
                    SpilloverPotential::Likely | SpilloverPotential::Possible
                )
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }

    /// Top-n rows by count descending; ties keep upload order.
    pub fn top_taxa(&self, n: usize) -> Vec<&AnnotatedTaxon> {
        let mut rows: Vec<&AnnotatedTaxon> = self.rows.iter().collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows.truncate(n);
        rows
    }

    pub fn overview(&self) -> ViromeOverview {
        let diversity = self.alpha_diversity();
        ViromeOverview {
            total_taxa: self.rows.len(),
            total_reads: self.total_reads,
            shannon: diversity.shannon,
            simpson: diversity.simpson,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use polars::prelude::*;

    fn profile(rows: &[(&str, i64)]) -> ViromeProfile {
        let taxa: Vec<&str> = rows.iter().map(|(name, _)| *name).collect();
        let counts: Vec<i64> = rows.iter().map(|(_, count)| *count).collect();
        let df = DataFrame::new(vec![
            Column::new("Taxon".into(), taxa),
            Column::new("Count".into(), counts),
        ])
        .unwrap();
        ViromeProfile::from_table(&ViromeTable::from_dataframe(df).unwrap()).unwrap()
    }

    #[test]
    fn test_annotation_preserves_row_order() {
        let p = profile(&[("Zeta phage", 5), ("Alpha herpesvirus", 9), ("Mid sp.", 7)]);
        let names: Vec<&str> = p.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta phage", "Alpha herpesvirus", "Mid sp."]);
        assert_eq!(p.total_reads(), 21);
    }

    #[test]
    fn test_host_subset_and_diversity() {
        let p = profile(&[
            ("Escherichia phage T4", 30),
            ("Salmonella phage P22", 30),
            ("Human herpesvirus 1", 40),
        ]);

        let bacterial = p.host_subset(HostGroup::Bacterial);
        assert_eq!(bacterial.len(), 2);

        // Two equal counts: shannon = ln(2), simpson = 0.5
        let d = p.host_diversity(HostGroup::Bacterial);
        assert_relative_eq!(d.shannon, 2.0_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(d.simpson, 0.5, epsilon = 1e-12);

        // Empty subgroup falls back to zeros
        let none = p.host_diversity(HostGroup::InsectAssociated);
        assert_eq!(none.shannon, 0.0);
        assert_eq!(none.simpson, 0.0);
    }

    #[test]
    fn test_filter_rows() {
        let p = profile(&[
            ("Escherichia phage T4", 30),
            ("Human herpesvirus 1", 40),
            ("Avian reovirus", 10),
        ]);

        let selected = p.filter_rows(
            &[HostGroup::MammalAssociated, HostGroup::BirdAssociated],
            &[OneHealthRelevance::High],
        );
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "Human herpesvirus 1");
    }

    #[test]
    fn test_spillover_watchlist_sorted_by_count() {
        let p = profile(&[
            ("Avian reovirus", 10),
            ("Human herpesvirus 1", 40),
            ("Escherichia phage T4", 99),
        ]);

        let watchlist = p.spillover_watchlist();
        let names: Vec<&str> = watchlist.iter().map(|r| r.name.as_str()).collect();
        // The phage is Not evident and excluded, regardless of abundance
        assert_eq!(names, vec!["Human herpesvirus 1", "Avian reovirus"]);
    }

    #[test]
    fn test_top_taxa_stable_on_ties() {
        let p = profile(&[("first", 10), ("second", 10), ("big", 50)]);
        let top: Vec<&str> = p.top_taxa(3).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(top, vec!["big", "first", "second"]);
    }
}
