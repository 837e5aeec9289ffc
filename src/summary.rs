//! One Health summary report: the plain-text block shown on the overview
//! tab and offered as a download. Derived from the annotated table alone,
//! so the rendered text is reproducible byte for byte.

use crate::classify::{HostGroup, OneHealthRelevance, SpilloverPotential};
use crate::profile::ViromeProfile;
use serde::{Deserialize, Serialize};

/// Number of taxa listed in the report's abundance ranking.
pub const TOP_TAXA: usize = 5;

/// Counts backing the One Health summary text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHealthSummary {
    pub total_taxa: usize,
    pub high_relevance: usize,
    pub spillover_relevant: usize,
    pub unresolved_hosts: usize,
    /// Most abundant taxa, (name, reads), count descending.
    pub top_taxa: Vec<(String, u64)>,
}

impl OneHealthSummary {
    pub fn from_profile(profile: &ViromeProfile) -> Self {
        let rows = profile.rows();

        let high_relevance = rows
            .iter()
            .filter(|r| r.annotation.one_health_relevance == OneHealthRelevance::High)
            .count();

        let spillover_relevant = rows
            .iter()
            .filter(|r| {
                matches!(
                    r.annotation.spillover_potential,
                    SpilloverPotential::Likely | SpilloverPotential::Possible
                )
            })
            .count();

        let unresolved_hosts = rows
            .iter()
            .filter(|r| r.annotation.host == HostGroup::Unknown)
            .count();

        let top_taxa = profile
            .top_taxa(TOP_TAXA)
            .into_iter()
            .map(|r| (r.name.clone(), r.count))
            .collect();

        Self {
            total_taxa: rows.len(),
            high_relevance,
            spillover_relevant,
            unresolved_hosts,
            top_taxa,
        }
    }

    /// Render the report. Newline-joined, no trailing newline.
    pub fn to_text(&self) -> String {
        let mut lines = vec![
            format!("Total viral taxa detected: {}", self.total_taxa),
            format!("High One Health relevance taxa: {}", self.high_relevance),
            format!(
                "Taxa with potential spillover relevance: {}",
                self.spillover_relevant
            ),
            format!(
                "Environmental or unknown host taxa: {}",
                self.unresolved_hosts
            ),
            String::new(),
            "Top 5 most abundant viral taxa:".to_string(),
        ];

        for (name, count) in &self.top_taxa {
            lines.push(format!("- {} ({} reads)", name, count));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ViromeTable;
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
    fn test_counts() {
        let p = profile(&[
            ("Human herpesvirus 1", 100),
            ("Escherichia phage T4", 50),
            ("Avian reovirus", 20),
            ("Uncultured sp.", 10),
        ]);

        let summary = OneHealthSummary::from_profile(&p);
        assert_eq!(summary.total_taxa, 4);
        assert_eq!(summary.high_relevance, 1);
        // Likely (herpes) + Possible (avian)
        assert_eq!(summary.spillover_relevant, 2);
        assert_eq!(summary.unresolved_hosts, 1);
        assert_eq!(summary.top_taxa.len(), 4);
    }

    #[test]
    fn test_top_taxa_capped_at_five() {
        let p = profile(&[
            ("a", 1),
            ("b", 2),
            ("c", 3),
            ("d", 4),
            ("e", 5),
            ("f", 6),
        ]);
        let summary = OneHealthSummary::from_profile(&p);
        assert_eq!(summary.top_taxa.len(), TOP_TAXA);
        assert_eq!(summary.top_taxa[0], ("f".to_string(), 6));
    }

    #[test]
    fn test_text_has_no_trailing_newline() {
        let p = profile(&[("Escherichia phage T4", 50)]);
        let text = OneHealthSummary::from_profile(&p).to_text();
        assert!(!text.ends_with('\n'));
        assert!(text.starts_with("Total viral taxa detected: 1\n"));
        assert!(text.ends_with("- Escherichia phage T4 (50 reads)"));
    }
}
