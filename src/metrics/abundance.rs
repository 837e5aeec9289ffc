//! Community-structure aggregations over annotated rows.
//!
//! Feeds the rank-abundance, family, and distribution views rendered by the
//! presentation layer. All functions are pure queries over the annotated
//! table.

use crate::classify::{HostGroup, OneHealthRelevance, UNRESOLVED_FAMILY};
use crate::profile::AnnotatedTaxon;
use rustc_hash::FxHashMap;

/// (rank, count) pairs for a rank-abundance curve. Counts descend, ranks
/// run from 1.
pub fn rank_abundance(rows: &[AnnotatedTaxon]) -> Vec<(usize, u64)> {
    let mut counts: Vec<u64> = rows.iter().map(|r| r.count).collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| (idx + 1, count))
        .collect()
}

/// Reads summed per assigned viral family, most abundant first, capped at
/// `limit` families. Unresolved assignments are excluded; ties order by
/// family name.
pub fn family_abundance(rows: &[AnnotatedTaxon], limit: usize) -> Vec<(String, u64)> {
    let mut totals: FxHashMap<String, u64> = FxHashMap::default();
    for row in rows {
        if row.annotation.family != UNRESOLVED_FAMILY {
            *totals.entry(row.annotation.family.clone()).or_insert(0) += row.count;
        }
    }

    let mut ranked: Vec<(String, u64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

/// Taxon tally per host group, most common first. Only observed groups
/// appear.
pub fn host_distribution(rows: &[AnnotatedTaxon]) -> Vec<(HostGroup, usize)> {
    let mut tallies: FxHashMap<HostGroup, usize> = FxHashMap::default();
    for row in rows {
        *tallies.entry(row.annotation.host).or_insert(0) += 1;
    }

    let mut ranked: Vec<(HostGroup, usize)> = tallies.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
    ranked
}

/// Taxon tally per One Health relevance level, most common first.
pub fn relevance_distribution(rows: &[AnnotatedTaxon]) -> Vec<(OneHealthRelevance, usize)> {
    let mut tallies: FxHashMap<OneHealthRelevance, usize> = FxHashMap::default();
    for row in rows {
        *tallies.entry(row.annotation.one_health_relevance).or_insert(0) += 1;
    }

    let mut ranked: Vec<(OneHealthRelevance, usize)> = tallies.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::TaxonClassifier;

    fn annotated(rows: &[(&str, u64)]) -> Vec<AnnotatedTaxon> {
        let classifier = TaxonClassifier::new();
        rows.iter()
            .map(|(name, count)| AnnotatedTaxon {
                name: name.to_string(),
                count: *count,
                annotation: classifier.classify(name),
            })
            .collect()
    }

    #[test]
    fn test_rank_abundance_descends() {
        let rows = annotated(&[("a", 10), ("b", 100), ("c", 50)]);
        assert_eq!(rank_abundance(&rows), vec![(1, 100), (2, 50), (3, 10)]);
    }

    #[test]
    fn test_family_abundance_excludes_unresolved() {
        let rows = annotated(&[
            ("Herpesviridae sp. A", 40),
            ("Herpesviridae sp. B", 20),
            ("Myoviridae phage X", 30),
            ("Unknown sp.", 99),
        ]);

        let ranked = family_abundance(&rows, 10);
        assert_eq!(
            ranked,
            vec![
                ("Herpesviridae".to_string(), 60),
                ("Myoviridae".to_string(), 30)
            ]
        );
    }

    #[test]
    fn test_family_abundance_respects_limit() {
        let rows = annotated(&[
            ("Herpesviridae sp.", 10),
            ("Myoviridae sp.", 20),
            ("Circoviridae sp.", 30),
        ]);
        assert_eq!(family_abundance(&rows, 2).len(), 2);
    }

    #[test]
    fn test_distributions_cover_every_row() {
        let rows = annotated(&[
            ("Escherichia phage T4", 1),
            ("Human herpesvirus 1", 1),
            ("Avian reovirus", 1),
            ("Uncultured sp.", 1),
        ]);

        let hosts = host_distribution(&rows);
        assert_eq!(hosts.iter().map(|(_, n)| n).sum::<usize>(), rows.len());
        assert_eq!(hosts.len(), 4);

        let relevance = relevance_distribution(&rows);
        assert_eq!(relevance.iter().map(|(_, n)| n).sum::<usize>(), rows.len());
    }
}
