//! Alpha diversity over read count vectors.
//!
//! Shannon index (natural log) and Gini-Simpson diversity, computed fresh
//! for every selection; the computation is a cheap reduction with no shared
//! state between calls.

use serde::{Deserialize, Serialize};

/// Alpha diversity of one count vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlphaDiversity {
    /// Shannon index, -sum(p * ln p), >= 0.
    pub shannon: f64,
    /// Gini-Simpson diversity, 1 - sum(p^2), in [0, 1).
    pub simpson: f64,
}

/// Compute Shannon and Gini-Simpson indices for a count vector.
///
/// A zero total (empty or all-zero selection) returns zeros for both
/// indices rather than dividing by zero. Zero counts contribute nothing to
/// either index: the log term is skipped for p = 0, matching the
/// mathematical limit instead of producing NaN.
pub fn alpha_diversity(counts: &[u64]) -> AlphaDiversity {
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return AlphaDiversity {
            shannon: 0.0,
            simpson: 0.0,
        };
    }

    let total = total as f64;
    let mut shannon = 0.0;
    let mut sum_sq = 0.0;
    for &count in counts {
        if count == 0 {
            continue;
        }
        let p = count as f64 / total;
        shannon -= p * p.ln();
        sum_sq += p * p;
    }

    AlphaDiversity {
        shannon,
        simpson: 1.0 - sum_sq,
    }
}
