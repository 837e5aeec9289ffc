//! Taxon classification for virome profiling.
//!
//! Maps free-text taxon labels to viral family, host association, and One
//! Health risk annotations. The host rules form a fixed decision table
//! evaluated in strict priority order; family extraction is an independent
//! axis that always runs.

use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// Annotation Vocabulary
// ============================================================================

/// Inferred host association for a taxon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostGroup {
    Bacterial,
    #[serde(rename = "Mammal-associated")]
    MammalAssociated,
    #[serde(rename = "Bird-associated")]
    BirdAssociated,
    #[serde(rename = "Insect-associated")]
    InsectAssociated,
    Unknown,
}

impl HostGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostGroup::Bacterial => "Bacterial",
            HostGroup::MammalAssociated => "Mammal-associated",
            HostGroup::BirdAssociated => "Bird-associated",
            HostGroup::InsectAssociated => "Insect-associated",
            HostGroup::Unknown => "Unknown",
        }
    }

    /// One Health relevance, derived solely from the host association.
    pub fn one_health_relevance(&self) -> OneHealthRelevance {
        match self {
            HostGroup::MammalAssociated => OneHealthRelevance::High,
            HostGroup::BirdAssociated | HostGroup::InsectAssociated => OneHealthRelevance::Moderate,
            HostGroup::Bacterial => OneHealthRelevance::Low,
            HostGroup::Unknown => OneHealthRelevance::Uncertain,
        }
    }

    /// Spillover potential, derived solely from the host association.
    pub fn spillover_potential(&self) -> SpilloverPotential {
        match self {
            HostGroup::MammalAssociated => SpilloverPotential::Likely,
            HostGroup::BirdAssociated | HostGroup::InsectAssociated => SpilloverPotential::Possible,
            _ => SpilloverPotential::NotEvident,
        }
    }
}

/// Confidence attached to a host inference rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostConfidence {
    High,
    Medium,
    Low,
}

impl HostConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostConfidence::High => "High",
            HostConfidence::Medium => "Medium",
            HostConfidence::Low => "Low",
        }
    }
}

/// Qualitative One Health relevance tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OneHealthRelevance {
    High,
    Moderate,
    Low,
    Uncertain,
}

impl OneHealthRelevance {
    pub fn as_str(&self) -> &'static str {
        match self {
            OneHealthRelevance::High => "High",
            OneHealthRelevance::Moderate => "Moderate",
            OneHealthRelevance::Low => "Low",
            OneHealthRelevance::Uncertain => "Uncertain",
        }
    }
}

/// Qualitative spillover potential tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpilloverPotential {
    Likely,
    Possible,
    #[serde(rename = "Not evident")]
    NotEvident,
}

impl SpilloverPotential {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpilloverPotential::Likely => "Likely",
            SpilloverPotential::Possible => "Possible",
            SpilloverPotential::NotEvident => "Not evident",
        }
    }
}

/// Family assignment when no "<...>viridae" token is present.
pub const UNRESOLVED_FAMILY: &str = "Unresolved";

// ============================================================================
// Host Inference Rule Table
// ============================================================================

/// Keywords for mammalian disease agents (herpes-, papilloma-, pox-,
/// adenoviruses).
pub const MAMMAL_MARKERS: [&str; 4] = ["herpes", "papilloma", "pox", "adeno"];

/// Keywords for avian hosts.
pub const BIRD_MARKERS: [&str; 4] = ["avian", "gallid", "chicken", "fowl"];

/// Keywords for insect-infecting virus groups.
pub const INSECT_MARKERS: [&str; 3] = ["baculovirus", "ascovirus", "nudivirus"];

/// Host inference over a lowercased label. Substring containment, strict
/// priority order, first match wins:
/// 1. "phage" -> Bacterial (High)
/// 2. mammal markers -> Mammal-associated (High)
/// 3. bird markers -> Bird-associated (Medium)
/// 4. insect markers -> Insect-associated (High)
/// 5. fallback -> Unknown (Low)
///
/// The phage check short-circuits, so a composite label like
/// "avian phage-like element" resolves Bacterial.
fn infer_host(lowered: &str) -> (HostGroup, HostConfidence) {
    if lowered.contains("phage") {
        (HostGroup::Bacterial, HostConfidence::High)
    } else if MAMMAL_MARKERS.iter().any(|m| lowered.contains(m)) {
        (HostGroup::MammalAssociated, HostConfidence::High)
    } else if BIRD_MARKERS.iter().any(|m| lowered.contains(m)) {
        (HostGroup::BirdAssociated, HostConfidence::Medium)
    } else if INSECT_MARKERS.iter().any(|m| lowered.contains(m)) {
        (HostGroup::InsectAssociated, HostConfidence::High)
    } else {
        (HostGroup::Unknown, HostConfidence::Low)
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Full annotation for one taxon label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonAnnotation {
    /// Capitalized "<...>viridae" token, or "Unresolved".
    pub family: String,
    pub host: HostGroup,
    pub confidence: HostConfidence,
    pub one_health_relevance: OneHealthRelevance,
    pub spillover_potential: SpilloverPotential,
}

/// Rule-based taxon classifier.
///
/// Deterministic, total, and case-insensitive: every string, including
/// empty or garbage input, produces an annotation. There is no error path;
/// unmatched labels fall through to the Unresolved/Unknown defaults.
pub struct TaxonClassifier {
    // Herpesviridae, Poxviridae etc. — whole-word match on the lowercased label
    re_family: Regex,
}

impl TaxonClassifier {
    pub fn new() -> Self {
        Self {
            re_family: Regex::new(r"\b([a-z]+viridae)\b").unwrap(),
        }
    }

    /// Annotate a single taxon label.
    pub fn classify(&self, name: &str) -> TaxonAnnotation {
        let lowered = name.to_lowercase();

        let family = self
            .extract_family(&lowered)
            .unwrap_or_else(|| UNRESOLVED_FAMILY.to_string());
        let (host, confidence) = infer_host(&lowered);

        TaxonAnnotation {
            family,
            host,
            confidence,
            one_health_relevance: host.one_health_relevance(),
            spillover_potential: host.spillover_potential(),
        }
    }

    /// Extract the viral family token from a lowercased label, capitalized.
    /// Family extraction is independent of host inference: a label can
    /// carry a host keyword with no family token, or the reverse.
    fn extract_family(&self, lowered: &str) -> Option<String> {
        self.re_family
            .captures(lowered)
            .map(|caps| capitalize(&caps[1]))
    }
}

impl Default for TaxonClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Uppercase the first letter only. The token is ASCII by construction.
fn capitalize(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    if let Some(first) = chars.next() {
        out.push(first.to_ascii_uppercase());
        out.extend(chars);
    }
    out
}
