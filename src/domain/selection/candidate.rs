//! Candidate content items and sequencing roles.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::VideoAssetId;

/// Role an item plays in a day's sequence.
///
/// Governs whether the item can be dropped for budget reasons: mandatory
/// items always appear, the other two roles compete for the remaining
/// duration budget in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceRole {
    /// Always included, e.g. opening and closing segments.
    Mandatory,
    /// Included while the budget allows, before optional items.
    Adjustable,
    /// Included last, only with budget to spare.
    Optional,
}

impl SequenceRole {
    /// Parses a role from its stored string form, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mandatory" => Some(SequenceRole::Mandatory),
            "adjustable" => Some(SequenceRole::Adjustable),
            "optional" => Some(SequenceRole::Optional),
            _ => None,
        }
    }

    /// Returns the canonical lowercase string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            SequenceRole::Mandatory => "mandatory",
            SequenceRole::Adjustable => "adjustable",
            SequenceRole::Optional => "optional",
        }
    }
}

impl std::fmt::Display for SequenceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read-only view of an eligible content item supplied by the catalog.
///
/// Candidates arrive ordered by creation timestamp ascending; selection
/// order depends on that contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateItem {
    /// The underlying video asset.
    pub id: VideoAssetId,

    /// Role the asset plays in a day's sequence.
    pub sequence_role: SequenceRole,

    /// Duration of the asset, in seconds.
    pub duration_secs: u32,

    /// Category tags, copied onto playlist items at selection time.
    pub category_tags: Vec<String>,

    /// Conditions this asset is unsuitable for.
    pub contraindication_tags: Vec<String>,

    /// Difficulty level, if the catalog assigns one.
    pub level: Option<String>,
}
