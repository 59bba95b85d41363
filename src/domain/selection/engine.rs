//! Duration-budgeted, role-prioritized playlist selection.
//!
//! Selection is a first-fit greedy pass over three role buckets:
//! mandatory items are always taken, adjustable then optional items are
//! taken in input order while they fit the budget. First-fit by input
//! order trades optimal packing for determinism: identical inputs always
//! produce identical playlists, which is what makes regeneration
//! idempotent.

use std::collections::HashSet;

use crate::domain::foundation::VideoAssetId;

use super::{CandidateItem, SequenceRole};

/// Outcome of one selection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Selected candidates: all mandatory, then accepted adjustable,
    /// then accepted optional, each bucket in input order.
    pub items: Vec<CandidateItem>,

    /// Summed duration of the selected items, in seconds.
    ///
    /// May exceed the target when mandatory items alone do; no error is
    /// raised either way, the caller reports the total as-is.
    pub total_duration_secs: u32,
}

/// Selects candidates against a duration budget.
///
/// Candidates whose id appears in `excluded_ids` are removed before any
/// bucketing. Mandatory candidates are included unconditionally and
/// count toward the total regardless of the target. Adjustable and then
/// optional candidates are appended first-fit: each is accepted only if
/// the running total stays within `target_duration_secs`, rejected items
/// are skipped without backtracking.
pub fn select(
    candidates: Vec<CandidateItem>,
    target_duration_secs: u32,
    excluded_ids: &HashSet<VideoAssetId>,
) -> Selection {
    let mut mandatory = Vec::new();
    let mut adjustable = Vec::new();
    let mut optional = Vec::new();

    for candidate in candidates {
        if excluded_ids.contains(&candidate.id) {
            continue;
        }
        match candidate.sequence_role {
            SequenceRole::Mandatory => mandatory.push(candidate),
            SequenceRole::Adjustable => adjustable.push(candidate),
            SequenceRole::Optional => optional.push(candidate),
        }
    }

    let mut items = Vec::with_capacity(mandatory.len());
    let mut total: u32 = 0;

    for candidate in mandatory {
        total += candidate.duration_secs;
        items.push(candidate);
    }

    for candidate in adjustable.into_iter().chain(optional) {
        if total + candidate.duration_secs <= target_duration_secs {
            total += candidate.duration_secs;
            items.push(candidate);
        }
    }

    Selection {
        items,
        total_duration_secs: total,
    }
}

/// Removes candidates whose contraindication tags intersect the user's
/// recorded contraindications.
///
/// An empty user list keeps every candidate.
pub fn filter_contraindicated(
    candidates: Vec<CandidateItem>,
    user_contraindications: &[String],
) -> Vec<CandidateItem> {
    if user_contraindications.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|candidate| {
            !candidate
                .contraindication_tags
                .iter()
                .any(|tag| user_contraindications.contains(tag))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn candidate(role: SequenceRole, duration_secs: u32) -> CandidateItem {
        CandidateItem {
            id: VideoAssetId::new(),
            sequence_role: role,
            duration_secs,
            category_tags: Vec::new(),
            contraindication_tags: Vec::new(),
            level: None,
        }
    }

    #[test]
    fn first_fit_skips_oversized_then_accepts_later_fits() {
        // 300 mandatory always in; 400 fits (700); 500 would overflow
        // (1200 > 900) and is skipped; optional 200 then fits exactly.
        let candidates = vec![
            candidate(SequenceRole::Mandatory, 300),
            candidate(SequenceRole::Adjustable, 400),
            candidate(SequenceRole::Adjustable, 500),
            candidate(SequenceRole::Optional, 200),
        ];
        let expected: Vec<VideoAssetId> =
            vec![candidates[0].id, candidates[1].id, candidates[3].id];

        let selection = select(candidates, 900, &HashSet::new());

        let picked: Vec<VideoAssetId> = selection.items.iter().map(|i| i.id).collect();
        assert_eq!(picked, expected);
        assert_eq!(selection.total_duration_secs, 900);
    }

    #[test]
    fn mandatory_items_exceed_budget_without_error() {
        let candidates = vec![
            candidate(SequenceRole::Mandatory, 600),
            candidate(SequenceRole::Mandatory, 700),
        ];
        let selection = select(candidates, 300, &HashSet::new());
        assert_eq!(selection.items.len(), 2);
        assert_eq!(selection.total_duration_secs, 1300);
    }

    #[test]
    fn excluded_ids_are_dropped_before_bucketing() {
        let keep = candidate(SequenceRole::Adjustable, 300);
        let drop = candidate(SequenceRole::Mandatory, 300);
        let excluded: HashSet<VideoAssetId> = [drop.id].into_iter().collect();

        let selection = select(vec![drop, keep.clone()], 600, &excluded);

        assert_eq!(selection.items, vec![keep]);
        assert_eq!(selection.total_duration_secs, 300);
    }

    #[test]
    fn roles_are_concatenated_mandatory_adjustable_optional() {
        let candidates = vec![
            candidate(SequenceRole::Optional, 100),
            candidate(SequenceRole::Adjustable, 100),
            candidate(SequenceRole::Mandatory, 100),
        ];
        let selection = select(candidates, 1000, &HashSet::new());
        let roles: Vec<SequenceRole> = selection.items.iter().map(|i| i.sequence_role).collect();
        assert_eq!(
            roles,
            vec![SequenceRole::Mandatory, SequenceRole::Adjustable, SequenceRole::Optional]
        );
    }

    #[test]
    fn empty_pool_selects_nothing() {
        let selection = select(Vec::new(), 900, &HashSet::new());
        assert!(selection.items.is_empty());
        assert_eq!(selection.total_duration_secs, 0);
    }

    #[test]
    fn contraindication_filter_removes_intersecting_candidates() {
        let mut risky = candidate(SequenceRole::Adjustable, 300);
        risky.contraindication_tags = vec!["knee_injury".to_string()];
        let safe = candidate(SequenceRole::Adjustable, 300);

        let filtered = filter_contraindicated(
            vec![risky, safe.clone()],
            &["knee_injury".to_string()],
        );
        assert_eq!(filtered, vec![safe]);
    }

    #[test]
    fn contraindication_filter_keeps_all_for_empty_user_list() {
        let mut risky = candidate(SequenceRole::Adjustable, 300);
        risky.contraindication_tags = vec!["knee_injury".to_string()];
        let filtered = filter_contraindicated(vec![risky.clone()], &[]);
        assert_eq!(filtered, vec![risky]);
    }

    fn arb_candidate() -> impl Strategy<Value = CandidateItem> {
        (
            prop_oneof![
                Just(SequenceRole::Mandatory),
                Just(SequenceRole::Adjustable),
                Just(SequenceRole::Optional),
            ],
            1u32..3600,
        )
            .prop_map(|(role, duration)| candidate(role, duration))
    }

    proptest! {
        #[test]
        fn every_mandatory_candidate_is_always_selected(
            candidates in prop::collection::vec(arb_candidate(), 0..30),
            target in 0u32..7200,
        ) {
            let mandatory_ids: Vec<VideoAssetId> = candidates
                .iter()
                .filter(|c| c.sequence_role == SequenceRole::Mandatory)
                .map(|c| c.id)
                .collect();

            let selection = select(candidates, target, &HashSet::new());

            for id in mandatory_ids {
                prop_assert!(selection.items.iter().any(|i| i.id == id));
            }
        }

        #[test]
        fn non_mandatory_acceptance_never_exceeds_target(
            candidates in prop::collection::vec(arb_candidate(), 0..30),
            target in 0u32..7200,
        ) {
            let selection = select(candidates, target, &HashSet::new());

            // Replay the running total: after the mandatory base, every
            // accepted adjustable/optional item must keep it within target.
            let mut total: u32 = selection
                .items
                .iter()
                .filter(|i| i.sequence_role == SequenceRole::Mandatory)
                .map(|i| i.duration_secs)
                .sum();
            for item in selection
                .items
                .iter()
                .filter(|i| i.sequence_role != SequenceRole::Mandatory)
            {
                total += item.duration_secs;
                prop_assert!(total <= target);
            }
            prop_assert_eq!(total, selection.total_duration_secs);
        }

        #[test]
        fn selection_is_deterministic(
            candidates in prop::collection::vec(arb_candidate(), 0..30),
            target in 0u32..7200,
        ) {
            let first = select(candidates.clone(), target, &HashSet::new());
            let second = select(candidates, target, &HashSet::new());
            prop_assert_eq!(first, second);
        }
    }
}
