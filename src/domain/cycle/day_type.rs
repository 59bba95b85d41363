//! Day type derivation from rhythm patterns and stored schedules.
//!
//! A program ships a repeating rhythm pattern (e.g. 2 gentle days, then
//! 1 build day, repeat). Day type resolution is total: any absent or
//! malformed pattern falls back to [`DayType::Gentle`] for every day, so
//! cycle provisioning can never fail on bad program data.

use serde::{Deserialize, Serialize};

/// Category of practice content scheduled for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    /// Low-intensity session. Also the universal fallback.
    Gentle,
    /// Progressive-intensity session.
    Build,
    /// Recovery-focused session.
    Restore,
}

impl DayType {
    /// Parses a day type from its stored string form, case-insensitive.
    ///
    /// Returns `None` for unrecognized names so callers can decide
    /// whether to fall back or reject.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gentle" => Some(DayType::Gentle),
            "build" => Some(DayType::Build),
            "restore" => Some(DayType::Restore),
            _ => None,
        }
    }

    /// Returns the canonical lowercase string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Gentle => "gentle",
            DayType::Build => "build",
            DayType::Restore => "restore",
        }
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A program's repeating rhythm, stored as parallel arrays.
///
/// `counts[i]` repetitions of `types[i]`, in order, form one period of
/// the rhythm. Type names are kept as raw strings because upstream
/// program data may carry names this engine does not recognize; those
/// patterns are treated as malformed rather than partially honored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhythmPattern {
    pub counts: Vec<i64>,
    pub types: Vec<String>,
}

impl RhythmPattern {
    /// Creates a pattern from parallel count/type arrays.
    pub fn new(counts: Vec<i64>, types: Vec<impl Into<String>>) -> Self {
        Self {
            counts,
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    /// Expands the pattern into one full period of day types.
    ///
    /// Returns `None` when the pattern is malformed: unequal array
    /// lengths, a non-positive count, an unrecognized type name, or an
    /// empty expansion.
    pub fn expand(&self) -> Option<Vec<DayType>> {
        if self.counts.len() != self.types.len() {
            return None;
        }
        let mut expanded = Vec::new();
        for (count, name) in self.counts.iter().zip(self.types.iter()) {
            if *count <= 0 {
                return None;
            }
            let day_type = DayType::parse(name)?;
            for _ in 0..*count {
                expanded.push(day_type);
            }
        }
        if expanded.is_empty() {
            return None;
        }
        Some(expanded)
    }
}

/// A day-level override taken from an already-provisioned schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledDayType {
    pub day_number: u32,
    pub day_type: Option<DayType>,
}

/// Resolves the day type for `day_number` from an optional rhythm pattern.
///
/// Indexes `(day_number - 1) mod period` into the expanded pattern.
/// Absent or malformed patterns yield [`DayType::Gentle`] for every day;
/// this function never fails.
pub fn resolve(pattern: Option<&RhythmPattern>, day_number: u32) -> DayType {
    let Some(expanded) = pattern.and_then(RhythmPattern::expand) else {
        return DayType::Gentle;
    };
    let index = (day_number.saturating_sub(1) as usize) % expanded.len();
    expanded[index]
}

/// Resolves a day type preferring a stored schedule over the pattern.
///
/// Tries a direct match on day number first, then the positional entry
/// at index `day_number - 1`, then falls back to [`resolve`].
pub fn resolve_scheduled(
    schedule: &[ScheduledDayType],
    pattern: Option<&RhythmPattern>,
    day_number: u32,
) -> DayType {
    let direct = schedule
        .iter()
        .find(|entry| entry.day_number == day_number)
        .and_then(|entry| entry.day_type);
    if let Some(day_type) = direct {
        return day_type;
    }

    let positional = schedule
        .get(day_number.saturating_sub(1) as usize)
        .and_then(|entry| entry.day_type);
    if let Some(day_type) = positional {
        return day_type;
    }

    resolve(pattern, day_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_expands_in_order() {
        let pattern = RhythmPattern::new(vec![2, 1], vec!["gentle", "build"]);
        assert_eq!(
            pattern.expand(),
            Some(vec![DayType::Gentle, DayType::Gentle, DayType::Build])
        );
    }

    #[test]
    fn day_four_wraps_back_to_start() {
        // Expanded cycle [gentle, gentle, build]; (4-1) % 3 == 0.
        let pattern = RhythmPattern::new(vec![2, 1], vec!["gentle", "build"]);
        assert_eq!(resolve(Some(&pattern), 4), DayType::Gentle);
        assert_eq!(resolve(Some(&pattern), 3), DayType::Build);
        assert_eq!(resolve(Some(&pattern), 6), DayType::Build);
    }

    #[test]
    fn mismatched_lengths_fall_back_to_gentle() {
        let pattern = RhythmPattern::new(vec![2, 1, 3], vec!["gentle", "build"]);
        for day in 1..=21 {
            assert_eq!(resolve(Some(&pattern), day), DayType::Gentle);
        }
    }

    #[test]
    fn non_positive_count_falls_back_to_gentle() {
        let pattern = RhythmPattern::new(vec![2, 0], vec!["gentle", "build"]);
        assert_eq!(pattern.expand(), None);
        assert_eq!(resolve(Some(&pattern), 1), DayType::Gentle);

        let negative = RhythmPattern::new(vec![-1], vec!["build"]);
        assert_eq!(resolve(Some(&negative), 5), DayType::Gentle);
    }

    #[test]
    fn unrecognized_type_name_falls_back_to_gentle() {
        let pattern = RhythmPattern::new(vec![1, 1], vec!["gentle", "inferno"]);
        for day in 1..=21 {
            assert_eq!(resolve(Some(&pattern), day), DayType::Gentle);
        }
    }

    #[test]
    fn absent_pattern_falls_back_to_gentle() {
        assert_eq!(resolve(None, 1), DayType::Gentle);
        assert_eq!(resolve(None, 21), DayType::Gentle);
    }

    #[test]
    fn empty_pattern_falls_back_to_gentle() {
        let pattern = RhythmPattern::new(Vec::new(), Vec::<String>::new());
        assert_eq!(pattern.expand(), None);
        assert_eq!(resolve(Some(&pattern), 1), DayType::Gentle);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(DayType::parse("GENTLE"), Some(DayType::Gentle));
        assert_eq!(DayType::parse("Restore"), Some(DayType::Restore));
        assert_eq!(DayType::parse("unknown"), None);
    }

    #[test]
    fn schedule_direct_match_wins_over_pattern() {
        let pattern = RhythmPattern::new(vec![3], vec!["build"]);
        let schedule = [ScheduledDayType {
            day_number: 2,
            day_type: Some(DayType::Restore),
        }];
        assert_eq!(resolve_scheduled(&schedule, Some(&pattern), 2), DayType::Restore);
    }

    #[test]
    fn schedule_positional_fallback_by_index() {
        // No entry claims day 2, but the second array slot does.
        let schedule = [
            ScheduledDayType {
                day_number: 10,
                day_type: Some(DayType::Gentle),
            },
            ScheduledDayType {
                day_number: 11,
                day_type: Some(DayType::Build),
            },
        ];
        assert_eq!(resolve_scheduled(&schedule, None, 2), DayType::Build);
    }

    #[test]
    fn schedule_with_unresolved_types_falls_through_to_pattern() {
        let pattern = RhythmPattern::new(vec![1], vec!["restore"]);
        let schedule = [ScheduledDayType {
            day_number: 1,
            day_type: None,
        }];
        assert_eq!(resolve_scheduled(&schedule, Some(&pattern), 1), DayType::Restore);
    }

    #[test]
    fn empty_schedule_uses_pattern() {
        let pattern = RhythmPattern::new(vec![1, 1], vec!["gentle", "build"]);
        assert_eq!(resolve_scheduled(&[], Some(&pattern), 2), DayType::Build);
    }

    #[test]
    fn day_type_serializes_lowercase() {
        let json = serde_json::to_string(&DayType::Restore).unwrap();
        assert_eq!(json, "\"restore\"");
    }
}
