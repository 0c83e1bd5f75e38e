//! Expected-vs-declared gap calculation.

use std::collections::{BTreeMap, HashMap};

use crate::schema::{CompetencyGap, CompetencyGapCompletion, DeclaredCompetency, ExpectedCompetency};
use crate::classify::classify_completion;

/// Join expected against declared competencies and compute the per-row gap.
///
/// The join matches on (competency id, user id) with Option equality, so a
/// null declared competency id can only ever match a null key. Expected rows
/// always carry an id, which keeps the join anchored on real competencies.
/// Duplicate source rows resolve by taking the maximum expected and maximum
/// declared level independently within each (user, competency, org, work
/// order) group. Output order is deterministic (sorted by group key).
pub fn compute(
    expected: &[ExpectedCompetency],
    declared: &[DeclaredCompetency],
) -> Vec<CompetencyGap> {
    // Highest level the user declared per (competency, user).
    let mut declared_max: HashMap<(Option<&str>, &str), i64> = HashMap::new();
    for row in declared {
        let key = (row.competency_id.as_deref(), row.user_id.as_str());
        let level = declared_max.entry(key).or_insert(row.competency_level);
        *level = (*level).max(row.competency_level);
    }

    // Group expected rows, carrying max(expected) and max(declared) per group.
    let mut groups: BTreeMap<(String, String, String, String), (i64, i64)> = BTreeMap::new();
    for row in expected {
        let declared_level = declared_max
            .get(&(Some(row.competency_id.as_str()), row.user_id.as_str()))
            .copied()
            .unwrap_or(0);
        let key = (
            row.user_id.clone(),
            row.competency_id.clone(),
            row.org_id.clone(),
            row.work_order_id.clone(),
        );
        let entry = groups.entry(key).or_insert((row.competency_level, declared_level));
        entry.0 = entry.0.max(row.competency_level);
        entry.1 = entry.1.max(declared_level);
    }

    groups
        .into_iter()
        .map(
            |((user_id, competency_id, org_id, work_order_id), (expected_level, declared_level))| {
                CompetencyGap {
                    user_id,
                    competency_id,
                    org_id,
                    work_order_id,
                    expected_level,
                    declared_level,
                    gap: expected_level - declared_level,
                }
            },
        )
        .collect()
}

/// Attach a completion percentage (already resolved by the enricher) to a gap
/// row and classify it.
pub(crate) fn with_completion(
    gap: &CompetencyGap,
    completion_percentage: Option<f64>,
) -> CompetencyGapCompletion {
    CompetencyGapCompletion {
        user_id: gap.user_id.clone(),
        competency_id: gap.competency_id.clone(),
        org_id: gap.org_id.clone(),
        work_order_id: gap.work_order_id.clone(),
        expected_level: gap.expected_level,
        declared_level: gap.declared_level,
        gap: gap.gap,
        completion_percentage,
        completion_status: classify_completion(completion_percentage),
    }
}
