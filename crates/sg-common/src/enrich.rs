//! Completion enrichment: per positive gap, the best progress the user has
//! made through live courses that teach the competency at a useful level.

use std::collections::HashMap;

use crate::gap::with_completion;
use crate::schema::{CompetencyGap, CompetencyGapCompletion, CourseCompetency, UserCourseCompletion};

/// Enrich every gap row with a completion percentage and status.
///
/// Only `gap > 0` rows go through the course joins; a course mapping counts
/// only when its level does not exceed the expected level. The best (maximum)
/// completion percentage across qualifying courses wins, defaulting to 0.0
/// when the user never enrolled in any of them. Non-positive gaps pass
/// through with a null percentage, which classifies as not-enrolled.
pub fn enrich(
    gaps: &[CompetencyGap],
    mappings: &[CourseCompetency],
    completions: &[UserCourseCompletion],
) -> Vec<CompetencyGapCompletion> {
    // competency id -> (course id, taught level)
    let mut courses_by_competency: HashMap<&str, Vec<(&str, i64)>> = HashMap::new();
    for mapping in mappings {
        courses_by_competency
            .entry(mapping.competency_id.as_str())
            .or_default()
            .push((mapping.course_id.as_str(), mapping.competency_level));
    }

    // (user id, course id) -> best recorded percentage. SQL-style max: null
    // percentages do not contribute.
    let mut best_consumption: HashMap<(&str, &str), f64> = HashMap::new();
    for completion in completions {
        let Some(percentage) = completion.completion_percentage else {
            continue;
        };
        let key = (completion.user_id.as_str(), completion.course_id.as_str());
        let best = best_consumption.entry(key).or_insert(percentage);
        *best = best.max(percentage);
    }

    gaps.iter()
        .map(|gap| {
            if gap.gap <= 0 {
                return with_completion(gap, None);
            }

            let mut best: Option<f64> = None;
            if let Some(courses) = courses_by_competency.get(gap.competency_id.as_str()) {
                for (course_id, taught_level) in courses {
                    if *taught_level > gap.expected_level {
                        continue;
                    }
                    if let Some(percentage) =
                        best_consumption.get(&(gap.user_id.as_str(), *course_id))
                    {
                        best = Some(best.map_or(*percentage, |b| b.max(*percentage)));
                    }
                }
            }

            with_completion(gap, Some(best.unwrap_or(0.0)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::CompletionStatus;

    fn gap(user: &str, competency: &str, expected: i64, declared: i64) -> CompetencyGap {
        CompetencyGap {
            user_id: user.into(),
            competency_id: competency.into(),
            org_id: "org-1".into(),
            work_order_id: "wo-1".into(),
            expected_level: expected,
            declared_level: declared,
            gap: expected - declared,
        }
    }

    fn mapping(course: &str, competency: &str, level: i64) -> CourseCompetency {
        CourseCompetency {
            course_id: course.into(),
            course_status: Some("Live".into()),
            course_channel: None,
            competency_id: competency.into(),
            competency_level: level,
        }
    }

    fn completion(user: &str, course: &str, percentage: Option<f64>) -> UserCourseCompletion {
        UserCourseCompletion {
            user_id: user.into(),
            course_id: course.into(),
            completion_percentage: percentage,
            completion_status: crate::classify::classify_completion(percentage),
        }
    }

    #[test]
    fn best_progress_across_qualifying_courses_wins() {
        let gaps = vec![gap("u1", "C1", 3, 0)];
        let mappings = vec![mapping("k1", "C1", 2), mapping("k2", "C1", 1)];
        let completions = vec![
            completion("u1", "k1", Some(50.0)),
            completion("u1", "k2", Some(20.0)),
        ];

        let enriched = enrich(&gaps, &mappings, &completions);

        assert_eq!(enriched[0].completion_percentage, Some(50.0));
        assert_eq!(enriched[0].completion_status, CompletionStatus::InProgress);
    }

    #[test]
    fn course_above_expected_level_does_not_count() {
        let gaps = vec![gap("u1", "C1", 2, 0)];
        let mappings = vec![mapping("k1", "C1", 4)];
        let completions = vec![completion("u1", "k1", Some(80.0))];

        let enriched = enrich(&gaps, &mappings, &completions);

        // The only mapped course teaches above the expected level, so the
        // user's progress in it contributes nothing.
        assert_eq!(enriched[0].completion_percentage, Some(0.0));
        assert_eq!(enriched[0].completion_status, CompletionStatus::Enrolled);
    }

    #[test]
    fn no_consumption_defaults_to_zero_for_positive_gaps() {
        let gaps = vec![gap("u1", "C1", 3, 0)];
        let mappings = vec![mapping("k1", "C1", 2)];

        let enriched = enrich(&gaps, &mappings, &[]);

        assert_eq!(enriched[0].completion_percentage, Some(0.0));
        assert_eq!(enriched[0].completion_status, CompletionStatus::Enrolled);
    }

    #[test]
    fn non_positive_gaps_pass_through_with_null_completion() {
        let gaps = vec![gap("u1", "C1", 3, 5), gap("u1", "C2", 2, 2)];
        let mappings = vec![mapping("k1", "C1", 2)];
        let completions = vec![completion("u1", "k1", Some(90.0))];

        let enriched = enrich(&gaps, &mappings, &completions);

        for row in &enriched {
            assert_eq!(row.completion_percentage, None);
            assert_eq!(row.completion_status, CompletionStatus::NotEnrolled);
        }
    }

    #[test]
    fn every_gap_row_survives_enrichment() {
        let gaps = vec![gap("u1", "C1", 3, 5), gap("u1", "C2", 4, 0)];

        let enriched = enrich(&gaps, &[], &[]);

        assert_eq!(enriched.len(), gaps.len());
        assert_eq!(enriched[1].completion_percentage, Some(0.0));
    }

    #[test]
    fn null_recorded_percentages_do_not_beat_real_progress() {
        let gaps = vec![gap("u1", "C1", 3, 0)];
        let mappings = vec![mapping("k1", "C1", 2), mapping("k2", "C1", 2)];
        let completions = vec![
            completion("u1", "k1", None),
            completion("u1", "k2", Some(15.0)),
        ];

        let enriched = enrich(&gaps, &mappings, &completions);

        assert_eq!(enriched[0].completion_percentage, Some(15.0));
    }
}
