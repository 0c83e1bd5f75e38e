use crate::classify::classify_completion;
use crate::schema::UserCourseCompletion;
use crate::sources::ContentConsumptionRow;

/// Project consumption rows to (user, course, percentage) and classify the
/// percentage with the shared status bands.
pub fn normalize(rows: &[ContentConsumptionRow]) -> Vec<UserCourseCompletion> {
    rows.iter()
        .map(|row| UserCourseCompletion {
            user_id: row.user_id.clone(),
            course_id: row.course_id.clone(),
            completion_percentage: row.completion_percentage,
            completion_status: classify_completion(row.completion_percentage),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::CompletionStatus;

    #[test]
    fn classifies_each_row_by_percentage() {
        let rows = vec![
            ContentConsumptionRow {
                user_id: "u1".into(),
                course_id: "c1".into(),
                completion_percentage: Some(42.0),
            },
            ContentConsumptionRow {
                user_id: "u2".into(),
                course_id: "c1".into(),
                completion_percentage: None,
            },
        ];

        let completions = normalize(&rows);

        assert_eq!(completions[0].completion_status, CompletionStatus::InProgress);
        assert_eq!(completions[1].completion_status, CompletionStatus::NotEnrolled);
        assert_eq!(completions[1].completion_percentage, None);
    }
}
