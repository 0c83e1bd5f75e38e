use crate::schema::CourseRatingSummary;
use crate::sources::RatingSummaryRow;

/// Keep course rows with at least one rating and derive the average.
///
/// Zero-rating courses are omitted entirely, matching the dashboard's
/// expectation of one row per rated course.
pub fn normalize(rows: &[RatingSummaryRow]) -> Vec<CourseRatingSummary> {
    rows.iter()
        .filter(|row| row.activity_type.eq_ignore_ascii_case("course"))
        .filter_map(|row| {
            let count = row.total_number_of_ratings.unwrap_or(0.0);
            if count <= 0.0 {
                return None;
            }
            let sum = row.sum_of_total_ratings.unwrap_or(0.0);
            Some(CourseRatingSummary {
                course_id: row.activity_id.clone(),
                rating_sum: sum,
                rating_count: count,
                rating_average: sum / count,
                count_1_star: row.total_count_1_stars.unwrap_or(0),
                count_2_star: row.total_count_2_stars.unwrap_or(0),
                count_3_star: row.total_count_3_stars.unwrap_or(0),
                count_4_star: row.total_count_4_stars.unwrap_or(0),
                count_5_star: row.total_count_5_stars.unwrap_or(0),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated_row(id: &str, activity_type: &str, sum: f64, count: f64) -> RatingSummaryRow {
        RatingSummaryRow {
            activity_id: id.into(),
            activity_type: activity_type.into(),
            sum_of_total_ratings: Some(sum),
            total_number_of_ratings: Some(count),
            total_count_1_stars: Some(0),
            total_count_2_stars: Some(1),
            total_count_3_stars: Some(0),
            total_count_4_stars: Some(1),
            total_count_5_stars: Some(2),
        }
    }

    #[test]
    fn derives_average_and_keeps_star_counts() {
        let rows = vec![rated_row("c1", "Course", 18.0, 4.0)];
        let summaries = normalize(&rows);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].course_id, "c1");
        assert_eq!(summaries[0].rating_average, 4.5);
        assert_eq!(summaries[0].count_5_star, 2);
    }

    #[test]
    fn activity_type_match_is_case_insensitive() {
        let rows = vec![
            rated_row("c1", "COURSE", 4.0, 1.0),
            rated_row("p1", "program", 4.0, 1.0),
        ];
        let summaries = normalize(&rows);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].course_id, "c1");
    }

    #[test]
    fn drops_courses_without_ratings() {
        let mut unrated = rated_row("c2", "course", 0.0, 0.0);
        unrated.total_number_of_ratings = Some(0.0);
        let mut missing = rated_row("c3", "course", 0.0, 0.0);
        missing.total_number_of_ratings = None;

        assert!(normalize(&[unrated, missing]).is_empty());
    }
}
