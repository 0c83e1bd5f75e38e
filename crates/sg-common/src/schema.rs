//! Canonical row types produced by the extractors and the two join stages.
//!
//! Field names serialize with the column names the downstream dashboards
//! expect, so a published record is exactly one row of the matching table.

use serde::Serialize;

use crate::classify::CompletionStatus;

/// Aggregated rating figures for one course. Only courses with at least one
/// rating appear.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRatingSummary {
    #[serde(rename = "courseID")]
    pub course_id: String,
    #[serde(rename = "ratingSum")]
    pub rating_sum: f64,
    #[serde(rename = "ratingCount")]
    pub rating_count: f64,
    #[serde(rename = "ratingAverage")]
    pub rating_average: f64,
    #[serde(rename = "count1Star")]
    pub count_1_star: i64,
    #[serde(rename = "count2Star")]
    pub count_2_star: i64,
    #[serde(rename = "count3Star")]
    pub count_3_star: i64,
    #[serde(rename = "count4Star")]
    pub count_4_star: i64,
    #[serde(rename = "count5Star")]
    pub count_5_star: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserCourseCompletion {
    #[serde(rename = "completionUserID")]
    pub user_id: String,
    #[serde(rename = "completionCourseID")]
    pub course_id: String,
    #[serde(rename = "completionPercentage")]
    pub completion_percentage: Option<f64>,
    #[serde(rename = "completionStatus")]
    pub completion_status: CompletionStatus,
}

/// One competency from the external taxonomy catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FracCompetency {
    #[serde(rename = "fracCompetencyID")]
    pub competency_id: String,
    #[serde(rename = "fracCompetencyName")]
    pub competency_name: String,
    #[serde(rename = "fracCompetencyStatus")]
    pub competency_status: Option<String>,
}

/// Identifier of a published, status=Live course. Internal filter table,
/// never published downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LiveCourse {
    pub id: String,
}

/// One (course, mapped competency) pair, restricted to live courses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseCompetency {
    #[serde(rename = "courseID")]
    pub course_id: String,
    #[serde(rename = "courseStatus")]
    pub course_status: Option<String>,
    #[serde(rename = "courseChannel")]
    pub course_channel: Option<String>,
    #[serde(rename = "courseCompetencyID")]
    pub competency_id: String,
    #[serde(rename = "courseCompetencyLevel")]
    pub competency_level: i64,
}

/// A competency requirement from the latest approved work order of one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpectedCompetency {
    #[serde(rename = "expOrgID")]
    pub org_id: String,
    #[serde(rename = "expWorkOrderID")]
    pub work_order_id: String,
    #[serde(rename = "expUserID")]
    pub user_id: String,
    #[serde(rename = "expCompetencyID")]
    pub competency_id: String,
    #[serde(rename = "expCompetencyLevel")]
    pub competency_level: i64,
}

/// A competency a user declared about themselves in their profile.
///
/// `competency_id` stays optional: profile entries occasionally miss the id,
/// and the gap join matches on it null-safely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclaredCompetency {
    #[serde(rename = "decUserID")]
    pub user_id: String,
    #[serde(rename = "decCompetencyID")]
    pub competency_id: Option<String>,
    #[serde(rename = "decCompetencyLevel")]
    pub competency_level: i64,
}

/// Expected-vs-declared gap for one (user, competency, org, work order).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetencyGap {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "competencyID")]
    pub competency_id: String,
    #[serde(rename = "orgID")]
    pub org_id: String,
    #[serde(rename = "workOrderID")]
    pub work_order_id: String,
    #[serde(rename = "expectedLevel")]
    pub expected_level: i64,
    #[serde(rename = "declaredLevel")]
    pub declared_level: i64,
    #[serde(rename = "competencyGap")]
    pub gap: i64,
}

/// Final output row: a gap plus the best completion progress toward closing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetencyGapCompletion {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "competencyID")]
    pub competency_id: String,
    #[serde(rename = "orgID")]
    pub org_id: String,
    #[serde(rename = "workOrderID")]
    pub work_order_id: String,
    #[serde(rename = "expectedLevel")]
    pub expected_level: i64,
    #[serde(rename = "declaredLevel")]
    pub declared_level: i64,
    #[serde(rename = "competencyGap")]
    pub gap: i64,
    #[serde(rename = "completionPercentage")]
    pub completion_percentage: Option<f64>,
    #[serde(rename = "completionStatus")]
    pub completion_status: CompletionStatus,
}
