//! Raw upstream record shapes, deserialized as-is from each source.
//! Column and field names follow the upstream systems, not our schema.

use serde::{Deserialize, Serialize};

/// Optional taxonomy search filters; all-empty means unrestricted.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TaxonomyFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "competencyType", skip_serializing_if = "Option::is_none")]
    pub competency_type: Option<String>,
    #[serde(rename = "competencyArea", skip_serializing_if = "Option::is_none")]
    pub competency_area: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TaxonomyAdditionalProperties {
    #[serde(rename = "competencyType")]
    pub competency_type: Option<String>,
    #[serde(rename = "competencyArea")]
    pub competency_area: Option<String>,
}

/// One competency object from the taxonomy catalog response.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxonomyCompetency {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "additionalProperties", default)]
    pub additional_properties: TaxonomyAdditionalProperties,
}

/// One search-index hit; only the identifier is requested.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SearchHit {
    #[serde(rename = "_source")]
    pub source: SearchHitSource,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SearchHitSource {
    pub identifier: String,
}

/// One row of the rating-summary table.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RatingSummaryRow {
    #[serde(rename = "activityid")]
    pub activity_id: String,
    #[serde(rename = "activitytype")]
    pub activity_type: String,
    pub sum_of_total_ratings: Option<f64>,
    pub total_number_of_ratings: Option<f64>,
    #[serde(rename = "totalcount1stars")]
    pub total_count_1_stars: Option<i64>,
    #[serde(rename = "totalcount2stars")]
    pub total_count_2_stars: Option<i64>,
    #[serde(rename = "totalcount3stars")]
    pub total_count_3_stars: Option<i64>,
    #[serde(rename = "totalcount4stars")]
    pub total_count_4_stars: Option<i64>,
    #[serde(rename = "totalcount5stars")]
    pub total_count_5_stars: Option<i64>,
}

/// One row of the user-content-consumption table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ContentConsumptionRow {
    #[serde(rename = "userid")]
    pub user_id: String,
    #[serde(rename = "courseid")]
    pub course_id: String,
    #[serde(rename = "completionpercentage")]
    pub completion_percentage: Option<f64>,
}

/// One row of the content-hierarchy table. `hierarchy` is the course's
/// hierarchy document as raw JSON text.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ContentHierarchyRow {
    pub identifier: String,
    pub hierarchy: Option<String>,
}

/// One row of the user table. `profile_details` is the profile document as
/// raw JSON text, holding the declared competency list.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UserProfileRow {
    #[serde(rename = "userid")]
    pub user_id: String,
    #[serde(rename = "profiledetails")]
    pub profile_details: Option<String>,
}
