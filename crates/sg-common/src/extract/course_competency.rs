use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::level::parse_level;
use crate::schema::{CourseCompetency, LiveCourse};
use crate::sources::ContentHierarchyRow;

#[derive(Debug, Deserialize)]
struct HierarchyDoc {
    status: Option<String>,
    channel: Option<String>,
    // The competency list is embedded as JSON text inside the hierarchy
    // document; some producers inline it as an array instead.
    #[serde(rename = "competencies_v3")]
    competencies: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct MappedCompetency {
    id: String,
    #[serde(rename = "selectedLevelLevel")]
    selected_level: Option<String>,
}

/// Explode each live course's hierarchy into one row per mapped competency.
///
/// Rows without a live match are dropped (inner join on identifier). A course
/// whose hierarchy or competency list fails to parse contributes no rows.
pub fn normalize(rows: &[ContentHierarchyRow], live: &[LiveCourse]) -> Vec<CourseCompetency> {
    let live_ids: HashSet<&str> = live.iter().map(|course| course.id.as_str()).collect();

    let mut mappings = Vec::new();
    for row in rows {
        if !live_ids.contains(row.identifier.as_str()) {
            continue;
        }
        let Some(raw) = row.hierarchy.as_deref() else {
            continue;
        };
        let doc: HierarchyDoc = match serde_json::from_str(raw) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(course_id = %row.identifier, error = %err, "skipping unparsable course hierarchy");
                continue;
            }
        };

        for competency in mapped_competencies(&row.identifier, doc.competencies) {
            mappings.push(CourseCompetency {
                course_id: row.identifier.clone(),
                course_status: doc.status.clone(),
                course_channel: doc.channel.clone(),
                competency_id: competency.id,
                competency_level: parse_level(competency.selected_level.as_deref()),
            });
        }
    }

    mappings
}

/// Decode the embedded competency list, whether JSON text or an inline array.
fn mapped_competencies(course_id: &str, embedded: Option<Value>) -> Vec<MappedCompetency> {
    let decoded = match embedded {
        None => return Vec::new(),
        Some(Value::String(text)) => serde_json::from_str(&text),
        Some(value) => serde_json::from_value(value),
    };

    match decoded {
        Ok(list) => list,
        Err(err) => {
            warn!(%course_id, error = %err, "skipping unparsable competency list");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live(ids: &[&str]) -> Vec<LiveCourse> {
        ids.iter().map(|id| LiveCourse { id: (*id).into() }).collect()
    }

    fn hierarchy_row(id: &str, hierarchy: &str) -> ContentHierarchyRow {
        ContentHierarchyRow {
            identifier: id.into(),
            hierarchy: Some(hierarchy.into()),
        }
    }

    #[test]
    fn explodes_one_row_per_mapped_competency() {
        let doc = r#"{
            "status": "Live",
            "channel": "0131",
            "competencies_v3": "[{\"id\":\"COMP_1\",\"selectedLevelLevel\":\"Level 2\"},{\"id\":\"COMP_2\",\"selectedLevelLevel\":\"Level 4\"}]"
        }"#;
        let rows = vec![hierarchy_row("c1", doc)];

        let mappings = normalize(&rows, &live(&["c1"]));

        assert_eq!(mappings.len(), 2);
        assert_eq!(mappings[0].competency_id, "COMP_1");
        assert_eq!(mappings[0].competency_level, 2);
        assert_eq!(mappings[1].competency_level, 4);
        assert_eq!(mappings[0].course_status.as_deref(), Some("Live"));
        assert_eq!(mappings[0].course_channel.as_deref(), Some("0131"));
    }

    #[test]
    fn restricts_to_live_courses() {
        let doc = r#"{"status":"Retired","competencies_v3":"[{\"id\":\"COMP_1\"}]"}"#;
        let rows = vec![hierarchy_row("retired-course", doc)];

        assert!(normalize(&rows, &live(&["some-other-course"])).is_empty());
    }

    #[test]
    fn unparsable_level_text_defaults_to_one() {
        let doc = r#"{"competencies_v3":"[{\"id\":\"COMP_1\",\"selectedLevelLevel\":\"advanced\"}]"}"#;
        let rows = vec![hierarchy_row("c1", doc)];

        let mappings = normalize(&rows, &live(&["c1"]));

        assert_eq!(mappings[0].competency_level, 1);
    }

    #[test]
    fn malformed_hierarchy_skips_only_that_course() {
        let good = r#"{"competencies_v3":"[{\"id\":\"COMP_1\"}]"}"#;
        let rows = vec![
            hierarchy_row("broken", "not json at all"),
            hierarchy_row("c1", good),
        ];

        let mappings = normalize(&rows, &live(&["broken", "c1"]));

        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].course_id, "c1");
    }

    #[test]
    fn inline_competency_array_also_parses() {
        let doc = r#"{"competencies_v3":[{"id":"COMP_9","selectedLevelLevel":"Level 3"}]}"#;
        let rows = vec![hierarchy_row("c1", doc)];

        let mappings = normalize(&rows, &live(&["c1"]));

        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].competency_level, 3);
    }
}
