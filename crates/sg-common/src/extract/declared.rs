use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::level::parse_level;
use crate::schema::DeclaredCompetency;
use crate::sources::UserProfileRow;

#[derive(Debug, Deserialize)]
struct ProfileDoc {
    #[serde(default)]
    competencies: Vec<ProfileCompetency>,
}

#[derive(Debug, Deserialize)]
struct ProfileCompetency {
    id: Option<String>,
    #[serde(rename = "competencySelfAttestedLevel")]
    self_attested_level: Option<Value>,
}

/// Explode each user profile's declared competency list into rows.
/// A missing self-attested level defaults to 1; an unparsable profile skips
/// that user only.
pub fn normalize(rows: &[UserProfileRow]) -> Vec<DeclaredCompetency> {
    let mut declared = Vec::new();
    for row in rows {
        let Some(raw) = row.profile_details.as_deref() else {
            continue;
        };
        let profile: ProfileDoc = match serde_json::from_str(raw) {
            Ok(profile) => profile,
            Err(err) => {
                warn!(user_id = %row.user_id, error = %err, "skipping unparsable user profile");
                continue;
            }
        };

        for competency in profile.competencies {
            declared.push(DeclaredCompetency {
                user_id: row.user_id.clone(),
                competency_id: competency.id,
                competency_level: declared_level(competency.self_attested_level.as_ref()),
            });
        }
    }
    declared
}

fn declared_level(value: Option<&Value>) -> i64 {
    let level = match value {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(1),
        Some(Value::String(text)) => parse_level(Some(text)),
        _ => 1,
    };
    // A profile can carry any number; declared levels never go below zero.
    level.max(0)
}
