//! Strongly-typed pipeline settings, resolved once from the environment
//! before the run starts. The core only ever sees this struct.

use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("environment variable {name} is invalid: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Keyspace/table coordinates of the four column-family source tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTables {
    pub keyspace: String,
    pub user: String,
    pub content_consumption: String,
    pub content_hierarchy: String,
    pub rating_summary: String,
}

/// One topic per published output table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topics {
    pub course_rating_summary: String,
    pub user_course_progress: String,
    pub frac_competency: String,
    pub course_competency: String,
    pub expected_competency: String,
    pub declared_competency: String,
    pub competency_gap: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Connection string for the column-family store read path.
    pub database_url: String,
    pub tables: SourceTables,
    /// Taxonomy service search endpoint.
    pub taxonomy_url: String,
    pub taxonomy_api_key: Option<String>,
    /// Search index composite-search endpoint.
    pub search_url: String,
    /// Analytical engine SQL endpoint.
    pub analytics_url: String,
    /// Broker address for topic publishing.
    pub broker_url: String,
    pub topics: Topics,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            database_url: required("SG_DATABASE_URL")?,
            tables: SourceTables {
                keyspace: with_default("SG_KEYSPACE", "sunbird"),
                user: with_default("SG_TABLE_USER", "user"),
                content_consumption: with_default(
                    "SG_TABLE_CONTENT_CONSUMPTION",
                    "user_content_consumption",
                ),
                content_hierarchy: with_default("SG_TABLE_CONTENT_HIERARCHY", "content_hierarchy"),
                rating_summary: with_default("SG_TABLE_RATING_SUMMARY", "ratings_summary"),
            },
            taxonomy_url: required("SG_TAXONOMY_URL")?,
            taxonomy_api_key: optional("SG_TAXONOMY_API_KEY"),
            search_url: required("SG_SEARCH_URL")?,
            analytics_url: required("SG_ANALYTICS_URL")?,
            broker_url: required("SG_BROKER_URL")?,
            topics: Topics {
                course_rating_summary: with_default("SG_TOPIC_RATINGS", "course-rating-summary"),
                user_course_progress: with_default("SG_TOPIC_PROGRESS", "user-course-progress"),
                frac_competency: with_default("SG_TOPIC_FRAC", "frac-competency"),
                course_competency: with_default("SG_TOPIC_COURSE_COMPETENCY", "course-competency"),
                expected_competency: with_default("SG_TOPIC_EXPECTED", "expected-competency"),
                declared_competency: with_default("SG_TOPIC_DECLARED", "declared-competency"),
                competency_gap: with_default("SG_TOPIC_GAP", "competency-gap"),
            },
        })
    }
}

fn required(name: &'static str) -> Result<String, SettingsError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => Err(SettingsError::Invalid {
            name,
            message: "value is empty".into(),
        }),
        Err(_) => Err(SettingsError::Missing(name)),
    }
}

fn optional(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn with_default(name: &'static str, default: &str) -> String {
    optional(name).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process-global, so everything lives in one test.
    #[test]
    fn from_env_resolves_required_optional_and_defaulted() {
        let required_vars = [
            ("SG_DATABASE_URL", "postgres://localhost/sg"),
            ("SG_TAXONOMY_URL", "http://frac.local/search"),
            ("SG_SEARCH_URL", "http://search.local/v1/search"),
            ("SG_ANALYTICS_URL", "http://druid.local/sql"),
            ("SG_BROKER_URL", "nats://localhost:4222"),
        ];

        for (name, _) in &required_vars {
            env::remove_var(name);
        }
        assert!(matches!(
            Settings::from_env(),
            Err(SettingsError::Missing("SG_DATABASE_URL"))
        ));

        for (name, value) in &required_vars {
            env::set_var(name, value);
        }
        env::set_var("SG_TOPIC_GAP", "competency-gap-v2");
        env::remove_var("SG_TAXONOMY_API_KEY");

        let settings = Settings::from_env().unwrap();

        assert_eq!(settings.broker_url, "nats://localhost:4222");
        assert_eq!(settings.taxonomy_api_key, None);
        assert_eq!(settings.tables.rating_summary, "ratings_summary");
        assert_eq!(settings.topics.competency_gap, "competency-gap-v2");
        assert_eq!(settings.topics.frac_competency, "frac-competency");
    }
}
