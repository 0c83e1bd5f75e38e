use serde::{Deserialize, Serialize};

/// Ordinal progress label for a completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionStatus {
    #[serde(rename = "not-enrolled")]
    NotEnrolled,
    #[serde(rename = "enrolled")]
    Enrolled,
    #[serde(rename = "started")]
    Started,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl CompletionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionStatus::NotEnrolled => "not-enrolled",
            CompletionStatus::Enrolled => "enrolled",
            CompletionStatus::Started => "started",
            CompletionStatus::InProgress => "in-progress",
            CompletionStatus::Completed => "completed",
        }
    }
}

/// Map a completion percentage to its status label. Total over `None` plus
/// the whole real line; first matching band wins.
pub fn classify_completion(percentage: Option<f64>) -> CompletionStatus {
    match percentage {
        None => CompletionStatus::NotEnrolled,
        Some(p) if p == 0.0 => CompletionStatus::Enrolled,
        Some(p) if p < 10.0 => CompletionStatus::Started,
        Some(p) if p < 100.0 => CompletionStatus::InProgress,
        Some(_) => CompletionStatus::Completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_percentage_means_not_enrolled() {
        assert_eq!(classify_completion(None), CompletionStatus::NotEnrolled);
    }

    #[test]
    fn zero_means_enrolled() {
        assert_eq!(classify_completion(Some(0.0)), CompletionStatus::Enrolled);
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(classify_completion(Some(0.01)), CompletionStatus::Started);
        assert_eq!(classify_completion(Some(9.99)), CompletionStatus::Started);
        assert_eq!(
            classify_completion(Some(10.0)),
            CompletionStatus::InProgress
        );
        assert_eq!(
            classify_completion(Some(99.99)),
            CompletionStatus::InProgress
        );
        assert_eq!(classify_completion(Some(100.0)), CompletionStatus::Completed);
        assert_eq!(classify_completion(Some(150.0)), CompletionStatus::Completed);
    }

    #[test]
    fn negative_percentages_fall_in_started_band() {
        // Upstream should never send these, but the function stays total.
        assert_eq!(classify_completion(Some(-5.0)), CompletionStatus::Started);
    }

    #[test]
    fn serializes_as_kebab_label() {
        let json = serde_json::to_string(&CompletionStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }
}
