//! Topic publishing: one self-describing JSON record per table row, stamped
//! with the run id and run timestamp.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::run_stamp::RunStamp;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to serialize record for topic {topic}: {message}")]
    Serialize { topic: String, message: String },
    #[error("broker publish to {topic} failed: {message}")]
    Broker { topic: String, message: String },
}

/// Message-topic dispatch. The shipped implementation talks to the broker;
/// tests collect in memory, dry runs drop records on the floor.
#[async_trait]
pub trait RecordPublisher: Send + Sync {
    async fn publish(&self, topic: &str, record: Value) -> Result<(), PublishError>;

    /// Flush any buffered records. Default is a no-op for unbuffered impls.
    async fn flush(&self) -> Result<(), PublishError> {
        Ok(())
    }
}

/// Wrap one row in the published envelope: the row's own fields plus
/// `timestamp` (epoch millis of the run) and `runId`.
pub fn envelope<T: Serialize>(
    row: &T,
    stamp: &RunStamp,
    topic: &str,
) -> Result<Value, PublishError> {
    let mut value = serde_json::to_value(row).map_err(|err| PublishError::Serialize {
        topic: topic.to_string(),
        message: err.to_string(),
    })?;
    let Some(fields) = value.as_object_mut() else {
        return Err(PublishError::Serialize {
            topic: topic.to_string(),
            message: "row did not serialize to a JSON object".into(),
        });
    };
    fields.insert("timestamp".into(), stamp.timestamp.timestamp_millis().into());
    fields.insert("runId".into(), stamp.run_id.clone().into());
    Ok(value)
}

/// Publish every row of a table to its topic. Returns the row count.
pub async fn publish_table<T: Serialize + Sync>(
    publisher: &dyn RecordPublisher,
    topic: &str,
    rows: &[T],
    stamp: &RunStamp,
) -> Result<usize, PublishError> {
    for row in rows {
        publisher.publish(topic, envelope(row, stamp, topic)?).await?;
    }
    info!(topic, rows = rows.len(), "published table");
    Ok(rows.len())
}

/// Publisher that discards everything; backs `--dry-run`.
#[derive(Debug, Default)]
pub struct NoopPublisher;

#[async_trait]
impl RecordPublisher for NoopPublisher {
    async fn publish(&self, _topic: &str, _record: Value) -> Result<(), PublishError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    #[derive(Serialize)]
    struct Row {
        #[serde(rename = "courseID")]
        course_id: &'static str,
    }

    #[test]
    fn envelope_adds_run_stamp_fields() {
        let stamp = RunStamp::at(Utc.with_ymd_and_hms(2026, 1, 5, 6, 0, 0).unwrap());
        let record = envelope(&Row { course_id: "c1" }, &stamp, "topic").unwrap();

        assert_eq!(record["courseID"], "c1");
        assert_eq!(record["runId"], stamp.run_id.as_str());
        assert_eq!(record["timestamp"], stamp.timestamp.timestamp_millis());
    }

    #[test]
    fn non_object_rows_are_rejected() {
        let stamp = RunStamp::capture();
        let err = envelope(&42, &stamp, "topic").unwrap_err();

        assert!(matches!(err, PublishError::Serialize { .. }));
    }

    #[tokio::test]
    async fn publish_table_counts_rows() {
        let stamp = RunStamp::capture();
        let rows = vec![Row { course_id: "a" }, Row { course_id: "b" }];

        let count = publish_table(&NoopPublisher, "topic", &rows, &stamp)
            .await
            .unwrap();

        assert_eq!(count, 2);
    }
}
