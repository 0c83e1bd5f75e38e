use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use sg_common::publish::{PublishError, RecordPublisher};

#[derive(Debug, Error)]
pub enum PublisherInitError {
    #[error("failed to connect to broker: {0}")]
    Connect(#[from] async_nats::ConnectError),
}

/// Topic publisher over NATS. One subject per output table; each record is
/// one self-describing JSON payload.
pub struct NatsPublisher {
    client: async_nats::Client,
}

impl NatsPublisher {
    pub async fn connect(broker_url: &str) -> Result<Self, PublisherInitError> {
        let client = async_nats::connect(broker_url).await?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RecordPublisher for NatsPublisher {
    async fn publish(&self, topic: &str, record: Value) -> Result<(), PublishError> {
        let payload = serde_json::to_vec(&record).map_err(|err| PublishError::Serialize {
            topic: topic.to_string(),
            message: err.to_string(),
        })?;
        self.client
            .publish(topic.to_string(), payload.into())
            .await
            .map_err(|err| PublishError::Broker {
                topic: topic.to_string(),
                message: err.to_string(),
            })
    }

    async fn flush(&self) -> Result<(), PublishError> {
        self.client.flush().await.map_err(|err| PublishError::Broker {
            topic: "(flush)".to_string(),
            message: err.to_string(),
        })
    }
}
