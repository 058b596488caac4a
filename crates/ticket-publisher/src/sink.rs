//! Message sinks that receive serialized tickets.

use crate::error::ProducerError;
use async_trait::async_trait;
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::ClientConfig;
use std::time::Duration;

/// Destination for serialized ticket records.
#[async_trait]
pub trait TicketSink: Send {
    /// Publish one record and wait until the destination accepted it.
    async fn publish(&mut self, topic: &str, payload: &str) -> Result<(), ProducerError>;
}

/// Publishes ticket records to Kafka, one message per record, without a key.
pub struct KafkaTicketSink {
    producer: FutureProducer,
    delivery_timeout: Duration,
}

impl KafkaTicketSink {
    pub fn new(producer: FutureProducer, delivery_timeout: Duration) -> Self {
        Self {
            producer,
            delivery_timeout,
        }
    }
}

#[async_trait]
impl TicketSink for KafkaTicketSink {
    async fn publish(&mut self, topic: &str, payload: &str) -> Result<(), ProducerError> {
        let record = FutureRecord::<(), str>::to(topic).payload(payload);

        self.producer
            .send(record, self.delivery_timeout)
            .await
            .map_err(|(err, _)| ProducerError::Publish {
                topic: topic.to_string(),
                source: err,
            })?;

        Ok(())
    }
}

/// Create a Kafka topic if it doesn't exist.
pub async fn create_topic_if_not_exists(
    brokers: &str,
    topic: &str,
    partitions: i32,
) -> Result<(), ProducerError> {
    let admin_client: AdminClient<DefaultClientContext> = ClientConfig::new()
        .set("bootstrap.servers", brokers)
        .create()
        .map_err(ProducerError::Kafka)?;

    let new_topic = NewTopic::new(topic, partitions, TopicReplication::Fixed(1));
    let opts = AdminOptions::new().operation_timeout(Some(Duration::from_secs(10)));

    let results = admin_client
        .create_topics(&[new_topic], &opts)
        .await
        .map_err(|e| ProducerError::TopicCreation(format!("Failed to create topic: {e}")))?;

    for result in results {
        match result {
            Ok(topic_name) => {
                tracing::info!("Topic '{}' created successfully", topic_name);
            }
            Err((topic_name, err)) => {
                let err_str = err.to_string();
                if err_str.contains("already exists") || err_str.contains("TopicExistsException")
                {
                    tracing::info!("Topic '{}' already exists", topic_name);
                } else {
                    return Err(ProducerError::TopicCreation(format!(
                        "Failed to create topic {topic_name}: {err}"
                    )));
                }
            }
        }
    }

    Ok(())
}
