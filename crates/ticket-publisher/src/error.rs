//! Error types for the ticket publisher.

use thiserror::Error;

/// Errors that can occur while bootstrapping or publishing.
#[derive(Error, Debug)]
pub enum ProducerError {
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error(
        "Failed to connect to broker '{broker}' after {attempts} attempts. Last error: {last_error}"
    )]
    ConnectionExhausted {
        broker: String,
        attempts: u32,
        last_error: String,
    },

    #[error("Failed to publish ticket to topic '{topic}': {source}")]
    Publish {
        topic: String,
        source: rdkafka::error::KafkaError,
    },

    #[error("Ticket encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Topic creation error: {0}")]
    TopicCreation(String),
}
