//! Batched Kafka publisher for synthetic point-of-sale tickets.
//!
//! This crate connects to a Kafka broker with bounded retries, then drives a
//! `TicketGenerator` on a fixed interval, buffering JSON ticket records and
//! publishing them one message per ticket whenever a batch is full.
//!
//! # Architecture
//!
//! ```text
//!   acquire_client (RetryPolicy)
//!        │  BrokerConnector::connect, sleep between failures
//!        ▼
//!   FutureProducer ──► KafkaTicketSink
//!                            │
//!   TicketGenerator ──► BatchPublisher
//!                        │  tick: generate, buffer
//!                        │  flush: publish each record, clear buffer
//!                        ▼
//!                   Kafka topic ("caisse")
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use ticket_publisher::{acquire_client, BatchPublisher, KafkaConnector, KafkaTicketSink};
//! use ticket_publisher::{PublishSettings, RetryPolicy};
//! use ticket_generator::TicketGenerator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let connector = KafkaConnector::default();
//!     let producer = acquire_client(&connector, "broker:9092", RetryPolicy::default()).await?;
//!
//!     let sink = KafkaTicketSink::new(producer, std::time::Duration::from_secs(10));
//!     let publisher = BatchPublisher::new(
//!         sink,
//!         TicketGenerator::from_entropy(),
//!         PublishSettings::default(),
//!     );
//!     publisher.run().await?;
//!     Ok(())
//! }
//! ```

pub mod args;
pub mod connect;
pub mod error;
pub mod publisher;
pub mod sink;

// Re-exports for convenience
pub use args::{BrokerArgs, PublishArgs, RunArgs};
pub use connect::{acquire_client, BrokerConnector, KafkaConnector, RetryPolicy};
pub use error::ProducerError;
pub use publisher::{
    BatchPublisher, PublishMetrics, PublishSettings, TickOutcome, DEFAULT_BATCH_SIZE,
    DEFAULT_TOPIC,
};
pub use sink::{create_topic_if_not_exists, KafkaTicketSink, TicketSink};
