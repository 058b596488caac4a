//! CLI argument definitions for the ticket publisher.

use crate::connect::{KafkaConnector, RetryPolicy};
use crate::publisher::PublishSettings;
use clap::builder::RangedU64ValueParser;
use clap::Args;
use std::time::Duration;
use ticket_generator::TicketGenerator;

/// Broker connection arguments.
#[derive(Args, Clone, Debug)]
pub struct BrokerArgs {
    /// Kafka broker address (comma-separated for several, e.g., "broker:9092")
    #[arg(long, env = "KAFKA_BROKERS", default_value = "broker:9092")]
    pub broker_address: String,

    /// Connection attempts before giving up
    #[arg(
        long,
        env = "BOOTSTRAP_MAX_ATTEMPTS",
        default_value = "10",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub bootstrap_max_attempts: u32,

    /// Seconds to wait between connection attempts
    #[arg(long, env = "BOOTSTRAP_RETRY_SECONDS", default_value = "5")]
    pub bootstrap_retry_seconds: u64,

    /// Timeout for the metadata request that proves the broker is reachable
    #[arg(long, env = "KAFKA_PROBE_TIMEOUT_MS", default_value = "5000")]
    pub probe_timeout_ms: u64,

    /// librdkafka delivery timeout for each message
    #[arg(long, env = "KAFKA_MESSAGE_TIMEOUT_MS", default_value = "10000")]
    pub message_timeout_ms: u64,
}

impl BrokerArgs {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.bootstrap_max_attempts,
            Duration::from_secs(self.bootstrap_retry_seconds),
        )
    }

    pub fn connector(&self) -> KafkaConnector {
        KafkaConnector::new(self.message_timeout(), Duration::from_millis(self.probe_timeout_ms))
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_millis(self.message_timeout_ms)
    }
}

/// Publish loop arguments.
#[derive(Args, Clone, Debug)]
pub struct PublishArgs {
    /// Destination topic
    #[arg(long, env = "TICKET_TOPIC", default_value = "caisse")]
    pub topic: String,

    /// Number of tickets buffered before a flush
    #[arg(
        long,
        env = "TICKET_BATCH_SIZE",
        default_value = "10",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub batch_size: usize,

    /// Seconds to wait between generated tickets
    #[arg(long, env = "TICKET_INTERVAL_SECONDS", default_value = "2")]
    pub flush_interval_seconds: u64,

    /// Random seed for a reproducible ticket stream (same seed = same tickets)
    #[arg(long, env = "TICKET_SEED")]
    pub seed: Option<u64>,

    /// Stop after this many tickets instead of running forever
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_tickets: Option<u64>,

    /// Create the destination topic before publishing
    #[arg(long)]
    pub create_topic: bool,

    /// Partitions for a topic created with --create-topic
    #[arg(long, default_value = "3")]
    pub topic_partitions: i32,
}

impl PublishArgs {
    pub fn settings(&self) -> PublishSettings {
        PublishSettings {
            topic: self.topic.clone(),
            batch_size: self.batch_size,
            interval: Duration::from_secs(self.flush_interval_seconds),
            max_tickets: self.max_tickets,
        }
    }

    pub fn generator(&self) -> TicketGenerator {
        match self.seed {
            Some(seed) => TicketGenerator::from_seed(seed),
            None => TicketGenerator::from_entropy(),
        }
    }
}

/// Arguments for the `run` command.
#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub broker: BrokerArgs,

    #[command(flatten)]
    pub publish: PublishArgs,
}
