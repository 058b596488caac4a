//! Broker connection bootstrap with bounded retries.

use crate::error::ProducerError;
use anyhow::Context;
use async_trait::async_trait;
use rdkafka::producer::{FutureProducer, Producer};
use rdkafka::ClientConfig;
use std::time::Duration;

/// Default number of connection attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
/// Default delay between connection attempts in seconds.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 5;

/// Opens a client handle to a broker.
#[async_trait]
pub trait BrokerConnector: Send + Sync {
    type Client: Send;

    /// Make a single connection attempt.
    async fn connect(&self, broker: &str) -> anyhow::Result<Self::Client>;
}

/// How many times to try connecting and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            max_attempts,
            retry_delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        }
    }
}

/// Connect to the broker, retrying failures according to `policy`.
///
/// Returns as soon as one attempt succeeds. The delay is awaited after every
/// failed attempt, the last one included, so `max_attempts` refusals take
/// `max_attempts * retry_delay` before `ProducerError::ConnectionExhausted` is
/// returned with the last underlying error.
pub async fn acquire_client<C: BrokerConnector>(
    connector: &C,
    broker: &str,
    policy: RetryPolicy,
) -> Result<C::Client, ProducerError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut last_error = String::new();

    tracing::debug!(
        "Connecting to broker at {} (max attempts: {}, retry delay: {:?})",
        broker,
        max_attempts,
        policy.retry_delay
    );

    for attempt in 1..=max_attempts {
        match connector.connect(broker).await {
            Ok(client) => {
                tracing::info!(
                    "Connected to broker '{}' (attempt {}/{})",
                    broker,
                    attempt,
                    max_attempts
                );
                return Ok(client);
            }
            Err(e) => {
                last_error = format!("{e:#}");
                tracing::warn!(
                    "Failed to connect to broker '{}' (attempt {}/{}): {}. Retrying in {:?}...",
                    broker,
                    attempt,
                    max_attempts,
                    last_error,
                    policy.retry_delay
                );
                tokio::time::sleep(policy.retry_delay).await;
            }
        }
    }

    Err(ProducerError::ConnectionExhausted {
        broker: broker.to_string(),
        attempts: max_attempts,
        last_error,
    })
}

/// Connects an rdkafka `FutureProducer`.
///
/// Creating a librdkafka handle never touches the network, so each attempt
/// also fetches cluster metadata to prove the broker is reachable.
#[derive(Debug, Clone)]
pub struct KafkaConnector {
    message_timeout: Duration,
    probe_timeout: Duration,
}

impl KafkaConnector {
    pub fn new(message_timeout: Duration, probe_timeout: Duration) -> Self {
        Self {
            message_timeout,
            probe_timeout,
        }
    }

    fn client_config(&self, broker: &str) -> ClientConfig {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", broker)
            .set(
                "message.timeout.ms",
                self.message_timeout.as_millis().to_string(),
            );
        config
    }
}

impl Default for KafkaConnector {
    fn default() -> Self {
        Self::new(Duration::from_secs(10), Duration::from_secs(5))
    }
}

#[async_trait]
impl BrokerConnector for KafkaConnector {
    type Client = FutureProducer;

    async fn connect(&self, broker: &str) -> anyhow::Result<FutureProducer> {
        let producer: FutureProducer = self
            .client_config(broker)
            .create()
            .context("Failed to create Kafka producer")?;

        // fetch_metadata blocks the calling thread
        let probe = producer.clone();
        let timeout = self.probe_timeout;
        let broker_count = tokio::task::spawn_blocking(move || {
            probe
                .client()
                .fetch_metadata(None, timeout)
                .map(|metadata| metadata.brokers().len())
        })
        .await
        .context("Broker probe task failed")?
        .with_context(|| format!("Broker '{broker}' did not answer a metadata request"))?;

        tracing::debug!("Broker '{}' reports {} cluster member(s)", broker, broker_count);

        Ok(producer)
    }
}
