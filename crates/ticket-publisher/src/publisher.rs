//! Batched ticket publishing loop.
//!
//! The publisher generates one ticket per tick, buffers its JSON record, and
//! once `batch_size` records are buffered publishes every one of them as an
//! individual message before clearing the buffer. A fixed interval is awaited
//! between ticks whether or not a flush happened.

use crate::error::ProducerError;
use crate::sink::TicketSink;
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;
use ticket_generator::TicketGenerator;
use tokio::time::Instant;
use tracing::info;

/// Default destination topic.
pub const DEFAULT_TOPIC: &str = "caisse";
/// Default number of tickets per flush.
pub const DEFAULT_BATCH_SIZE: usize = 10;
/// Default pause between ticks in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 2;

/// Settings for the publish loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishSettings {
    pub topic: String,
    pub batch_size: usize,
    pub interval: Duration,
    /// Stop after this many tickets; `None` runs until the process ends.
    pub max_tickets: Option<u64>,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            topic: DEFAULT_TOPIC.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            max_tickets: None,
        }
    }
}

/// Metrics from a publish run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishMetrics {
    /// Number of tickets generated.
    pub tickets_generated: u64,
    /// Number of messages accepted by the sink.
    pub messages_published: u64,
    /// Number of flushes that published at least one message.
    pub batch_count: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

impl PublishMetrics {
    /// Calculate messages per second.
    pub fn messages_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.messages_published as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The ticket was buffered; `pending` records await the next flush.
    Buffered { pending: usize },
    /// The buffer filled up and `published` records were sent.
    Flushed { published: usize },
}

/// Drives a `TicketGenerator` and pushes batches through a `TicketSink`.
pub struct BatchPublisher<S, R = StdRng> {
    sink: S,
    generator: TicketGenerator<R>,
    settings: PublishSettings,
    buffer: Vec<String>,
    metrics: PublishMetrics,
}

impl<S, R> BatchPublisher<S, R>
where
    S: TicketSink,
    R: Rng + Send,
{
    pub fn new(sink: S, generator: TicketGenerator<R>, settings: PublishSettings) -> Self {
        let settings = PublishSettings {
            batch_size: settings.batch_size.max(1),
            ..settings
        };
        Self {
            sink,
            generator,
            buffer: Vec::with_capacity(settings.batch_size),
            settings,
            metrics: PublishMetrics::default(),
        }
    }

    /// Records waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    pub fn metrics(&self) -> &PublishMetrics {
        &self.metrics
    }

    pub fn settings(&self) -> &PublishSettings {
        &self.settings
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Generate one ticket, buffer it, and flush if the batch is complete.
    pub async fn tick(&mut self) -> Result<TickOutcome, ProducerError> {
        let ticket = self.generator.generate_ticket();
        let payload = ticket.to_record().to_json()?;
        info!("Ticket generated (not sent): {}", payload);

        self.buffer.push(payload);
        self.metrics.tickets_generated += 1;

        if self.buffer.len() >= self.settings.batch_size {
            let published = self.flush().await?;
            return Ok(TickOutcome::Flushed { published });
        }

        Ok(TickOutcome::Buffered {
            pending: self.buffer.len(),
        })
    }

    /// Publish every buffered record in order and clear the buffer.
    ///
    /// The buffer is emptied before publishing starts: if a send fails, the
    /// records already delivered stay delivered and the rest of the batch is
    /// dropped.
    pub async fn flush(&mut self) -> Result<usize, ProducerError> {
        if self.buffer.is_empty() {
            return Ok(0);
        }

        let batch = std::mem::take(&mut self.buffer);
        for payload in &batch {
            self.sink.publish(&self.settings.topic, payload).await?;
            self.metrics.messages_published += 1;
        }
        self.metrics.batch_count += 1;

        info!(
            "{} tickets sent to topic '{}' (batch {})",
            batch.len(),
            self.settings.topic,
            self.metrics.batch_count
        );
        info!("Sent batch: [{}]", batch.join(", "));

        Ok(batch.len())
    }

    fn limit_reached(&self) -> bool {
        self.settings
            .max_tickets
            .is_some_and(|max| self.metrics.tickets_generated >= max)
    }

    /// Run the publish loop.
    ///
    /// Without `max_tickets` this only returns on a publish failure. With a
    /// limit, the loop stops after the last ticket (no trailing pause), any
    /// partial batch is flushed, and the run metrics are returned.
    pub async fn run(mut self) -> Result<PublishMetrics, ProducerError> {
        let start_time = Instant::now();

        info!(
            "Publishing tickets to topic '{}' (batch size: {}, interval: {:?})",
            self.settings.topic, self.settings.batch_size, self.settings.interval
        );

        loop {
            if self.limit_reached() {
                break;
            }

            self.tick().await?;

            if self.limit_reached() {
                break;
            }

            tokio::time::sleep(self.settings.interval).await;
        }

        self.flush().await?;
        self.metrics.total_duration = start_time.elapsed();

        info!(
            "Publishing complete: {} tickets, {} messages in {} batches over {:?} ({:.2} msg/sec)",
            self.metrics.tickets_generated,
            self.metrics.messages_published,
            self.metrics.batch_count,
            self.metrics.total_duration,
            self.metrics.messages_per_second()
        );

        Ok(self.metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rdkafka::error::KafkaError;
    use rdkafka::types::RDKafkaErrorCode;
    use ticket_generator::TicketRecord;

    /// Keeps published records in memory; optionally fails the nth publish.
    #[derive(Default)]
    struct MemorySink {
        published: Vec<(String, String)>,
        calls: usize,
        fail_on_call: Option<usize>,
    }

    impl MemorySink {
        fn failing_on(call: usize) -> Self {
            Self {
                fail_on_call: Some(call),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl TicketSink for MemorySink {
        async fn publish(&mut self, topic: &str, payload: &str) -> Result<(), ProducerError> {
            self.calls += 1;
            if self.fail_on_call == Some(self.calls) {
                return Err(ProducerError::Publish {
                    topic: topic.to_string(),
                    source: KafkaError::MessageProduction(RDKafkaErrorCode::BrokerNotAvailable),
                });
            }
            self.published.push((topic.to_string(), payload.to_string()));
            Ok(())
        }
    }

    fn settings(batch_size: usize) -> PublishSettings {
        PublishSettings {
            batch_size,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_flush_when_batch_full() {
        let mut publisher =
            BatchPublisher::new(MemorySink::default(), TicketGenerator::from_seed(1), settings(2));

        assert_eq!(
            publisher.tick().await.unwrap(),
            TickOutcome::Buffered { pending: 1 }
        );
        assert_eq!(publisher.sink().calls, 0);

        assert_eq!(
            publisher.tick().await.unwrap(),
            TickOutcome::Flushed { published: 2 }
        );
        assert_eq!(publisher.sink().calls, 2);
        assert_eq!(publisher.pending(), 0);

        assert_eq!(
            publisher.tick().await.unwrap(),
            TickOutcome::Buffered { pending: 1 }
        );
        assert_eq!(publisher.sink().calls, 2);
        assert_eq!(publisher.pending(), 1);
    }

    #[tokio::test]
    async fn test_buffer_never_reaches_batch_size_between_ticks() {
        let mut publisher =
            BatchPublisher::new(MemorySink::default(), TicketGenerator::from_seed(2), settings(10));

        for i in 1..=95u64 {
            publisher.tick().await.unwrap();
            assert!(publisher.pending() < 10);
            assert_eq!(publisher.pending() as u64, i % 10);
        }

        assert_eq!(publisher.metrics().tickets_generated, 95);
        assert_eq!(publisher.metrics().messages_published, 90);
        assert_eq!(publisher.metrics().batch_count, 9);
    }

    #[tokio::test]
    async fn test_records_published_in_generation_order() {
        let mut publisher =
            BatchPublisher::new(MemorySink::default(), TicketGenerator::from_seed(11), settings(5));
        for _ in 0..5 {
            publisher.tick().await.unwrap();
        }

        let mut twin = TicketGenerator::from_seed(11);
        let sink = publisher.into_sink();
        assert_eq!(sink.published.len(), 5);

        for (topic, payload) in &sink.published {
            assert_eq!(topic, "caisse");
            let record: TicketRecord = serde_json::from_str(payload).unwrap();
            let expected = twin.generate_ticket().to_record();
            assert_eq!(record.articles, expected.articles);
            assert_eq!(record.total, expected.total);
            assert_eq!(record.magasin_id, expected.magasin_id);
        }
    }

    #[tokio::test]
    async fn test_publish_failure_propagates_and_drops_rest_of_batch() {
        let mut publisher =
            BatchPublisher::new(MemorySink::failing_on(2), TicketGenerator::from_seed(3), settings(3));

        publisher.tick().await.unwrap();
        publisher.tick().await.unwrap();
        let result = publisher.tick().await;

        match result {
            Err(ProducerError::Publish { topic, .. }) => assert_eq!(topic, "caisse"),
            other => panic!("Expected Publish error, got {other:?}"),
        }
        assert_eq!(publisher.sink().published.len(), 1);
        assert_eq!(publisher.sink().calls, 2);
        assert_eq!(publisher.pending(), 0);
        assert_eq!(publisher.metrics().messages_published, 1);
        assert_eq!(publisher.metrics().batch_count, 0);
    }

    #[tokio::test]
    async fn test_flush_empty_buffer_is_noop() {
        let mut publisher =
            BatchPublisher::new(MemorySink::default(), TicketGenerator::from_seed(4), settings(3));
        assert_eq!(publisher.flush().await.unwrap(), 0);
        assert_eq!(publisher.metrics().batch_count, 0);
        assert_eq!(publisher.sink().calls, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_run_flushes_trailing_batch() {
        let publisher = BatchPublisher::new(
            MemorySink::default(),
            TicketGenerator::from_seed(5),
            PublishSettings {
                batch_size: 2,
                max_tickets: Some(5),
                ..Default::default()
            },
        );
        let start = Instant::now();

        let metrics = publisher.run().await.unwrap();

        assert_eq!(metrics.tickets_generated, 5);
        assert_eq!(metrics.messages_published, 5);
        assert_eq!(metrics.batch_count, 3);
        // Four pauses between five ticks
        assert_eq!(start.elapsed(), Duration::from_secs(8));
        assert_eq!(metrics.total_duration, Duration::from_secs(8));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_on_publish_failure() {
        let publisher = BatchPublisher::new(
            MemorySink::failing_on(4),
            TicketGenerator::from_seed(6),
            PublishSettings {
                batch_size: 2,
                max_tickets: Some(100),
                ..Default::default()
            },
        );

        let result = publisher.run().await;
        assert!(matches!(result, Err(ProducerError::Publish { .. })));
    }

    #[test]
    fn test_zero_batch_size_clamped() {
        let publisher =
            BatchPublisher::new(MemorySink::default(), TicketGenerator::from_seed(7), settings(0));
        assert_eq!(publisher.settings().batch_size, 1);
    }

    #[test]
    fn test_metrics_rate() {
        let metrics = PublishMetrics {
            tickets_generated: 100,
            messages_published: 100,
            batch_count: 10,
            total_duration: Duration::from_secs(200),
        };
        assert_eq!(metrics.messages_per_second(), 0.5);
        assert_eq!(PublishMetrics::default().messages_per_second(), 0.0);
    }

    #[test]
    fn test_default_settings() {
        let settings = PublishSettings::default();
        assert_eq!(settings.topic, "caisse");
        assert_eq!(settings.batch_size, 10);
        assert_eq!(settings.interval, Duration::from_secs(2));
        assert_eq!(settings.max_tickets, None);
    }
}
