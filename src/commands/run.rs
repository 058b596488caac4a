//! Run command handler: bootstrap the broker connection, then publish forever.

use anyhow::Context;
use ticket_publisher::{
    acquire_client, create_topic_if_not_exists, BatchPublisher, KafkaTicketSink, RunArgs,
};

/// Run the publish loop against Kafka.
pub async fn run_publish(args: RunArgs) -> anyhow::Result<()> {
    let RunArgs { broker, publish } = args;

    tracing::info!(
        "Starting ticket producer: broker={}, topic={}, batch_size={}, interval={}s, seed={:?}",
        broker.broker_address,
        publish.topic,
        publish.batch_size,
        publish.flush_interval_seconds,
        publish.seed
    );

    let producer = acquire_client(
        &broker.connector(),
        &broker.broker_address,
        broker.retry_policy(),
    )
    .await
    .context("Broker bootstrap failed")?;

    if publish.create_topic {
        create_topic_if_not_exists(
            &broker.broker_address,
            &publish.topic,
            publish.topic_partitions,
        )
        .await
        .with_context(|| format!("Failed to create topic '{}'", publish.topic))?;
    }

    let sink = KafkaTicketSink::new(producer, broker.message_timeout());
    let publisher = BatchPublisher::new(sink, publish.generator(), publish.settings());

    let metrics = publisher
        .run()
        .await
        .context("Ticket publishing stopped")?;

    tracing::info!(
        "Producer finished: {} messages published in {} batches",
        metrics.messages_published,
        metrics.batch_count
    );

    Ok(())
}
