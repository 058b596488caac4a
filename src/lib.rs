//! POS Ticket Producer
//!
//! Simulates a point-of-sale data source: random receipts ("tickets") are
//! generated every few seconds and published to Kafka in batches, for
//! downstream stream-processing demonstrations.
//!
//! # Crates
//!
//! - `ticket_generator` - ticket data model, product catalog, seeded generator
//! - `ticket_publisher` - broker bootstrap with retries, batched Kafka publishing
//!
//! # CLI Usage
//!
//! ```bash
//! # Publish forever to broker:9092, topic "caisse", batches of 10 every 2s
//! pos-ticket-producer run
//!
//! # Local broker, reproducible stream, stop after 100 tickets
//! pos-ticket-producer run --broker-address localhost:9092 --seed 42 --max-tickets 100
//!
//! # Print five tickets as JSON lines without a broker
//! pos-ticket-producer generate --count 5
//! ```

pub mod commands;

pub use ticket_generator;
pub use ticket_publisher;
