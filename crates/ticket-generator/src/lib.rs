//! Synthetic ticket generator for the point-of-sale producer.
//!
//! This crate provides the `TicketGenerator` which produces random retail
//! receipts ("tickets") drawn from a fixed product catalog. The generator owns
//! its random source, so a seeded generator always yields the same stream.
//!
//! # Architecture
//!
//! ```text
//! ProductCatalog + TicketProfile
//!        │
//!        ▼
//! ┌──────────────────┐
//! │ TicketGenerator  │
//! │                  │
//! │  - rng (StdRng)  │
//! │  - draws         │
//! └────────┬─────────┘
//!          │  Ticket::from_draws (merge by product name)
//!          ▼
//!    Ticket { timestamp, line_items, total, store_id }
//!          │
//!          ▼
//!    TicketRecord (JSON wire shape)
//! ```
//!
//! # Example
//!
//! ```rust
//! use ticket_generator::TicketGenerator;
//!
//! let mut generator = TicketGenerator::from_seed(42);
//! let ticket = generator.generate_ticket();
//! let json = ticket.to_record().to_json().unwrap();
//! println!("{json}");
//! ```

pub mod catalog;
pub mod generator;
pub mod ticket;

// Re-exports for convenience
pub use catalog::{GeneratorError, ProductCatalog, TicketProfile, DEFAULT_PRODUCTS};
pub use generator::TicketGenerator;
pub use ticket::{
    round_cents, ArticleRecord, Draw, LineItem, Ticket, TicketRecord, TIMESTAMP_FORMAT,
};
