//! Main ticket generator.

use crate::catalog::{ProductCatalog, TicketProfile};
use crate::ticket::{Draw, Ticket};
use chrono::{Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator that produces random tickets from a catalog.
///
/// The random source is owned by the generator, so two generators built with
/// the same seed, catalog and profile produce the same tickets.
pub struct TicketGenerator<R = StdRng> {
    /// Products to sample from
    catalog: ProductCatalog,
    /// Sampling ranges
    profile: TicketProfile,
    /// Random source
    rng: R,
    /// Number of tickets generated so far
    generated: u64,
}

impl TicketGenerator<StdRng> {
    /// Generator over the default catalog with a seeded RNG.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(
            ProductCatalog::default(),
            TicketProfile::default(),
            StdRng::seed_from_u64(seed),
        )
    }

    /// Generator over the default catalog seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(
            ProductCatalog::default(),
            TicketProfile::default(),
            StdRng::from_entropy(),
        )
    }
}

impl<R: Rng> TicketGenerator<R> {
    pub fn new(catalog: ProductCatalog, profile: TicketProfile, rng: R) -> Self {
        Self {
            catalog,
            profile,
            rng,
            generated: 0,
        }
    }

    /// Sample a single purchase.
    pub fn next_draw(&mut self) -> Draw {
        let index = self.rng.gen_range(0..self.catalog.len());
        let product = self
            .catalog
            .get(index)
            .unwrap_or_default()
            .to_string();

        let price_range = self.profile.price();
        let price = self
            .rng
            .gen_range(f64::from(*price_range.start())..=f64::from(*price_range.end()))
            .round() as u32;

        let quantity = self.rng.gen_range(self.profile.quantity());

        Draw {
            product,
            price,
            quantity,
        }
    }

    /// Generate a ticket stamped with `timestamp`.
    pub fn generate_at(&mut self, timestamp: NaiveDateTime) -> Ticket {
        let count = self.rng.gen_range(self.profile.item_count());
        let draws: Vec<Draw> = (0..count).map(|_| self.next_draw()).collect();

        let stores = self.profile.stores();
        let store_id = stores[self.rng.gen_range(0..stores.len())];

        self.generated += 1;

        Ticket::from_draws(draws, store_id, timestamp)
    }

    /// Generate a ticket stamped with the current local time.
    pub fn generate_ticket(&mut self) -> Ticket {
        self.generate_at(Local::now().naive_local())
    }

    pub fn generated(&self) -> u64 {
        self.generated
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn profile(&self) -> &TicketProfile {
        &self.profile
    }
}
