//! Ticket data model and its JSON wire shape.

use chrono::{NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

/// Format of the `date` field in published records.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One sampled purchase before merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub product: String,
    pub price: u32,
    pub quantity: u32,
}

impl Draw {
    pub fn new(product: impl Into<String>, price: u32, quantity: u32) -> Self {
        Self {
            product: product.into(),
            price,
            quantity,
        }
    }
}

/// One distinct product on a ticket.
///
/// `unit_price_sum` accumulates the price of every draw of this product, so
/// for merged entries it is a sum of sampled prices rather than a unit price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub name: String,
    pub unit_price_sum: u32,
    pub quantity: u32,
}

impl LineItem {
    pub fn amount(&self) -> u64 {
        u64::from(self.unit_price_sum) * u64::from(self.quantity)
    }
}

/// A synthetic receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub timestamp: NaiveDateTime,
    pub line_items: Vec<LineItem>,
    pub total: f64,
    pub store_id: u32,
}

impl Ticket {
    /// Build a ticket from raw draws, merging draws of the same product.
    ///
    /// Merged entries keep the position where the product was first drawn.
    pub fn from_draws<I>(draws: I, store_id: u32, timestamp: NaiveDateTime) -> Self
    where
        I: IntoIterator<Item = Draw>,
    {
        let mut line_items: Vec<LineItem> = Vec::new();

        for draw in draws {
            match line_items.iter_mut().find(|item| item.name == draw.product) {
                Some(item) => {
                    item.unit_price_sum += draw.price;
                    item.quantity += draw.quantity;
                }
                None => line_items.push(LineItem {
                    name: draw.product,
                    unit_price_sum: draw.price,
                    quantity: draw.quantity,
                }),
            }
        }

        let total = round_cents(line_items.iter().map(LineItem::amount).sum::<u64>() as f64);

        Self {
            timestamp: timestamp.trunc_subsecs(0),
            line_items,
            total,
            store_id,
        }
    }

    pub fn date(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Convert to the published record shape.
    pub fn to_record(&self) -> TicketRecord {
        TicketRecord {
            date: self.date(),
            articles: self
                .line_items
                .iter()
                .map(|item| ArticleRecord {
                    product: item.name.clone(),
                    price: item.unit_price_sum,
                    quantity: item.quantity,
                })
                .collect(),
            total: self.total,
            magasin_id: self.store_id,
        }
    }
}

/// Round to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Published JSON record for one ticket.
///
/// `total` is a float rounded to two decimals, so a whole amount is written
/// as `100.0` rather than the bare integer `100` the Python producer emitted.
/// Consumers that read it as a JSON number see the same value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub date: String,
    pub articles: Vec<ArticleRecord>,
    pub total: f64,
    pub magasin_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(rename = "Product")]
    pub product: String,
    pub price: u32,
    pub quantity: u32,
}

impl TicketRecord {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
