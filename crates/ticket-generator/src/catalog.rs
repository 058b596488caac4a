//! Product catalog and sampling ranges.

use std::ops::RangeInclusive;

/// Products sold by the simulated stores.
pub const DEFAULT_PRODUCTS: [&str; 10] = [
    "Pommes",
    "Poires",
    "Clémentines",
    "Oranges",
    "Jus de pomme",
    "Jus de cassis",
    "Sac de patate",
    "Poireau",
    "Carrottes",
    "Miel",
];

/// Error type for generator configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GeneratorError {
    /// A catalog needs at least one product to sample from
    #[error("Product catalog is empty")]
    EmptyCatalog,

    /// A sampling range with `min > max`
    #[error("Invalid {name} range: {min}..={max}")]
    InvalidRange { name: &'static str, min: u32, max: u32 },

    /// No store ids to pick from
    #[error("Store list is empty")]
    NoStores,
}

/// Ordered, non-empty list of product names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCatalog {
    products: Vec<String>,
}

impl ProductCatalog {
    /// Build a catalog, rejecting an empty product list.
    pub fn new<I, S>(products: I) -> Result<Self, GeneratorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let products: Vec<String> = products.into_iter().map(Into::into).collect();
        if products.is_empty() {
            return Err(GeneratorError::EmptyCatalog);
        }
        Ok(Self { products })
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Product at `index`. Callers sample `index` from `0..len()`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.products.get(index).map(String::as_str)
    }

    pub fn products(&self) -> &[String] {
        &self.products
    }

    pub fn contains(&self, name: &str) -> bool {
        self.products.iter().any(|p| p == name)
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self {
            products: DEFAULT_PRODUCTS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Sampling ranges for ticket generation (all bounds inclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketProfile {
    item_count: RangeInclusive<u32>,
    price: RangeInclusive<u32>,
    quantity: RangeInclusive<u32>,
    stores: Vec<u32>,
}

impl TicketProfile {
    pub fn new(
        item_count: RangeInclusive<u32>,
        price: RangeInclusive<u32>,
        quantity: RangeInclusive<u32>,
        stores: Vec<u32>,
    ) -> Result<Self, GeneratorError> {
        check_range("item count", &item_count)?;
        check_range("price", &price)?;
        check_range("quantity", &quantity)?;
        if *item_count.start() == 0 {
            return Err(GeneratorError::InvalidRange {
                name: "item count",
                min: 0,
                max: *item_count.end(),
            });
        }
        if stores.is_empty() {
            return Err(GeneratorError::NoStores);
        }
        Ok(Self {
            item_count,
            price,
            quantity,
            stores,
        })
    }

    pub fn item_count(&self) -> RangeInclusive<u32> {
        self.item_count.clone()
    }

    pub fn price(&self) -> RangeInclusive<u32> {
        self.price.clone()
    }

    pub fn quantity(&self) -> RangeInclusive<u32> {
        self.quantity.clone()
    }

    pub fn stores(&self) -> &[u32] {
        &self.stores
    }
}

impl Default for TicketProfile {
    fn default() -> Self {
        Self {
            item_count: 1..=10,
            price: 5..=40,
            quantity: 1..=5,
            stores: vec![1, 2, 3],
        }
    }
}

fn check_range(name: &'static str, range: &RangeInclusive<u32>) -> Result<(), GeneratorError> {
    if range.start() > range.end() {
        return Err(GeneratorError::InvalidRange {
            name,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = ProductCatalog::default();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.get(0), Some("Pommes"));
        assert_eq!(catalog.get(9), Some("Miel"));
        assert!(catalog.contains("Clémentines"));
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = ProductCatalog::new(Vec::<String>::new());
        assert_eq!(result, Err(GeneratorError::EmptyCatalog));
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = ProductCatalog::new(["Apples", "Pears"]).unwrap();
        assert_eq!(catalog.products(), &["Apples".to_string(), "Pears".to_string()]);
        assert_eq!(catalog.get(2), None);
    }

    #[test]
    fn test_profile_validation() {
        assert!(TicketProfile::new(1..=10, 5..=40, 1..=5, vec![1, 2, 3]).is_ok());

        #[allow(clippy::reversed_empty_ranges)]
        let inverted = TicketProfile::new(1..=10, 40..=5, 1..=5, vec![1]);
        assert!(matches!(
            inverted,
            Err(GeneratorError::InvalidRange { name: "price", .. })
        ));

        let zero_items = TicketProfile::new(0..=3, 5..=40, 1..=5, vec![1]);
        assert!(matches!(
            zero_items,
            Err(GeneratorError::InvalidRange {
                name: "item count",
                ..
            })
        ));

        let no_stores = TicketProfile::new(1..=10, 5..=40, 1..=5, vec![]);
        assert_eq!(no_stores, Err(GeneratorError::NoStores));
    }

    #[test]
    fn test_default_profile() {
        let profile = TicketProfile::default();
        assert_eq!(profile.item_count(), 1..=10);
        assert_eq!(profile.price(), 5..=40);
        assert_eq!(profile.quantity(), 1..=5);
        assert_eq!(profile.stores(), &[1, 2, 3]);
    }
}
