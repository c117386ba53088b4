//! In-memory product catalog.

use shared_types::Product;
use std::collections::BTreeMap;

/// Name of the placeholder product returned for unknown ids.
pub const SAMPLE_PRODUCT_NAME: &str = "Sample Product";
/// Price of the placeholder product.
pub const SAMPLE_PRODUCT_PRICE: f64 = 9.99;

/// Read-only product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: BTreeMap<i32, Product>,
    sample_fallback: bool,
    echo_lookups: bool,
}

impl Catalog {
    pub fn new(products: impl IntoIterator<Item = Product>, sample_fallback: bool) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            sample_fallback,
            echo_lookups: false,
        }
    }

    /// Answer every lookup with the sample product, leaving stored products
    /// to `list` only.
    pub fn with_echo_lookups(mut self, echo_lookups: bool) -> Self {
        self.echo_lookups = echo_lookups;
        self
    }

    /// Catalog with products 1 to 3.
    pub fn seeded(sample_fallback: bool) -> Self {
        let seed = [(1, 19.99), (2, 29.99), (3, 39.99)].map(|(id, price)| Product {
            id,
            name: format!("Product {}", id),
            price,
        });
        Self::new(seed, sample_fallback)
    }

    /// Look up a product.
    ///
    /// With sample fallback enabled every id resolves; unknown ids get the
    /// sample product carrying the requested id. Echo mode skips the stored
    /// products entirely.
    pub fn get(&self, id: i32) -> Option<Product> {
        if self.echo_lookups {
            return Some(sample_product(id));
        }
        match self.products.get(&id) {
            Some(product) => Some(product.clone()),
            None if self.sample_fallback => Some(sample_product(id)),
            None => None,
        }
    }

    /// All stored products, ordered by id.
    pub fn list(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn sample_product(id: i32) -> Product {
    Product {
        id,
        name: SAMPLE_PRODUCT_NAME.to_string(),
        price: SAMPLE_PRODUCT_PRICE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_lookup() {
        let catalog = Catalog::seeded(false);
        assert_eq!(catalog.len(), 3);

        let product = catalog.get(2).unwrap();
        assert_eq!(product.name, "Product 2");
        assert_eq!(product.price, 29.99);
        assert!(catalog.get(4).is_none());
    }

    #[test]
    fn test_sample_fallback_echoes_id() {
        let catalog = Catalog::seeded(true);
        let product = catalog.get(-12).unwrap();
        assert_eq!(product.id, -12);
        assert_eq!(product.name, SAMPLE_PRODUCT_NAME);
        assert_eq!(product.price, SAMPLE_PRODUCT_PRICE);

        // Stored products still win over the fallback.
        assert_eq!(catalog.get(1).unwrap().name, "Product 1");
    }

    #[test]
    fn test_echo_lookups_ignore_stored_products() {
        let catalog = Catalog::seeded(false).with_echo_lookups(true);

        let product = catalog.get(2).unwrap();
        assert_eq!(product.id, 2);
        assert_eq!(product.name, SAMPLE_PRODUCT_NAME);
        assert_eq!(product.price, SAMPLE_PRODUCT_PRICE);
        assert_eq!(catalog.get(77).unwrap().id, 77);

        // Listing still returns the seeded products.
        assert_eq!(catalog.list()[1].name, "Product 2");
    }

    #[test]
    fn test_list_is_ordered() {
        let ids: Vec<i32> = Catalog::seeded(true).list().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
