use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use super::{Colour, Feature, Product, ProductId};
use crate::error::{AppError, AppResult};

/// Ordered, read-only product catalog
///
/// Row order is significant: row `i` is aligned with row `i` of the
/// similarity matrix. The id-to-row map is built once on construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> AppResult<Self> {
        if products.is_empty() {
            return Err(AppError::DataIntegrity("catalog is empty".to_string()));
        }

        let mut index = HashMap::with_capacity(products.len());
        for (row, product) in products.iter().enumerate() {
            if !product.rating.is_finite() || !(1.0..=5.0).contains(&product.rating) {
                return Err(AppError::DataIntegrity(format!(
                    "product {} has rating {} outside [1, 5]",
                    product.product_id, product.rating
                )));
            }
            if !product.price.is_finite() || product.price < 0.0 {
                return Err(AppError::DataIntegrity(format!(
                    "product {} has invalid price {}",
                    product.product_id, product.price
                )));
            }
            if let Some(previous) = index.insert(product.product_id.clone(), row) {
                return Err(AppError::DataIntegrity(format!(
                    "duplicate product id {} at rows {} and {}",
                    product.product_id, previous, row
                )));
            }
        }

        Ok(Self { products, index })
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn row(&self, row: usize) -> Option<&Product> {
        self.products.get(row)
    }

    pub fn index_of(&self, id: &ProductId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index_of(id).map(|row| &self.products[row])
    }

    /// Min-max scales every rating into [0, 1] over the whole catalog.
    ///
    /// When all ratings are equal the range is zero and every product scores 0.
    pub fn normalized_ratings(&self) -> Vec<f64> {
        let (min, max) = self.rating_range();
        let span = max - min;
        self.products
            .iter()
            .map(|p| if span > 0.0 { (p.rating - min) / span } else { 0.0 })
            .collect()
    }

    pub fn rating_range(&self) -> (f64, f64) {
        min_max(self.products.iter().map(|p| p.rating))
    }

    pub fn summary(&self) -> CatalogSummary {
        let (min_price, max_price) = min_max(self.products.iter().map(|p| p.price));
        let (min_rating, max_rating) = self.rating_range();
        let min_battery_life = self.products.iter().map(|p| p.battery_life).min().unwrap_or(0);
        let max_battery_life = self.products.iter().map(|p| p.battery_life).max().unwrap_or(0);

        // The sentinel is meaningless as a shopper choice
        let colours: BTreeSet<Colour> = self
            .products
            .iter()
            .map(|p| p.colour)
            .filter(|c| *c != Colour::NotSpecified)
            .collect();

        CatalogSummary {
            product_count: self.len(),
            min_price,
            max_price,
            min_rating,
            max_rating,
            min_battery_life,
            max_battery_life,
            features: Feature::ALL.to_vec(),
            colours: colours.into_iter().collect(),
        }
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Attribute bounds and choices available for filtering
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub product_count: usize,
    pub min_price: f64,
    pub max_price: f64,
    pub min_rating: f64,
    pub max_rating: f64,
    pub min_battery_life: u32,
    pub max_battery_life: u32,
    pub features: Vec<Feature>,
    pub colours: Vec<Colour>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::FeatureFlags;

    pub(crate) fn product(id: &str, rating: f64) -> Product {
        Product {
            product_id: ProductId::new(id),
            rating,
            price: 49.99,
            battery_life: 20,
            features: FeatureFlags::default(),
            colour: Colour::Black,
        }
    }

    #[test]
    fn test_index_lookup() {
        let catalog = Catalog::new(vec![product("A", 4.0), product("B", 3.5)]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.index_of(&ProductId::new("B")), Some(1));
        assert_eq!(catalog.index_of(&ProductId::new("Z")), None);
        assert_eq!(catalog.get(&ProductId::new("A")).unwrap().rating, 4.0);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::new(vec![product("A", 4.0), product("A", 3.0)]);
        assert!(matches!(result, Err(AppError::DataIntegrity(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn test_rejects_empty_catalog() {
        assert!(matches!(Catalog::new(vec![]), Err(AppError::DataIntegrity(_))));
    }

    #[test]
    fn test_rejects_rating_out_of_range() {
        let result = Catalog::new(vec![product("A", 5.5)]);
        assert!(matches!(result, Err(AppError::DataIntegrity(_))));
    }

    #[test]
    fn test_normalized_ratings_use_full_range() {
        let catalog =
            Catalog::new(vec![product("P1", 5.0), product("P2", 3.0), product("P3", 4.0)]).unwrap();
        assert_eq!(catalog.normalized_ratings(), vec![1.0, 0.0, 0.5]);
    }

    #[test]
    fn test_normalized_ratings_are_monotonic() {
        let ratings = [4.7, 1.0, 3.3, 4.9, 2.2, 3.3];
        let catalog = Catalog::new(
            ratings
                .iter()
                .enumerate()
                .map(|(i, r)| product(&format!("P{}", i), *r))
                .collect(),
        )
        .unwrap();
        let normalized = catalog.normalized_ratings();

        for i in 0..ratings.len() {
            for j in 0..ratings.len() {
                if ratings[i] > ratings[j] {
                    assert!(normalized[i] > normalized[j]);
                }
            }
        }
    }

    #[test]
    fn test_normalized_ratings_flat_catalog() {
        let catalog = Catalog::new(vec![product("A", 4.0), product("B", 4.0)]).unwrap();
        assert_eq!(catalog.normalized_ratings(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_summary_hides_unspecified_colour() {
        let mut unspecified = product("B", 3.0);
        unspecified.colour = Colour::NotSpecified;
        unspecified.price = 120.0;
        unspecified.battery_life = 0;

        let catalog = Catalog::new(vec![product("A", 4.5), unspecified]).unwrap();
        let summary = catalog.summary();

        assert_eq!(summary.product_count, 2);
        assert_eq!(summary.colours, vec![Colour::Black]);
        assert_eq!(summary.min_price, 49.99);
        assert_eq!(summary.max_price, 120.0);
        assert_eq!(summary.min_battery_life, 0);
        assert_eq!(summary.max_battery_life, 20);
        assert_eq!(summary.features.len(), 7);
    }
}
