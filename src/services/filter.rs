use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{
    error::{AppError, AppResult},
    models::{Catalog, Colour, Feature, Product, ProductId},
};

/// Shopper-selected predicates over the catalog
///
/// Every field is optional; an empty filter matches the whole catalog.
/// Required features and bounds are combined with AND, colours with OR.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFilter {
    pub features: BTreeSet<Feature>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub min_battery_life: Option<u32>,
    pub colours: BTreeSet<Colour>,
}

impl ProductFilter {
    pub fn validate(&self) -> AppResult<()> {
        for (name, value) in [
            ("min_price", self.min_price),
            ("max_price", self.max_price),
            ("min_rating", self.min_rating),
        ] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(AppError::Validation(format!("{} must be a finite number", name)));
                }
            }
        }

        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(AppError::Validation(format!(
                    "min_price {} is greater than max_price {}",
                    min, max
                )));
            }
        }
        Ok(())
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.features.iter().all(|f| product.features.has(*f))
            && self.min_price.map_or(true, |min| product.price >= min)
            && self.max_price.map_or(true, |max| product.price <= max)
            && self.min_rating.map_or(true, |min| product.rating >= min)
            && self
                .min_battery_life
                .map_or(true, |min| product.battery_life >= min)
            && (self.colours.is_empty() || self.colours.contains(&product.colour))
    }

    /// Ids of matching products, in catalog order
    pub fn apply(&self, catalog: &Catalog) -> AppResult<Vec<ProductId>> {
        self.validate()?;
        Ok(catalog
            .products()
            .iter()
            .filter(|p| self.matches(p))
            .map(|p| p.product_id.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeatureFlags;

    fn headphone(
        id: &str,
        rating: f64,
        price: f64,
        battery_life: u32,
        features: FeatureFlags,
        colour: Colour,
    ) -> Product {
        Product {
            product_id: ProductId::new(id),
            rating,
            price,
            battery_life,
            features,
            colour,
        }
    }

    fn catalog() -> Catalog {
        let wireless = FeatureFlags::default().with(Feature::Wireless);
        let wireless_nc = wireless.with(Feature::NoiseCancelling);
        Catalog::new(vec![
            headphone("A", 4.5, 199.0, 30, wireless_nc, Colour::Black),
            headphone("B", 4.1, 25.0, 0, FeatureFlags::default(), Colour::White),
            headphone("C", 3.6, 59.0, 20, wireless, Colour::Blue),
            headphone("D", 4.8, 89.0, 40, wireless_nc, Colour::White),
        ])
        .unwrap()
    }

    fn apply(filter: &ProductFilter) -> Vec<String> {
        filter
            .apply(&catalog())
            .unwrap()
            .into_iter()
            .map(|id| id.to_string())
            .collect()
    }

    #[test]
    fn test_empty_filter_matches_all_in_order() {
        assert_eq!(apply(&ProductFilter::default()), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_required_features() {
        let filter = ProductFilter {
            features: [Feature::Wireless, Feature::NoiseCancelling].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(apply(&filter), vec!["A", "D"]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let filter = ProductFilter {
            min_price: Some(59.0),
            max_price: Some(199.0),
            min_rating: Some(4.5),
            min_battery_life: Some(30),
            ..Default::default()
        };
        assert_eq!(apply(&filter), vec!["A", "D"]);
    }

    #[test]
    fn test_colours_are_set_membership() {
        let filter = ProductFilter {
            colours: [Colour::White, Colour::Blue].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(apply(&filter), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_no_match_yields_empty_subset() {
        let filter = ProductFilter {
            features: [Feature::Gaming].into_iter().collect(),
            ..Default::default()
        };
        assert!(apply(&filter).is_empty());
    }

    #[test]
    fn test_rejects_inverted_price_range() {
        let filter = ProductFilter {
            min_price: Some(100.0),
            max_price: Some(10.0),
            ..Default::default()
        };
        assert!(matches!(filter.apply(&catalog()), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_deserializes_partial_json() {
        let filter: ProductFilter =
            serde_json::from_str(r#"{"features":["wireless"],"colours":["black"]}"#).unwrap();
        assert!(filter.features.contains(&Feature::Wireless));
        assert!(filter.colours.contains(&Colour::Black));
        assert_eq!(filter.min_price, None);
    }
}
