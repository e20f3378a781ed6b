//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Largest stock figure an operator may set on a product
pub const MAX_STOCK: i32 = 1_000_000;

/// Largest unit price an operator may set: 9_999_999_999.99, the top of a
/// `NUMERIC(12, 2)` column
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Product entity
///
/// `price` and `stock` are never negative; the database enforces both with
/// CHECK constraints and the store validates before writing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
    /// Category reference (a product belongs to at most one category)
    pub category_id: Option<i64>,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub stock: i32,
    pub category_id: Option<i64>,
}

/// Update product payload
///
/// Absent fields are left untouched. `category_id` distinguishes an absent
/// field (`None`) from an explicit `null` (`Some(None)`), which moves the
/// product out of its category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    #[serde(
        default,
        deserialize_with = "present_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub category_id: Option<Option<i64>>,
}

/// Any value that reaches the deserializer was present in the body
fn present_field<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ProductUpdate {
    /// Apply this update to a product in place
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(title) = &self.title {
            product.title = title.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(category_id) = self.category_id {
            product.category_id = category_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roses() -> Product {
        Product {
            id: 5,
            title: "Red Roses".into(),
            description: "Eleven stems".into(),
            price: Decimal::new(10000, 2),
            stock: 10,
            category_id: Some(1),
        }
    }

    #[test]
    fn test_price_serializes_as_number() {
        let json = serde_json::to_value(roses()).unwrap();
        assert_eq!(json["price"], 100.0);
        assert_eq!(json["stock"], 10);
        assert_eq!(json["category_id"], 1);
    }

    #[test]
    fn test_update_only_touches_present_fields() {
        let mut product = roses();
        let update = ProductUpdate {
            price: Some(Decimal::new(12050, 2)),
            stock: Some(3),
            ..Default::default()
        };
        update.apply_to(&mut product);
        assert_eq!(product.price, Decimal::new(12050, 2));
        assert_eq!(product.stock, 3);
        assert_eq!(product.title, "Red Roses");
        assert_eq!(product.category_id, Some(1));
    }

    #[test]
    fn test_update_deserializes_partial_body() {
        let update: ProductUpdate = serde_json::from_str(r#"{"price": 45.5}"#).unwrap();
        assert_eq!(update.price, Some(Decimal::new(455, 1)));
        assert!(update.title.is_none());
        assert!(update.stock.is_none());
        assert!(update.category_id.is_none());
    }

    #[test]
    fn test_update_null_category_clears_it() {
        let update: ProductUpdate = serde_json::from_str(r#"{"category_id": null}"#).unwrap();
        assert_eq!(update.category_id, Some(None));

        let mut product = roses();
        update.apply_to(&mut product);
        assert_eq!(product.category_id, None);

        let update: ProductUpdate = serde_json::from_str(r#"{"category_id": 3}"#).unwrap();
        update.apply_to(&mut product);
        assert_eq!(product.category_id, Some(3));
    }

    #[test]
    fn test_max_price_matches_column_limit() {
        assert_eq!(MAX_PRICE.to_string(), "9999999999.99");
    }
}
