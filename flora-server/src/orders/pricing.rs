//! Cart pricing against a locked stock snapshot
//!
//! All money math uses `rust_decimal`; the unit price read under the row lock
//! is both the basis of the total and the stored `price_at_purchase`.

use rust_decimal::Decimal;
use shared::models::MAX_ORDER_TOTAL;
use std::collections::HashMap;

use super::{IntakeError, OrderLine};

/// Product state as read inside the placing transaction
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StockSnapshot {
    pub id: i64,
    pub title: String,
    pub price: Decimal,
    pub stock: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Lines in cart order plus their sum
#[derive(Debug, Clone, PartialEq)]
pub struct PricedCart {
    pub lines: Vec<PricedLine>,
    pub total: Decimal,
}

/// Check every line against `snapshot` and price it.
///
/// Lines are checked in cart order; the first missing product or short
/// stock rejects the whole cart. A total above [`MAX_ORDER_TOTAL`] is
/// rejected rather than overflowing.
pub fn price_cart(
    lines: &[OrderLine],
    snapshot: &HashMap<i64, StockSnapshot>,
) -> Result<PricedCart, IntakeError> {
    let mut priced = Vec::with_capacity(lines.len());
    let mut total = Decimal::ZERO;

    for line in lines {
        let product = snapshot
            .get(&line.product_id)
            .ok_or(IntakeError::ProductNotFound {
                product_id: line.product_id,
            })?;

        if line.quantity > product.stock {
            return Err(IntakeError::InsufficientStock {
                product_id: product.id,
                title: product.title.clone(),
                requested: line.quantity,
                available: product.stock,
            });
        }

        total = product
            .price
            .checked_mul(Decimal::from(line.quantity))
            .and_then(|line_total| total.checked_add(line_total))
            .filter(|sum| *sum <= MAX_ORDER_TOTAL)
            .ok_or(IntakeError::TotalTooLarge {
                max: MAX_ORDER_TOTAL,
            })?;
        priced.push(PricedLine {
            product_id: product.id,
            quantity: line.quantity,
            unit_price: product.price,
        });
    }

    Ok(PricedCart {
        lines: priced,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(products: &[(i64, &str, Decimal, i32)]) -> HashMap<i64, StockSnapshot> {
        products
            .iter()
            .map(|(id, title, price, stock)| {
                (
                    *id,
                    StockSnapshot {
                        id: *id,
                        title: title.to_string(),
                        price: *price,
                        stock: *stock,
                    },
                )
            })
            .collect()
    }

    fn line(product_id: i64, quantity: i32) -> OrderLine {
        OrderLine {
            product_id,
            quantity,
        }
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        let stock = snapshot(&[
            (5, "Red Roses", Decimal::new(10000, 2), 10),
            (7, "Tulips", Decimal::new(1999, 2), 50),
        ]);
        let cart = price_cart(&[line(5, 2), line(7, 3)], &stock).unwrap();

        assert_eq!(cart.total, Decimal::new(25997, 2));
        let summed: Decimal = cart
            .lines
            .iter()
            .map(|l| l.unit_price * Decimal::from(l.quantity))
            .sum();
        assert_eq!(summed, cart.total);
        assert_eq!(cart.lines[0].unit_price, Decimal::new(10000, 2));
    }

    #[test]
    fn test_exact_stock_is_enough() {
        let stock = snapshot(&[(5, "Red Roses", Decimal::ONE, 2)]);
        assert!(price_cart(&[line(5, 2)], &stock).is_ok());
    }

    #[test]
    fn test_insufficient_stock_names_product() {
        let stock = snapshot(&[(5, "Red Roses", Decimal::ONE, 1)]);
        let err = price_cart(&[line(5, 2)], &stock).unwrap_err();
        match err {
            IntakeError::InsufficientStock {
                title,
                requested,
                available,
                ..
            } => {
                assert_eq!(title, "Red Roses");
                assert_eq!(requested, 2);
                assert_eq!(available, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_total_above_limit_is_rejected() {
        let stock = snapshot(&[(5, "Gold Orchid", MAX_ORDER_TOTAL, 10_000)]);
        assert!(price_cart(&[line(5, 1)], &stock).is_ok());
        assert!(matches!(
            price_cart(&[line(5, 9_999)], &stock),
            Err(IntakeError::TotalTooLarge { .. })
        ));
        // two lines that fit alone but not together
        let half = MAX_ORDER_TOTAL / Decimal::TWO + Decimal::ONE;
        let stock = snapshot(&[(5, "Red Roses", half, 1), (7, "Tulips", half, 1)]);
        assert!(matches!(
            price_cart(&[line(5, 1), line(7, 1)], &stock),
            Err(IntakeError::TotalTooLarge { .. })
        ));
    }

    #[test]
    fn test_overflowing_price_does_not_panic() {
        let stock = snapshot(&[(5, "Red Roses", Decimal::MAX, 10)]);
        assert!(matches!(
            price_cart(&[line(5, 9)], &stock),
            Err(IntakeError::TotalTooLarge { .. })
        ));
    }

    #[test]
    fn test_missing_product() {
        let stock = snapshot(&[(5, "Red Roses", Decimal::ONE, 10)]);
        let err = price_cart(&[line(5, 1), line(999, 1)], &stock).unwrap_err();
        assert!(matches!(
            err,
            IntakeError::ProductNotFound { product_id: 999 }
        ));
    }
}
