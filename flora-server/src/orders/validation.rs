//! Request validation, before any store access

use shared::request::{CartLine, PlaceOrderRequest};

use super::IntakeError;

/// Maximum quantity of one product per order
pub const MAX_QUANTITY: i64 = 9999;

/// One product and its total requested quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: i64,
    pub quantity: i32,
}

/// A checkout request that passed all checks not needing the catalog
///
/// `lines` is non-empty and holds each product id once, in the order the
/// product first appeared in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOrder {
    pub customer_name: String,
    pub phone: String,
    pub contact_details: String,
    pub comment: Option<String>,
    pub lines: Vec<OrderLine>,
}

impl ValidatedOrder {
    /// Ids of all products in the order, ascending (row lock order)
    pub fn product_ids_sorted(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.lines.iter().map(|l| l.product_id).collect();
        ids.sort_unstable();
        ids
    }
}

fn validate_quantity(line: &CartLine) -> Result<i64, IntakeError> {
    if line.qty <= 0 || line.qty > MAX_QUANTITY {
        return Err(IntakeError::InvalidQuantity {
            product_id: line.id,
            quantity: line.qty,
        });
    }
    Ok(line.qty)
}

/// Merge repeated product ids, summing their quantities
fn merge_lines(cart: &[CartLine]) -> Result<Vec<OrderLine>, IntakeError> {
    let mut merged: Vec<(i64, i64)> = Vec::with_capacity(cart.len());
    for line in cart {
        let qty = validate_quantity(line)?;
        match merged.iter_mut().find(|(id, _)| *id == line.id) {
            Some((_, total)) => *total += qty,
            None => merged.push((line.id, qty)),
        }
    }

    merged
        .into_iter()
        .map(|(product_id, quantity)| {
            if quantity > MAX_QUANTITY {
                return Err(IntakeError::InvalidQuantity {
                    product_id,
                    quantity,
                });
            }
            Ok(OrderLine {
                product_id,
                quantity: quantity as i32,
            })
        })
        .collect()
}

fn required(value: &str, field: &'static str) -> Result<String, IntakeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::MissingCustomerField(field));
    }
    Ok(trimmed.to_string())
}

impl TryFrom<PlaceOrderRequest> for ValidatedOrder {
    type Error = IntakeError;

    fn try_from(req: PlaceOrderRequest) -> Result<Self, Self::Error> {
        if req.cart.is_empty() {
            return Err(IntakeError::EmptyCart);
        }
        let lines = merge_lines(&req.cart)?;

        Ok(Self {
            customer_name: required(&req.name, "name")?,
            phone: required(&req.phone, "phone")?,
            contact_details: req.details.trim().to_string(),
            comment: req
                .comment
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            lines,
        })
    }
}
