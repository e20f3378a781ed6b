//! Catalog write validation, applied by every store backend

use rust_decimal::Decimal;
use shared::models::{CategoryCreate, MAX_PRICE, MAX_STOCK, ProductCreate, ProductUpdate};

use super::{StoreError, StoreResult};

fn check_title(title: &str) -> StoreResult<()> {
    if title.trim().is_empty() {
        return Err(StoreError::EmptyTitle);
    }
    Ok(())
}

fn check_price(price: Decimal) -> StoreResult<()> {
    if price < Decimal::ZERO || price > MAX_PRICE {
        return Err(StoreError::InvalidPrice(price));
    }
    Ok(())
}

fn check_stock(stock: i32) -> StoreResult<()> {
    if !(0..=MAX_STOCK).contains(&stock) {
        return Err(StoreError::InvalidStock {
            value: stock,
            max: MAX_STOCK,
        });
    }
    Ok(())
}

pub fn validate_product_create(data: &ProductCreate) -> StoreResult<()> {
    check_title(&data.title)?;
    check_price(data.price)?;
    check_stock(data.stock)
}

pub fn validate_product_update(data: &ProductUpdate) -> StoreResult<()> {
    if let Some(title) = &data.title {
        check_title(title)?;
    }
    if let Some(price) = data.price {
        check_price(price)?;
    }
    if let Some(stock) = data.stock {
        check_stock(stock)?;
    }
    Ok(())
}

pub fn validate_category_create(data: &CategoryCreate) -> StoreResult<()> {
    check_title(&data.title)
}
