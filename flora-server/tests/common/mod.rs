//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use flora_server::AppState;
use flora_server::db::{MemoryShopStore, ShopStore};
use flora_server::notify::{NotificationChannel, Notifier, NotifyError, OrderNotice};
use flora_server::orders::OrderIntake;
use rust_decimal::Decimal;
use shared::models::{Category, Product};
use shared::request::{CartLine, PlaceOrderRequest};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

pub const OPERATORS: [&str; 3] = ["111", "222", "333"];

/// Records every delivery; fails for the configured recipients
#[derive(Default)]
pub struct RecordingChannel {
    failing: HashSet<String>,
    delivered: Mutex<Vec<(String, i64)>>,
}

impl RecordingChannel {
    pub fn failing_for(recipients: &[&str]) -> Self {
        Self {
            failing: recipients.iter().map(|r| r.to_string()).collect(),
            delivered: Mutex::new(Vec::new()),
        }
    }

    pub fn delivered(&self) -> Vec<(String, i64)> {
        let mut delivered = self.delivered.lock().unwrap().clone();
        delivered.sort();
        delivered
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn deliver(&self, recipient: &str, notice: &OrderNotice) -> Result<(), NotifyError> {
        if self.failing.contains(recipient) {
            return Err(NotifyError::Rejected(format!("cannot reach {recipient}")));
        }
        self.delivered
            .lock()
            .unwrap()
            .push((recipient.to_string(), notice.order_id));
        Ok(())
    }
}

pub fn price(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn product(id: i64, title: &str, unit_price: &str, stock: i32) -> Product {
    Product {
        id,
        title: title.to_string(),
        description: String::new(),
        price: price(unit_price),
        stock,
        category_id: None,
    }
}

/// Store with a small catalog:
/// - 1 "Roses" category
/// - 5 "Red Roses" 100.00 x10 (in Roses)
/// - 6 "Tulips" 19.99 x50
/// - 7 "Orchid" 250.00 x1
pub async fn seeded_store() -> Arc<MemoryShopStore> {
    let store = Arc::new(MemoryShopStore::new());
    store
        .seed_category(Category {
            id: 1,
            title: "Roses".into(),
        })
        .await;
    let mut roses = product(5, "Red Roses", "100.00", 10);
    roses.category_id = Some(1);
    store.seed_product(roses).await;
    store.seed_product(product(6, "Tulips", "19.99", 50)).await;
    store.seed_product(product(7, "Orchid", "250.00", 1)).await;
    store
}

pub fn notifier(channel: Arc<RecordingChannel>) -> Notifier {
    Notifier::new(channel, OPERATORS.iter().map(|s| s.to_string()).collect())
}

pub fn intake(store: Arc<MemoryShopStore>, channel: Arc<RecordingChannel>) -> OrderIntake {
    OrderIntake::new(store as Arc<dyn ShopStore>, notifier(channel))
}

pub fn app_state(store: Arc<MemoryShopStore>, channel: Arc<RecordingChannel>) -> AppState {
    AppState::from_parts(store as Arc<dyn ShopStore>, notifier(channel))
}

pub fn request(cart: &[(i64, i64)]) -> PlaceOrderRequest {
    PlaceOrderRequest {
        name: "Anna".into(),
        phone: "+1 555 0100".into(),
        details: "Main st. 1, ring twice".into(),
        comment: None,
        cart: cart.iter().map(|&(id, qty)| CartLine { id, qty }).collect(),
    }
}
