//! In-memory store
//!
//! All tables sit behind one async mutex, so every operation (order
//! placement included) is serialized. Used by tests and by development runs
//! without `DATABASE_URL`.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;

use shared::models::{
    Category, CategoryCreate, Order, OrderDetail, OrderItem, OrderItemView, OrderStatus, Product,
    ProductCreate, ProductUpdate, SalesFigure,
};

use super::validation::{validate_category_create, validate_product_create, validate_product_update};
use super::{Entity, ShopStore, StoreError, StoreResult};
use crate::orders::{IntakeError, PlacedOrder, StockSnapshot, ValidatedOrder, price_cart};

#[derive(Default)]
struct Tables {
    products: BTreeMap<i64, Product>,
    categories: BTreeMap<i64, Category>,
    orders: BTreeMap<i64, Order>,
    items: Vec<OrderItem>,
    next_product_id: i64,
    next_category_id: i64,
    next_order_id: i64,
}

impl Tables {
    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }

    fn order_detail(&self, order: &Order) -> OrderDetail {
        let items = self
            .items
            .iter()
            .filter(|item| item.order_id == order.id)
            .map(|item| OrderItemView {
                product_id: item.product_id,
                title: self.products.get(&item.product_id).map(|p| p.title.clone()),
                quantity: item.quantity,
                price_at_purchase: item.price_at_purchase,
            })
            .collect();
        OrderDetail {
            order: order.clone(),
            items,
        }
    }
}

#[derive(Default)]
pub struct MemoryShopStore {
    tables: Mutex<Tables>,
}

impl MemoryShopStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product with a fixed id (fixtures and demo data)
    pub async fn seed_product(&self, product: Product) {
        let mut tables = self.tables.lock().await;
        tables.next_product_id = tables.next_product_id.max(product.id);
        tables.products.insert(product.id, product);
    }

    /// Insert a category with a fixed id
    pub async fn seed_category(&self, category: Category) {
        let mut tables = self.tables.lock().await;
        tables.next_category_id = tables.next_category_id.max(category.id);
        tables.categories.insert(category.id, category);
    }

    /// Raw order items, for invariant checks
    pub async fn order_items(&self, order_id: i64) -> Vec<OrderItem> {
        let tables = self.tables.lock().await;
        tables
            .items
            .iter()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect()
    }

    pub async fn order_count(&self) -> usize {
        self.tables.lock().await.orders.len()
    }
}

#[async_trait]
impl ShopStore for MemoryShopStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        Ok(self.tables.lock().await.products.values().cloned().collect())
    }

    async fn get_product(&self, id: i64) -> StoreResult<Product> {
        self.tables
            .lock()
            .await
            .products
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(Entity::Product, id))
    }

    async fn create_product(&self, data: &ProductCreate) -> StoreResult<Product> {
        validate_product_create(data)?;
        let mut tables = self.tables.lock().await;
        if let Some(category_id) = data.category_id
            && !tables.categories.contains_key(&category_id)
        {
            return Err(StoreError::NotFound(Entity::Category, category_id));
        }
        let id = Tables::next_id(&mut tables.next_product_id);
        let product = Product {
            id,
            title: data.title.trim().to_string(),
            description: data.description.clone(),
            price: data.price,
            stock: data.stock,
            category_id: data.category_id,
        };
        tables.products.insert(id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: i64, data: &ProductUpdate) -> StoreResult<Product> {
        validate_product_update(data)?;
        let mut tables = self.tables.lock().await;
        if let Some(Some(category_id)) = data.category_id
            && !tables.categories.contains_key(&category_id)
        {
            return Err(StoreError::NotFound(Entity::Category, category_id));
        }
        let product = tables
            .products
            .get_mut(&id)
            .ok_or(StoreError::NotFound(Entity::Product, id))?;
        data.apply_to(product);
        product.title = product.title.trim().to_string();
        Ok(product.clone())
    }

    async fn delete_product(&self, id: i64) -> StoreResult<()> {
        self.tables
            .lock()
            .await
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(Entity::Product, id))
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.tables.lock().await.categories.values().cloned().collect())
    }

    async fn create_category(&self, data: &CategoryCreate) -> StoreResult<Category> {
        validate_category_create(data)?;
        let mut tables = self.tables.lock().await;
        let id = Tables::next_id(&mut tables.next_category_id);
        let category = Category {
            id,
            title: data.title.trim().to_string(),
        };
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn delete_category(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        if !tables.categories.contains_key(&id) {
            return Err(StoreError::NotFound(Entity::Category, id));
        }
        if tables
            .products
            .values()
            .any(|p| p.category_id == Some(id))
        {
            return Err(StoreError::CategoryInUse(id));
        }
        tables.categories.remove(&id);
        Ok(())
    }

    async fn place_order(&self, order: &ValidatedOrder) -> Result<PlacedOrder, IntakeError> {
        let mut tables = self.tables.lock().await;

        let snapshot: HashMap<i64, StockSnapshot> = order
            .lines
            .iter()
            .filter_map(|line| tables.products.get(&line.product_id))
            .map(|p| {
                (
                    p.id,
                    StockSnapshot {
                        id: p.id,
                        title: p.title.clone(),
                        price: p.price,
                        stock: p.stock,
                    },
                )
            })
            .collect();

        // Nothing below can fail, so the lock gives all-or-nothing.
        let priced = price_cart(&order.lines, &snapshot)?;

        let order_id = Tables::next_id(&mut tables.next_order_id);
        let created_at = Utc::now();
        tables.orders.insert(
            order_id,
            Order {
                id: order_id,
                customer_name: order.customer_name.clone(),
                phone: order.phone.clone(),
                contact_details: order.contact_details.clone(),
                comment: order.comment.clone(),
                total_price: priced.total,
                status: OrderStatus::New,
                created_at,
            },
        );

        let mut items = Vec::with_capacity(priced.lines.len());
        for line in &priced.lines {
            if let Some(product) = tables.products.get_mut(&line.product_id) {
                product.stock -= line.quantity;
            }
            items.push(OrderItem {
                order_id,
                product_id: line.product_id,
                quantity: line.quantity,
                price_at_purchase: line.unit_price,
            });
        }
        tables.items.extend(items.iter().cloned());

        Ok(PlacedOrder {
            order_id,
            customer_name: order.customer_name.clone(),
            total: priced.total,
            created_at,
            items,
        })
    }

    async fn list_orders(&self, status: OrderStatus, limit: Option<i64>) -> StoreResult<Vec<Order>> {
        let tables = self.tables.lock().await;
        let mut orders: Vec<Order> = tables
            .orders
            .values()
            .filter(|o| o.status == status)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        if let Some(limit) = limit {
            orders.truncate(usize::try_from(limit).unwrap_or(0));
        }
        Ok(orders)
    }

    async fn get_order(&self, id: i64) -> StoreResult<OrderDetail> {
        let tables = self.tables.lock().await;
        let order = tables
            .orders
            .get(&id)
            .ok_or(StoreError::NotFound(Entity::Order, id))?;
        Ok(tables.order_detail(order))
    }

    async fn complete_order(&self, id: i64) -> StoreResult<Order> {
        let mut tables = self.tables.lock().await;
        let order = tables
            .orders
            .get_mut(&id)
            .ok_or(StoreError::NotFound(Entity::Order, id))?;
        if !order.status.can_transition_to(OrderStatus::Completed) {
            return Err(StoreError::OrderAlreadyCompleted(id));
        }
        order.status = OrderStatus::Completed;
        Ok(order.clone())
    }

    async fn completed_sales(&self, day: Option<NaiveDate>) -> StoreResult<SalesFigure> {
        let tables = self.tables.lock().await;
        let (completed_orders, revenue) = tables
            .orders
            .values()
            .filter(|o| o.status == OrderStatus::Completed)
            .filter(|o| day.is_none_or(|d| o.created_at.date_naive() == d))
            .fold((0i64, Decimal::ZERO), |(count, sum), o| {
                (count + 1, sum + o.total_price)
            });
        Ok(SalesFigure {
            completed_orders,
            revenue,
        })
    }

    async fn count_orders(&self, status: OrderStatus) -> StoreResult<i64> {
        let tables = self.tables.lock().await;
        Ok(tables.orders.values().filter(|o| o.status == status).count() as i64)
    }

    async fn units_in_stock(&self) -> StoreResult<i64> {
        let tables = self.tables.lock().await;
        Ok(tables.products.values().map(|p| i64::from(p.stock)).sum())
    }
}
