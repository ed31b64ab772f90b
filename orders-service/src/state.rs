//! 订单存储 - 内存实现

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use shared::OrderItem;

pub struct AppState {
    pub orders: OrderStore,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            orders: OrderStore::new(),
        }
    }
}

/// 落库的订单记录；新订单状态固定为 "new"
#[derive(Debug, Clone, Serialize)]
pub struct StoredOrder {
    pub id: i64,
    pub user_id: i64,
    pub items: Vec<OrderItem>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub struct OrderStore {
    orders: RwLock<Vec<StoredOrder>>,
    next_id: AtomicI64,
}

impl OrderStore {
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn create(&self, user_id: i64, items: Vec<OrderItem>) -> StoredOrder {
        let order = StoredOrder {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id,
            items,
            status: "new".to_string(),
            created_at: Utc::now(),
        };
        self.orders.write().push(order.clone());
        order
    }

    /// 列出订单，可按 user_id 过滤；非数字的过滤值当作无过滤
    pub fn list(&self, user_id: Option<&str>) -> Vec<StoredOrder> {
        let filter: Option<i64> = user_id.and_then(|raw| raw.parse().ok());
        self.orders
            .read()
            .iter()
            .filter(|o| filter.is_none_or(|id| o.user_id == id))
            .cloned()
            .collect()
    }
}
