//! Order Models
//!
//! The gateway builds an [`OrderRequest`] from session identity + cart at
//! checkout time and sends it once to orders-service. The returned
//! [`OrderRecord`] is relayed to the browser without mutation; fields the
//! gateway does not know about are preserved via `#[serde(flatten)]`.

use serde::{Deserialize, Serialize};

/// One dish-and-quantity line of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub dish_id: i64,
    pub quantity: u32,
}

/// Order creation request accepted by orders-service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub user_id: i64,
    pub items: Vec<OrderItem>,
}

/// Order record returned by orders-service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: i64,
    pub status: String,
    /// Anything else orders-service includes (items, user_id, timestamps...)
    /// is passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
