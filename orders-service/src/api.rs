//! HTTP API
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 健康检查 |
//! | /orders | POST | 创建订单：400 字段缺失 / 201 {id, status} |
//! | /orders?user_id= | GET | 订单列表，可按用户过滤 |

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use shared::OrderItem;

use crate::state::{AppState, StoredOrder};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/orders", get(list_orders).post(create_order))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "orders" }))
}

/// 创建订单请求体；字段用 Option 接住，缺失时 400 而不是 422
#[derive(Debug, Deserialize)]
struct CreateOrderRequest {
    user_id: Option<i64>,
    items: Option<Vec<OrderItem>>,
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let (Some(user_id), Some(items)) = (request.user_id, request.items) else {
        return Err(bad_request());
    };
    if items.is_empty() {
        return Err(bad_request());
    }

    let order = state.orders.create(user_id, items);
    tracing::info!(order_id = order.id, user_id, "Order created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": order.id, "status": order.status })),
    ))
}

fn bad_request() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "user_id and items required" })),
    )
}

#[derive(Debug, Deserialize)]
struct OrdersQuery {
    user_id: Option<String>,
}

async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OrdersQuery>,
) -> Json<Vec<StoredOrder>> {
    Json(state.orders.list(query.user_id.as_deref()))
}
