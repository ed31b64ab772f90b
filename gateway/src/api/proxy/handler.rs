//! 转发 handlers
//!
//! 每个 handler 只是确定目标服务和子路径，真正的转发逻辑在
//! [`crate::proxy::forward`]。

use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, Method},
    response::Response,
};

use crate::core::{GatewayResult, ServerState};
use crate::proxy::forward;

/// GET/POST/PUT/DELETE /api/auth/{*path} - 转发到 auth-service
pub async fn auth_proxy(
    State(state): State<ServerState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> GatewayResult<Response> {
    let base = state.config.auth_url.clone();
    forward(
        &state,
        "auth",
        &base,
        &format!("/{path}"),
        method,
        &headers,
        query.as_deref(),
        body,
    )
    .await
}

/// GET/POST /api/dishes - 转发到 dishes-service 的 /dishes
pub async fn dishes_root(
    State(state): State<ServerState>,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> GatewayResult<Response> {
    let base = state.config.dishes_url.clone();
    forward(
        &state,
        "dishes",
        &base,
        "/dishes",
        method,
        &headers,
        query.as_deref(),
        body,
    )
    .await
}

/// GET/POST/PUT/DELETE /api/dishes/{*path} - 转发到 dishes-service
pub async fn dishes_proxy(
    State(state): State<ServerState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> GatewayResult<Response> {
    let base = state.config.dishes_url.clone();
    forward(
        &state,
        "dishes",
        &base,
        &format!("/{path}"),
        method,
        &headers,
        query.as_deref(),
        body,
    )
    .await
}

/// GET/POST /api/orders - 转发到 orders-service 的 /orders
pub async fn orders_root(
    State(state): State<ServerState>,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> GatewayResult<Response> {
    let base = state.config.orders_url.clone();
    forward(
        &state,
        "orders",
        &base,
        "/orders",
        method,
        &headers,
        query.as_deref(),
        body,
    )
    .await
}

/// GET/POST/PUT/DELETE /api/orders/{*path} - 转发到 orders-service
pub async fn orders_proxy(
    State(state): State<ServerState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> GatewayResult<Response> {
    let base = state.config.orders_url.clone();
    forward(
        &state,
        "orders",
        &base,
        &format!("/{path}"),
        method,
        &headers,
        query.as_deref(),
        body,
    )
    .await
}
