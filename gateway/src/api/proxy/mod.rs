//! 透明转发路由
//!
//! | 路径 | 方法 | 目标 |
//! |------|------|------|
//! | /api/auth/{*path} | GET/POST/PUT/DELETE | auth-service /{path} |
//! | /api/dishes | GET/POST | dishes-service /dishes |
//! | /api/dishes/{*path} | GET/POST/PUT/DELETE | dishes-service /{path} |
//! | /api/orders | GET/POST | orders-service /orders |
//! | /api/orders/{*path} | GET/POST/PUT/DELETE | orders-service /{path} |

mod handler;

use axum::{Router, routing::any};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/{*path}", any(handler::auth_proxy))
        .route("/api/dishes", any(handler::dishes_root))
        .route("/api/dishes/{*path}", any(handler::dishes_proxy))
        .route("/api/orders", any(handler::orders_root))
        .route("/api/orders/{*path}", any(handler::orders_proxy))
}
