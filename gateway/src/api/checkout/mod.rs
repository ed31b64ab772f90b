//! Checkout 路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /checkout | POST | 购物车 → 订单；200 / 401 / 400 / 500 |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/checkout", post(handler::checkout))
}
