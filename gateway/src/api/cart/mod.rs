//! 购物车路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /cart | GET | 查看购物车 (行项对照目录校验并标记失效行) |
//! | /cart/items | POST | 加入菜品 (名称/价格此刻快照) |
//! | /cart/update | POST | 更新数量或删除行 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/cart", get(handler::view))
        .route("/cart/items", post(handler::add_item))
        .route("/cart/update", post(handler::update_item))
}
