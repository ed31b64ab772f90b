//! 菜单聚合路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /menu?category= | GET | 分类 + 菜品一次取齐，目录不可用时降级为空列表 |
//!
//! 浏览要有弹性，checkout 才严格：目录服务宕机时菜单页显示空
//! 而不是报错。

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use shared::{Category, Dish};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/menu", get(menu))
}

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

/// 菜单视图
#[derive(Debug, Serialize)]
pub struct MenuView {
    pub categories: Vec<Category>,
    pub dishes: Vec<Dish>,
}

/// GET /menu - 聚合目录服务的分类和菜品
pub async fn menu(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> Json<MenuView> {
    let categories = match state.catalog.categories().await {
        Ok(categories) => categories,
        Err(err) => {
            tracing::warn!(error = %err, "Categories unavailable, degrading to empty list");
            Vec::new()
        }
    };

    let dishes = match state.catalog.dishes(query.category.as_deref()).await {
        Ok(dishes) => dishes,
        Err(err) => {
            tracing::warn!(error = %err, "Dishes unavailable, degrading to empty list");
            Vec::new()
        }
    };

    Json(MenuView { categories, dishes })
}
