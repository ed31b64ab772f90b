//! HTTP API
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 健康检查 |
//! | /categories | GET | 分类列表 |
//! | /dishes?category= | GET | 菜品列表，按分类 id 或名称过滤 |
//! | /dishes/{id} | GET | 单个菜品，404 不存在 |
//! | /dishes | POST | 创建菜品：400 字段缺失 / 201 |

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use shared::{Category, CategoryRef, Dish};

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/categories", get(list_categories))
        .route("/dishes", get(list_dishes).post(create_dish))
        .route("/dishes/{id}", get(get_dish))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "dishes" }))
}

async fn list_categories(State(state): State<Arc<AppState>>) -> Json<Vec<Category>> {
    Json(state.catalog.list_categories())
}

#[derive(Debug, Deserialize)]
struct DishesQuery {
    category: Option<String>,
}

async fn list_dishes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DishesQuery>,
) -> Json<Vec<Dish>> {
    Json(state.catalog.list_dishes(query.category.as_deref()))
}

async fn get_dish(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Dish>, (StatusCode, Json<Value>)> {
    state.catalog.get_dish(id).map(Json).ok_or((
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("dish {id} not found") })),
    ))
}

/// 创建菜品请求体；字段用 Option 接住，缺失时 400 而不是 422
#[derive(Debug, Deserialize)]
struct CreateDishRequest {
    name: Option<String>,
    price: Option<Decimal>,
    category: Option<CategoryRef>,
}

async fn create_dish(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateDishRequest>,
) -> Result<(StatusCode, Json<Dish>), (StatusCode, Json<Value>)> {
    let (Some(name), Some(price)) = (request.name, request.price) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "name and price required" })),
        ));
    };

    let dish = state.catalog.create_dish(&name, price, request.category);
    tracing::info!(dish_id = dish.id, %name, "Dish created");
    Ok((StatusCode::CREATED, Json(dish)))
}
