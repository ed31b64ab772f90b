//! HTTP API
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 健康检查 |
//! | /register | POST | 注册：400 字段缺失 / 409 已存在 / 201 |
//! | /login | POST | 登录：200 或 401 |
//! | /users | GET | 用户列表 (不含凭证) |

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use shared::Identity;

use crate::state::{AppState, RegisterError};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/users", get(list_users))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "auth" }))
}

/// 凭证请求体；字段用 Option 接住，缺失时返回 400 而不是 422
#[derive(Debug, Deserialize)]
struct CredentialsRequest {
    username: Option<String>,
    password: Option<String>,
}

impl CredentialsRequest {
    fn require(self) -> Result<(String, String), (StatusCode, Json<Value>)> {
        match (self.username, self.password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Ok((u, p)),
            _ => Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "username and password required" })),
            )),
        }
    }
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<Identity>), (StatusCode, Json<Value>)> {
    let (username, password) = request.require()?;

    match state.users.register(&username, &password) {
        Ok(identity) => {
            tracing::info!(user_id = identity.id, "User registered");
            Ok((StatusCode::CREATED, Json(identity)))
        }
        Err(RegisterError::Exists) => Err((
            StatusCode::CONFLICT,
            Json(json!({ "error": "user exists" })),
        )),
        Err(RegisterError::Hash) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "internal error" })),
        )),
    }
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<Identity>, (StatusCode, Json<Value>)> {
    let (username, password) = request.require()?;

    state
        .users
        .authenticate(&username, &password)
        .map(Json)
        .ok_or((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid credentials" })),
        ))
}

async fn list_users(State(state): State<Arc<AppState>>) -> Json<Vec<Identity>> {
    Json(state.users.list())
}
