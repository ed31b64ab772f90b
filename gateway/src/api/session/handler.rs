//! 会话身份 handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::json;
use shared::Identity;
use validator::Validate;

use crate::core::{GatewayError, GatewayResult, ServerState};
use crate::session::CurrentSession;

/// 登录/注册共用的凭证表单，边界处校验一次
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsForm {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// POST /register - 注册新用户并写入会话身份
pub async fn register(
    State(state): State<ServerState>,
    session: CurrentSession,
    Json(form): Json<CredentialsForm>,
) -> GatewayResult<(StatusCode, Json<Identity>)> {
    form.validate()
        .map_err(|e| GatewayError::Validation(e.to_string()))?;

    let identity = state
        .identity
        .register(&form.username, &form.password)
        .await
        .map_err(|e| GatewayError::from_client(e, "auth"))?;

    session.lock().await.identity = Some(identity.clone());
    tracing::info!(user_id = identity.id, "User registered and logged in");
    Ok((StatusCode::CREATED, Json(identity)))
}

/// POST /login - 校验凭证并写入会话身份
pub async fn login(
    State(state): State<ServerState>,
    session: CurrentSession,
    Json(form): Json<CredentialsForm>,
) -> GatewayResult<Json<Identity>> {
    form.validate()
        .map_err(|e| GatewayError::Validation(e.to_string()))?;

    let identity = state
        .identity
        .login(&form.username, &form.password)
        .await
        .map_err(|e| GatewayError::from_client(e, "auth"))?;

    session.lock().await.identity = Some(identity.clone());
    tracing::info!(user_id = identity.id, "User logged in");
    Ok(Json(identity))
}

/// POST /logout - 丢弃会话身份，购物车保留
pub async fn logout(session: CurrentSession) -> Json<serde_json::Value> {
    session.lock().await.identity = None;
    Json(json!({ "status": "ok" }))
}

/// GET /whoami - 当前会话身份，未登录时 401
pub async fn whoami(session: CurrentSession) -> GatewayResult<Json<Identity>> {
    session
        .lock()
        .await
        .identity
        .clone()
        .map(Json)
        .ok_or(GatewayError::AuthRequired)
}
