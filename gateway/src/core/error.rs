//! 网关统一错误类型
//!
//! 封闭的错误集合，不走 "catch-all 异常" 的模式：
//! 每种失败都是显式的类型化值，由调用方决定 HTTP 状态和消息。
//!
//! | 变体 | 状态码 | 说明 |
//! |------|--------|------|
//! | Validation | 400 | 请求字段缺失/非法 |
//! | AuthRequired | 401 | 会话中没有身份 |
//! | NotFound | 404 | 引用的菜品/分类不存在 |
//! | UpstreamUnavailable | 502 | 后端服务连接失败或超时 |
//! | OrderFailed | 500 | 下单失败 (订单未创建，购物车保持原样) |
//! | Internal | 500 | 其他内部错误 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::clients::ClientError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not authenticated")]
    AuthRequired,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("upstream {service} unavailable")]
    UpstreamUnavailable { service: &'static str },

    /// 后端服务返回了业务性的非 2xx：状态码和响应体原样转达
    #[error("upstream rejected with status {status}")]
    UpstreamRejected { status: u16, body: String },

    #[error("order failed: {details}")]
    OrderFailed { details: String },

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            GatewayError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            GatewayError::AuthRequired => {
                (StatusCode::UNAUTHORIZED, json!({ "error": "not authenticated" }))
            }
            GatewayError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            GatewayError::UpstreamUnavailable { service } => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": "upstream unavailable", "service": service }),
            ),
            GatewayError::UpstreamRejected { status, body } => {
                let status = StatusCode::from_u16(*status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let body = serde_json::from_str::<serde_json::Value>(body)
                    .unwrap_or_else(|_| json!({ "error": body }));
                (status, body)
            }
            GatewayError::OrderFailed { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "order failed", "details": details }),
            ),
            GatewayError::Internal(err) => {
                // 记录内部错误但不暴露详细信息
                tracing::error!(error = ?err, "Internal gateway error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl GatewayError {
    /// 把传输层/业务层的客户端错误映射成网关错误
    ///
    /// 连接失败/超时 → UpstreamUnavailable；非 2xx → 原样转达。
    /// checkout 路径不用这个映射，它有自己的 OrderFailed 形状。
    pub fn from_client(err: ClientError, service: &'static str) -> Self {
        match err {
            ClientError::Unavailable(_) => GatewayError::UpstreamUnavailable { service },
            ClientError::Rejected { status, body } => {
                GatewayError::UpstreamRejected { status, body }
            }
            ClientError::InvalidResponse(msg) => {
                GatewayError::Internal(anyhow::anyhow!("invalid response from {service}: {msg}"))
            }
        }
    }
}

/// 网关统一 Result 类型
pub type GatewayResult<T> = Result<T, GatewayError>;
