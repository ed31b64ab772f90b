//! 会话中间件和提取器
//!
//! 请求开始时解析 (或创建) 会话并以 [`CurrentSession`] 注入请求扩展；
//! 被写入过的新会话在响应上追加 Set-Cookie。业务 handler 只通过
//! 提取器拿会话，不碰 Cookie 细节。

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderValue, header, request::Parts},
    middleware::Next,
    response::Response,
};
use tokio::sync::Mutex;

use crate::core::{GatewayError, ServerState};

use super::{SESSION_COOKIE, Session, SessionHandle};

/// 当前请求的会话句柄
///
/// handler 侧用法：
/// ```ignore
/// pub async fn cart_view(session: CurrentSession) -> ... {
///     let session = session.lock().await;
/// }
/// ```
#[derive(Clone)]
pub struct CurrentSession(pub SessionHandle);

impl CurrentSession {
    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, super::Session> {
        self.0.lock().await
    }
}

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentSession>()
            .cloned()
            .ok_or_else(|| {
                GatewayError::Internal(anyhow::anyhow!("session middleware not installed"))
            })
    }
}

/// 会话中间件
///
/// 从 Cookie 头解析会话；签名非法或会话丢失时给 handler 一个
/// 空白会话，但只有 handler 确实写入了会话数据 (身份或购物车)
/// 才落库并发 Set-Cookie。无 Cookie 的健康检查、爬虫和转发请求
/// 不会在存储里留下任何条目。
/// 新会话的 Set-Cookie 带 HttpOnly + SameSite=Lax + Path=/。
pub async fn session_middleware(
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_value = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(find_session_cookie);

    let existing = cookie_value
        .as_deref()
        .and_then(|value| state.sessions.lookup(value));
    let fresh = existing.is_none();
    let handle: SessionHandle =
        existing.unwrap_or_else(|| Arc::new(Mutex::new(Session::default())));
    request.extensions_mut().insert(CurrentSession(handle.clone()));

    let mut response = next.run(request).await;

    if fresh {
        let written = {
            let session = handle.lock().await;
            session.identity.is_some() || !session.cart.is_empty()
        };
        if written {
            let value = state.sessions.persist(handle);
            let cookie = format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax");
            if let Ok(header_value) = HeaderValue::from_str(&cookie) {
                response
                    .headers_mut()
                    .append(header::SET_COOKIE, header_value);
            }
        }
    }

    response
}

/// 从 Cookie 头中找出会话 Cookie 的值
fn find_session_cookie(header: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}
