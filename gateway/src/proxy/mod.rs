//! 透明转发
//!
//! 把 `/api/{service}/...` 下的任意请求原样转发到对应后端服务：
//! 保留方法、查询参数、JSON 体和除 host 以外的所有请求头，
//! 并把后端的状态码、响应体、Content-Type 逐字节转回。
//!
//! 连接失败和超时在这里被捕获并转成
//! 502 "upstream unavailable"，绝不变成静默的 200，也不把原始
//! 传输异常抛给浏览器。幂等的 GET 可以有限次重试，其余方法绝不重试。

use axum::{
    body::Bytes,
    http::{HeaderMap, Method, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::clients::ClientError;
use crate::core::{GatewayError, ServerState};

/// 把一个入站请求转发到 `base_url` 下的 `path`
///
/// `query` 是原始查询串 (未解码)，`body` 是原始字节。
pub async fn forward(
    state: &ServerState,
    service: &'static str,
    base_url: &str,
    path: &str,
    method: Method,
    headers: &HeaderMap,
    query: Option<&str>,
    body: Bytes,
) -> Result<Response, GatewayError> {
    let mut url = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    if let Some(q) = query {
        url.push('?');
        url.push_str(q);
    }

    // 非 GET 绝不重试：转发的写操作和下单一样，重复比失败更糟
    let retries = if method == Method::GET {
        state.config.proxy_read_retries
    } else {
        0
    };

    let mut attempt = 0;
    loop {
        match send_once(state, &url, &method, headers, &body).await {
            Err(ClientError::Unavailable(reason)) if attempt < retries => {
                attempt += 1;
                tracing::warn!(%url, attempt, %reason, "Retrying idempotent proxy read");
            }
            Err(err) => {
                tracing::warn!(%url, error = %err, "Proxy forward failed");
                // send_once 对任何上游状态码都返回 Ok，这里只剩传输层失败
                return Err(GatewayError::UpstreamUnavailable { service });
            }
            Ok(response) => return Ok(response),
        }
    }
}

async fn send_once(
    state: &ServerState,
    url: &str,
    method: &Method,
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<Response, ClientError> {
    // host 必须换成目标服务的；content-length 由 reqwest 重新计算
    let mut outbound = headers.clone();
    outbound.remove(header::HOST);
    outbound.remove(header::CONTENT_LENGTH);

    // GET 用只读超时；其余方法用更长的写超时
    let timeout = if *method == Method::GET {
        state.config.read_timeout
    } else {
        state.config.order_timeout
    };

    let upstream = state
        .http
        .request(method.clone(), url)
        .headers(outbound)
        .body(body.clone())
        .timeout(timeout)
        .send()
        .await
        .map_err(ClientError::from_transport)?;

    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| header::HeaderValue::from_static("application/json"));
    let bytes = upstream
        .bytes()
        .await
        .map_err(ClientError::from_transport)?;

    // 状态码和响应体逐字节转回，空列表也是合法响应
    Ok((status, [(header::CONTENT_TYPE, content_type)], bytes).into_response())
}
