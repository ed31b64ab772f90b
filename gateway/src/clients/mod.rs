//! 后端服务客户端
//!
//! 每个后端服务一个薄的类型化封装 (crab 风格的 HttpClient 模式)：
//!
//! - [`IdentityClient`] - auth-service：注册 / 登录
//! - [`CatalogClient`] - dishes-service：分类 / 菜品查询
//! - [`OrderClient`] - orders-service：创建订单
//!
//! 共同约束：
//! - 每次调用都有显式超时，网关绝不被慢后端无限期挂起
//! - 传输层失败映射为小而封闭的 [`ClientError`] 集合，不泄漏原始异常
//! - 幂等的 GET 可以有限次重试；下单调用绝不自动重试

mod catalog;
mod error;
mod identity;
mod order;

pub use catalog::CatalogClient;
pub use error::{ClientError, ClientResult};
pub use identity::IdentityClient;
pub use order::OrderClient;

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// 底层 HTTP 封装，三个类型化客户端共用
///
/// 持有共享的 reqwest::Client (连接池) 和目标服务的 base URL。
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpClient {
    pub(crate) fn new(http: reqwest::Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            timeout,
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// GET 并解析 JSON
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(ClientError::from_transport)?;
        Self::handle_response(response).await
    }

    /// GET 并解析 JSON，传输失败时有限次重试
    ///
    /// 只用于幂等的只读调用。业务性的非 2xx 不重试。
    pub(crate) async fn get_json_with_retry<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        retries: u32,
    ) -> ClientResult<T> {
        let mut attempt = 0;
        loop {
            match self.get_json(path, query).await {
                Err(ClientError::Unavailable(reason)) if attempt < retries => {
                    attempt += 1;
                    tracing::warn!(path, attempt, %reason, "Retrying idempotent read");
                }
                other => return other,
            }
        }
    }

    /// POST JSON 并解析 JSON
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(ClientError::from_transport)?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}
