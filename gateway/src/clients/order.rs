//! Order service client (orders-service)

use std::time::Duration;

use shared::{OrderRecord, OrderRequest};

use super::{ClientResult, HttpClient};

/// Typed wrapper over orders-service
///
/// Order creation is the one write on the checkout path. It carries its own
/// (longer) timeout and is NEVER retried here: for a payment-adjacent
/// workflow a duplicate submission is worse than a visible failure.
#[derive(Debug, Clone)]
pub struct OrderClient {
    inner: HttpClient,
}

impl OrderClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            inner: HttpClient::new(http, base_url, timeout),
        }
    }

    /// POST /orders - 提交订单，恰好调用一次
    pub async fn create_order(&self, request: &OrderRequest) -> ClientResult<OrderRecord> {
        self.inner.post_json("/orders", request).await
    }
}
