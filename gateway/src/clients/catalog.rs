//! Catalog service client (dishes-service)

use std::time::Duration;

use shared::{Category, Dish};

use super::{ClientResult, HttpClient};

/// Typed wrapper over dishes-service
///
/// All calls are idempotent reads; transport failures may be retried a
/// bounded number of times. Nothing is cached across requests - the cart
/// snapshots name/price at add time instead.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    inner: HttpClient,
    retries: u32,
}

impl CatalogClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        timeout: Duration,
        retries: u32,
    ) -> Self {
        Self {
            inner: HttpClient::new(http, base_url, timeout),
            retries,
        }
    }

    /// GET /categories - 所有分类
    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        self.inner
            .get_json_with_retry("/categories", &[], self.retries)
            .await
    }

    /// GET /dishes?category= - 按分类 (id 或名称) 过滤的菜品列表
    pub async fn dishes(&self, category: Option<&str>) -> ClientResult<Vec<Dish>> {
        let query: Vec<(&str, &str)> = match category {
            Some(c) => vec![("category", c)],
            None => vec![],
        };
        self.inner
            .get_json_with_retry("/dishes", &query, self.retries)
            .await
    }

    /// GET /dishes/{id} - 单个菜品，404 映射为 Ok(None)
    pub async fn dish(&self, id: i64) -> ClientResult<Option<Dish>> {
        let path = format!("/dishes/{id}");
        match self
            .inner
            .get_json_with_retry::<Dish>(&path, &[], self.retries)
            .await
        {
            Ok(dish) => Ok(Some(dish)),
            Err(super::ClientError::Rejected { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
