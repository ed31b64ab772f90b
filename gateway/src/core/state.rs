//! 服务器状态 - 网关持有的所有共享组件
//!
//! 网关不拥有任何持久化数据；这里只有配置、会话存储和三个后端
//! 服务的客户端。Arc 浅拷贝，按请求克隆成本极低。

use std::sync::Arc;

use crate::clients::{CatalogClient, IdentityClient, OrderClient};
use crate::core::Config;
use crate::session::SessionStore;

/// 网关状态
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | http | 共享的出站 HTTP 客户端 (连接池，转发路径直接用) |
/// | sessions | 会话存储 (网关唯一的状态) |
/// | identity | auth-service 客户端 |
/// | catalog | dishes-service 客户端 |
/// | orders | orders-service 客户端 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub http: reqwest::Client,
    pub sessions: Arc<SessionStore>,
    pub identity: IdentityClient,
    pub catalog: CatalogClient,
    pub orders: OrderClient,
}

impl ServerState {
    /// 从配置初始化状态
    ///
    /// reqwest::Client 在所有客户端之间共享；每个调用自己带超时，
    /// 所以这里不设全局超时。
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http: http.clone(),
            sessions: Arc::new(SessionStore::new(&config.secret_key)),
            identity: IdentityClient::new(
                http.clone(),
                config.auth_url.clone(),
                config.read_timeout,
            ),
            catalog: CatalogClient::new(
                http.clone(),
                config.dishes_url.clone(),
                config.read_timeout,
                config.proxy_read_retries,
            ),
            orders: OrderClient::new(http, config.orders_url.clone(), config.order_timeout),
            config: config.clone(),
        })
    }
}
