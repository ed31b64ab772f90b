use std::time::Duration;

/// 网关配置 - 所有配置项均可通过环境变量覆盖
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 8000 | HTTP 服务端口 |
/// | AUTH_URL | http://auth:5001 | 身份服务地址 |
/// | DISHES_URL | http://dishes:5002 | 菜品服务地址 |
/// | ORDERS_URL | http://orders:5003 | 订单服务地址 |
/// | SECRET_KEY | dev-secret | 会话签名密钥 |
/// | READ_TIMEOUT_MS | 2000 | 只读调用超时(毫秒) |
/// | ORDER_TIMEOUT_MS | 5000 | 下单调用超时(毫秒) |
/// | PROXY_READ_RETRIES | 1 | GET 转发失败后的额外重试次数 |
/// | SESSION_TTL_SECS | 3600 | 空闲会话的回收时限(秒) |
/// | ENVIRONMENT | development | 运行环境 |
///
/// 所有出站调用都必须有超时上限：一个缓慢的后端服务不能无限期地
/// 阻塞网关。
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 身份服务 (auth-service) 基础 URL
    pub auth_url: String,
    /// 菜品服务 (dishes-service) 基础 URL
    pub dishes_url: String,
    /// 订单服务 (orders-service) 基础 URL
    pub orders_url: String,
    /// 会话 Cookie 签名密钥
    pub secret_key: String,
    /// 只读调用超时 (目录浏览、转发读取)
    pub read_timeout: Duration,
    /// 下单调用超时 (checkout 专用，绝不自动重试)
    pub order_timeout: Duration,
    /// 幂等 GET 转发失败后的额外重试次数
    pub proxy_read_retries: u32,
    /// 空闲会话多久后被回收
    pub session_ttl: Duration,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置，未设置时使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            auth_url: std::env::var("AUTH_URL").unwrap_or_else(|_| "http://auth:5001".into()),
            dishes_url: std::env::var("DISHES_URL")
                .unwrap_or_else(|_| "http://dishes:5002".into()),
            orders_url: std::env::var("ORDERS_URL")
                .unwrap_or_else(|_| "http://orders:5003".into()),
            secret_key: std::env::var("SECRET_KEY").unwrap_or_else(|_| "dev-secret".into()),
            read_timeout: Duration::from_millis(
                std::env::var("READ_TIMEOUT_MS")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(2000),
            ),
            order_timeout: Duration::from_millis(
                std::env::var("ORDER_TIMEOUT_MS")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(5000),
            ),
            proxy_read_retries: std::env::var("PROXY_READ_RETRIES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1),
            session_ttl: Duration::from_secs(
                std::env::var("SESSION_TTL_SECS")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3600),
            ),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义后端地址覆盖部分配置
    ///
    /// 常用于测试场景：后端服务跑在随机端口上
    pub fn with_backends(
        auth_url: impl Into<String>,
        dishes_url: impl Into<String>,
        orders_url: impl Into<String>,
    ) -> Self {
        let mut config = Self::from_env();
        config.auth_url = auth_url.into();
        config.dishes_url = dishes_url.into();
        config.orders_url = orders_url.into();
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
