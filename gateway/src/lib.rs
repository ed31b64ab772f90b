//! Gateway - 餐厅订餐平台的统一 HTTP 入口
//!
//! # 架构概述
//!
//! 网关把三个独立部署的后端服务 (auth / dishes / orders) 聚合在
//! 一个对外的 HTTP 门面后，自己不持有任何持久化数据：
//!
//! - **透明转发** (`proxy`): `/api/{service}/...` 原样转发，超时和
//!   连接失败显式转成 502
//! - **会话** (`session`): 签名 Cookie、每请求的身份 + 购物车上下文
//! - **Checkout 编排** (`checkout`): 购物车 → 订单的核心状态机，
//!   下单恰好提交一次，失败时购物车原样保留
//! - **服务客户端** (`clients`): 每个后端一个带超时的类型化封装
//!
//! # 模块结构
//!
//! ```text
//! gateway/src/
//! ├── core/          # 配置、状态、服务器、错误
//! ├── session/       # 会话存储、购物车、中间件
//! ├── clients/       # 后端服务客户端
//! ├── checkout/      # checkout 状态机
//! ├── proxy/         # 透明转发
//! ├── api/           # HTTP 路由和 handlers
//! └── utils/         # 日志等工具
//! ```

pub mod api;
pub mod checkout;
pub mod clients;
pub mod core;
pub mod proxy;
pub mod session;
pub mod utils;

// Re-export 公共类型
pub use checkout::{CheckoutOutcome, OrderSubmitter, run_checkout};
pub use crate::core::server::build_app;
pub use crate::core::{Config, GatewayError, GatewayResult, Server, ServerState};
pub use session::{Cart, CartLine, CartUpdate, CurrentSession, SessionStore};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() {
    dotenv::dotenv().ok();
    utils::init_logger();
}
