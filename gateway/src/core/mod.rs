//! 核心模块 - 网关配置、状态和错误定义
//!
//! # 模块结构
//!
//! - [`Config`] - 网关配置
//! - [`ServerState`] - 网关状态
//! - [`Server`] - HTTP 服务器
//! - [`GatewayError`] - 网关错误

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{GatewayError, GatewayResult};
pub use server::Server;
pub use state::ServerState;
