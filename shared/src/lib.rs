//! Shared Models - 餐厅订餐平台各服务共享的数据模型
//!
//! 网关和三个后端服务 (auth / dishes / orders) 通过 HTTP+JSON 通信，
//! 本 crate 定义它们之间传递的数据形状：
//!
//! - [`models::Identity`] - 用户身份 (auth-service 拥有)
//! - [`models::Category`] / [`models::Dish`] - 菜单数据 (dishes-service 拥有)
//! - [`models::OrderRequest`] / [`models::OrderRecord`] - 订单 (orders-service 拥有)
//!
//! 网关不拥有任何持久化数据，只是传递或组装这些形状。

pub mod models;

// Re-export 公共类型
pub use models::{
    Category, CategoryRef, Dish, Identity, OrderItem, OrderRecord, OrderRequest,
};
