//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`session`] - 会话登录/注册/登出 (浏览器侧身份)
//! - [`cart`] - 会话购物车
//! - [`checkout`] - 下单编排
//! - [`menu`] - 菜单聚合 (浏览降级：目录不可用时返回空列表)
//! - [`proxy`] - `/api/{auth,dishes,orders}` 透明转发

pub mod cart;
pub mod checkout;
pub mod health;
pub mod menu;
pub mod proxy;
pub mod session;
