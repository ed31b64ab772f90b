//! 会话模块 - 浏览器会话的身份和购物车
//!
//! # 设计
//!
//! 会话不是随处可取的全局可变状态，而是显式的每请求上下文：
//!
//! - [`SessionStore`] - 签名 Cookie → 会话数据的映射，网关唯一的状态；
//!   只在会话被写入时增长，空闲会话按 TTL 回收
//! - [`Session`] - `{ identity: Option<Identity>, cart: Cart }`
//! - [`session_middleware`] - 请求开始时解析会话并注入扩展；
//!   被写入过的新会话落库并在响应上追加 Set-Cookie
//! - [`CurrentSession`] - handler 侧的提取器
//!
//! 购物车的读-改-写在会话锁内完成，单个请求即单个临界区，
//! 客户端并发发请求也不会丢失更新。

mod cart;
mod middleware;
mod store;

pub use cart::{Cart, CartLine, CartUpdate};
pub use middleware::{CurrentSession, session_middleware};
pub use store::{SESSION_COOKIE, Session, SessionHandle, SessionStore};
