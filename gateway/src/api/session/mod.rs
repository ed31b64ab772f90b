//! 会话身份路由
//!
//! 浏览器侧的登录/注册：凭证由 auth-service 校验 (对网关是黑盒)，
//! 成功后身份存进会话，作为 checkout 时 user_id 的唯一来源。
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /register | POST | 注册并登录 |
//! | /login | POST | 登录 |
//! | /logout | POST | 丢弃会话身份 (购物车保留) |
//! | /whoami | GET | 当前会话身份 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/logout", post(handler::logout))
        .route("/whoami", get(handler::whoami))
}
