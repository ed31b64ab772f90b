//! Checkout handler
//!
//! HTTP 边界：请求体在这里校验一次成类型化的值，然后交给
//! [`crate::checkout::run_checkout`]。终态到状态码的映射：
//!
//! | 终态 | 响应 |
//! |------|------|
//! | Confirmed | 200 `{status:"ok", order}` |
//! | RejectedNoAuth | 401 `{error:"not authenticated"}` |
//! | RejectedEmpty | 400 `{error:"cart is empty"}` |
//! | FailedUpstream | 500 `{error:"order failed", details}` |

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::json;
use shared::OrderItem;

use crate::checkout::{CheckoutOutcome, run_checkout};
use crate::core::{GatewayError, GatewayResult, ServerState};
use crate::session::CurrentSession;

/// Checkout 请求体；items 缺省时用会话购物车
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutRequest {
    pub items: Option<Vec<OrderItem>>,
}

/// POST /checkout - 把购物车变成持久化订单
pub async fn checkout(
    State(state): State<ServerState>,
    session: CurrentSession,
    body: Option<Json<CheckoutRequest>>,
) -> GatewayResult<Json<serde_json::Value>> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    // 显式行项在边界校验一次：数量必须是正整数
    if let Some(items) = &request.items
        && let Some(bad) = items.iter().find(|i| i.quantity == 0)
    {
        return Err(GatewayError::Validation(format!(
            "quantity must be at least 1 for dish {}",
            bad.dish_id
        )));
    }

    // 会话锁贯穿 快照 → 提交 → 清空：对调用方而言清空购物车和
    // 产生响应是同一个原子步骤
    let mut guard = session.lock().await;
    match run_checkout(&mut guard, request.items, &state.orders).await {
        CheckoutOutcome::Confirmed(record) => {
            Ok(Json(json!({ "status": "ok", "order": record })))
        }
        CheckoutOutcome::RejectedNoAuth => Err(GatewayError::AuthRequired),
        CheckoutOutcome::RejectedEmpty => {
            Err(GatewayError::Validation("cart is empty".to_string()))
        }
        CheckoutOutcome::FailedUpstream(err) => Err(GatewayError::OrderFailed {
            details: err.to_string(),
        }),
    }
}
