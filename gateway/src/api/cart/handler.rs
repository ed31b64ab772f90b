//! 购物车 handlers
//!
//! 所有读-改-写都在会话锁内完成；加入菜品前先向目录服务取快照
//! (抓取在锁外，锁内不做网络调用)。

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::{GatewayError, GatewayResult, ServerState};
use crate::session::{CartLine, CartUpdate, CurrentSession};

/// 购物车视图的一行
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub dish_id: i64,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    /// 目录里已查不到这个菜品：行保留但不计入显示小计
    pub missing: bool,
}

/// 购物车视图
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    /// 显示小计：失效行计 0，标记而不是静默跳过
    pub subtotal: Decimal,
}

/// GET /cart - 查看购物车
///
/// 行项对照目录服务的最新数据校验；目录整体不可用时不报错，
/// 按快照显示 (浏览路径保持可用，checkout 路径才严格)。
pub async fn view(
    State(state): State<ServerState>,
    session: CurrentSession,
) -> GatewayResult<Json<CartView>> {
    let lines: Vec<CartLine> = session.lock().await.cart.lines().to_vec();

    // 锁外抓目录；失败时 None = 无法校验，全部按在售处理
    let known_ids: Option<Vec<i64>> = match state.catalog.dishes(None).await {
        Ok(dishes) => Some(dishes.iter().map(|d| d.id).collect()),
        Err(err) => {
            tracing::warn!(error = %err, "Catalog unavailable, serving cart from snapshots");
            None
        }
    };

    let mut subtotal = Decimal::ZERO;
    let views = lines
        .into_iter()
        .map(|line| {
            let missing = known_ids
                .as_ref()
                .is_some_and(|ids| !ids.contains(&line.dish_id));
            let line_subtotal = if missing { Decimal::ZERO } else { line.subtotal() };
            subtotal += line_subtotal;
            CartLineView {
                dish_id: line.dish_id,
                name: line.name,
                quantity: line.quantity,
                unit_price: line.unit_price,
                subtotal: line_subtotal,
                missing,
            }
        })
        .collect();

    Ok(Json(CartView {
        lines: views,
        subtotal,
    }))
}

/// 加入购物车请求
#[derive(Debug, Deserialize, Validate)]
pub struct AddItemRequest {
    pub dish_id: i64,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: u32,
}

/// POST /cart/items - 加入菜品
///
/// 名称/价格在此刻从目录快照；之后目录改价不影响已有行。
pub async fn add_item(
    State(state): State<ServerState>,
    session: CurrentSession,
    Json(request): Json<AddItemRequest>,
) -> GatewayResult<Json<CartSummary>> {
    request
        .validate()
        .map_err(|e| GatewayError::Validation(e.to_string()))?;

    let dish = state
        .catalog
        .dish(request.dish_id)
        .await
        .map_err(|_| GatewayError::UpstreamUnavailable { service: "dishes" })?
        .ok_or_else(|| GatewayError::NotFound(format!("dish {} not found", request.dish_id)))?;

    let mut guard = session.lock().await;
    guard
        .cart
        .add(dish.id, dish.name, dish.price, request.quantity);
    Ok(Json(CartSummary::of(&guard.cart)))
}

/// 更新购物车请求
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub dish_id: i64,
    /// "remove" 或 "update"
    pub action: String,
    /// action=update 时的新数量，缺省 1；<= 0 等价于删除
    pub quantity: Option<i64>,
}

/// POST /cart/update - 更新数量或删除行
///
/// 行不存在时是 no-op，返回当前购物车。
pub async fn update_item(
    session: CurrentSession,
    Json(request): Json<UpdateItemRequest>,
) -> GatewayResult<Json<CartSummary>> {
    let action = match request.action.as_str() {
        "remove" => CartUpdate::Remove,
        "update" => {
            let quantity = request.quantity.unwrap_or(1);
            if quantity <= 0 {
                CartUpdate::Remove
            } else {
                // 超出 u32 的正数是非法请求，不能让它截断成删除
                let quantity = u32::try_from(quantity).map_err(|_| {
                    GatewayError::Validation(format!("quantity out of range: {quantity}"))
                })?;
                CartUpdate::SetQuantity(quantity)
            }
        }
        other => {
            return Err(GatewayError::Validation(format!(
                "unknown action: {other}"
            )));
        }
    };

    let mut guard = session.lock().await;
    guard.cart.update(request.dish_id, action);
    Ok(Json(CartSummary::of(&guard.cart)))
}

/// 购物车变更后的简要响应
#[derive(Debug, Serialize)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
}

impl CartSummary {
    fn of(cart: &crate::session::Cart) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            total: cart.total(),
        }
    }
}
