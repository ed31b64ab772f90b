//! 会话购物车模型
//!
//! 购物车只存在于会话里，按菜品 id 作键，每个菜品至多一行。
//! 行内的名称/价格是加入时从目录服务抓取的快照：之后目录里改价
//! 不会追溯已在车里的行。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::OrderItem;

/// 购物车的一行：一个菜品和它的数量
///
/// 不变量：quantity >= 1。数量 <= 0 的行不存在 (会被移除而不是保留)。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub dish_id: i64,
    pub quantity: u32,
    /// 加入时的单价快照
    pub unit_price: Decimal,
    /// 加入时的名称快照
    pub name: String,
}

impl CartLine {
    /// 本行小计
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// 购物车更新动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartUpdate {
    /// 无条件删除该行
    Remove,
    /// 设置新数量；0 等价于删除
    SetQuantity(u32),
}

/// 会话购物车
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入菜品：已存在则累加数量，否则以快照新建一行
    ///
    /// 调用方保证 quantity >= 1 (请求边界校验过)。
    pub fn add(&mut self, dish_id: i64, name: impl Into<String>, unit_price: Decimal, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.dish_id == dish_id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine {
                dish_id,
                quantity,
                unit_price,
                name: name.into(),
            });
        }
    }

    /// 更新某一行；数量 <= 0 等价于删除
    ///
    /// 返回是否确实找到了该行。
    pub fn update(&mut self, dish_id: i64, action: CartUpdate) -> bool {
        let Some(pos) = self.lines.iter().position(|l| l.dish_id == dish_id) else {
            return false;
        };
        match action {
            CartUpdate::Remove | CartUpdate::SetQuantity(0) => {
                self.lines.remove(pos);
            }
            CartUpdate::SetQuantity(q) => {
                self.lines[pos].quantity = q;
            }
        }
        true
    }

    /// 清空购物车 - 只在确认下单成功后调用
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// 所有行的 quantity × unit_price 之和，每次调用现算
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|l| l.subtotal()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// 转成订单行，保持加入顺序
    pub fn to_order_items(&self) -> Vec<OrderItem> {
        self.lines
            .iter()
            .map(|l| OrderItem {
                dish_id: l.dish_id,
                quantity: l.quantity,
            })
            .collect()
    }
}
