//! Checkout 编排 - 购物车 → 持久化订单的核心状态机
//!
//! # 状态机
//!
//! ```text
//! start ──无身份──────────────► RejectedNoAuth   (401, 购物车保留)
//!   │
//!   ├──行项为空───────────────► RejectedEmpty    (400, 不调用订单服务)
//!   │
//!   ▼ VALIDATING: 会话身份 + 购物车快照 → OrderRequest (无网络调用)
//!   ▼ SUBMITTING: 恰好提交一次，限时等待，绝不自动重试
//!   │
//!   ├──2xx──► Confirmed        (清空购物车，原样返回订单记录)
//!   └──其他──► FailedUpstream  (购物车不动，调用方可重试)
//! ```
//!
//! "订单服务已接受" 和 "购物车已清空" 之间进程崩溃是已知且可见的
//! 边界情况：跨服务没有分布式事务，提交语义是 at-least-once，
//! 这里不掩盖它。没有幂等键：失败对调用方可见，是否重试由调用方决定。

use async_trait::async_trait;
use shared::{OrderItem, OrderRecord, OrderRequest};

use crate::clients::{ClientError, ClientResult, OrderClient};
use crate::session::Session;

/// 订单提交的接缝 - 测试里可以换成 mock 验证 "从不调用" 属性
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    /// 把订单请求提交给订单服务，恰好一次
    async fn submit(&self, request: &OrderRequest) -> ClientResult<OrderRecord>;
}

#[async_trait]
impl OrderSubmitter for OrderClient {
    async fn submit(&self, request: &OrderRequest) -> ClientResult<OrderRecord> {
        self.create_order(request).await
    }
}

/// Checkout 的终态
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// 订单已创建；携带订单服务的原始记录
    Confirmed(OrderRecord),
    /// 会话中没有身份 - 先登录，购物车保留
    RejectedNoAuth,
    /// 有效行项为空 - 订单服务从未被调用
    RejectedEmpty,
    /// 订单服务不可达/超时/拒绝 - 购物车原样保留，可重试
    FailedUpstream(ClientError),
}

/// 执行一次 checkout
///
/// `explicit_items` 来自请求体 (可选)；缺省时用会话购物车快照。
/// `user_id` 永远取自会话身份，绝不信任客户端提交的值。
///
/// 调用方持有会话锁贯穿整个调用：清空购物车和产生响应在调用方
/// 看来是同一个原子步骤。
pub async fn run_checkout(
    session: &mut Session,
    explicit_items: Option<Vec<OrderItem>>,
    submitter: &dyn OrderSubmitter,
) -> CheckoutOutcome {
    let Some(identity) = session.identity.clone() else {
        tracing::debug!("Checkout rejected: no identity in session");
        return CheckoutOutcome::RejectedNoAuth;
    };

    // VALIDATING: 组装订单请求，不需要任何网络调用
    let items = explicit_items.unwrap_or_else(|| session.cart.to_order_items());
    if items.is_empty() {
        tracing::debug!(user_id = identity.id, "Checkout rejected: empty cart");
        return CheckoutOutcome::RejectedEmpty;
    }

    let request = OrderRequest {
        user_id: identity.id,
        items,
    };

    // SUBMITTING: 恰好一次，限时等待
    tracing::info!(
        user_id = request.user_id,
        lines = request.items.len(),
        "Submitting order"
    );
    match submitter.submit(&request).await {
        Ok(record) => {
            // CONFIRMED: 清空购物车与返回响应是同一个原子步骤
            session.cart.clear();
            tracing::info!(order_id = record.id, status = %record.status, "Order confirmed");
            CheckoutOutcome::Confirmed(record)
        }
        Err(err) => {
            // 购物车保持原样，用户可以原车重试
            tracing::warn!(user_id = request.user_id, error = %err, "Order submission failed");
            CheckoutOutcome::FailedUpstream(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::Identity;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 可编程的提交 mock，记录调用次数
    struct MockSubmitter {
        calls: AtomicUsize,
        response: Box<dyn Fn() -> ClientResult<OrderRecord> + Send + Sync>,
    }

    impl MockSubmitter {
        fn confirming(id: i64, status: &'static str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Box::new(move || {
                    Ok(OrderRecord {
                        id,
                        status: status.to_string(),
                        extra: serde_json::Map::new(),
                    })
                }),
            }
        }

        fn timing_out() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Box::new(|| {
                    Err(ClientError::Unavailable("operation timed out".into()))
                }),
            }
        }

        fn rejecting(status: u16) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Box::new(move || {
                    Err(ClientError::Rejected {
                        status,
                        body: r#"{"error":"user_id and items required"}"#.into(),
                    })
                }),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl OrderSubmitter for MockSubmitter {
        async fn submit(&self, _request: &OrderRequest) -> ClientResult<OrderRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.response)()
        }
    }

    fn session_with_identity() -> Session {
        let mut session = Session::default();
        session.identity = Some(Identity {
            id: 3,
            username: "alice".into(),
        });
        session
    }

    fn fill_cart(session: &mut Session) {
        session.cart.add(5, "Steak frites", Decimal::new(800, 0), 2);
        session.cart.add(9, "Crème brûlée", Decimal::new(400, 0), 1);
    }

    #[tokio::test]
    async fn test_no_identity_never_calls_order_service() {
        let mut session = Session::default();
        fill_cart(&mut session);
        let submitter = MockSubmitter::confirming(1, "new");

        let outcome = run_checkout(&mut session, None, &submitter).await;

        assert!(matches!(outcome, CheckoutOutcome::RejectedNoAuth));
        assert_eq!(submitter.calls(), 0);
        // 购物车保留，登录后可以继续
        assert_eq!(session.cart.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_cart_never_calls_order_service() {
        let mut session = session_with_identity();
        let submitter = MockSubmitter::confirming(1, "new");

        let outcome = run_checkout(&mut session, None, &submitter).await;

        assert!(matches!(outcome, CheckoutOutcome::RejectedEmpty));
        assert_eq!(submitter.calls(), 0);
    }

    #[tokio::test]
    async fn test_confirmed_clears_cart_and_returns_record() {
        let mut session = session_with_identity();
        fill_cart(&mut session);
        let submitter = MockSubmitter::confirming(77, "new");

        let outcome = run_checkout(&mut session, None, &submitter).await;

        match outcome {
            CheckoutOutcome::Confirmed(record) => {
                assert_eq!(record.id, 77);
                assert_eq!(record.status, "new");
            }
            other => panic!("expected Confirmed, got {other:?}"),
        }
        assert_eq!(submitter.calls(), 1);
        assert!(session.cart.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_leaves_cart_intact_and_retry_succeeds() {
        let mut session = session_with_identity();
        fill_cart(&mut session);

        let failing = MockSubmitter::timing_out();
        let outcome = run_checkout(&mut session, None, &failing).await;
        assert!(matches!(outcome, CheckoutOutcome::FailedUpstream(_)));
        assert_eq!(failing.calls(), 1); // 绝不自动重试
        assert_eq!(session.cart.len(), 2);

        // 同一购物车原样重试必须可行
        let recovering = MockSubmitter::confirming(78, "new");
        let outcome = run_checkout(&mut session, None, &recovering).await;
        assert!(matches!(outcome, CheckoutOutcome::Confirmed(_)));
        assert!(session.cart.is_empty());
    }

    #[tokio::test]
    async fn test_non_2xx_leaves_cart_intact() {
        let mut session = session_with_identity();
        fill_cart(&mut session);
        let submitter = MockSubmitter::rejecting(400);

        let outcome = run_checkout(&mut session, None, &submitter).await;

        assert!(matches!(
            outcome,
            CheckoutOutcome::FailedUpstream(ClientError::Rejected { status: 400, .. })
        ));
        assert_eq!(session.cart.len(), 2);
    }

    #[tokio::test]
    async fn test_explicit_items_override_cart_but_user_id_from_session() {
        let mut session = session_with_identity();
        fill_cart(&mut session);

        struct Capture {
            seen: tokio::sync::Mutex<Option<OrderRequest>>,
        }

        #[async_trait]
        impl OrderSubmitter for Capture {
            async fn submit(&self, request: &OrderRequest) -> ClientResult<OrderRecord> {
                *self.seen.lock().await = Some(request.clone());
                Ok(OrderRecord {
                    id: 1,
                    status: "new".to_string(),
                    extra: serde_json::Map::new(),
                })
            }
        }

        let capture = Capture {
            seen: tokio::sync::Mutex::new(None),
        };
        let explicit = vec![OrderItem {
            dish_id: 42,
            quantity: 1,
        }];

        run_checkout(&mut session, Some(explicit), &capture).await;

        let seen = capture.seen.lock().await.clone().unwrap();
        assert_eq!(seen.user_id, 3); // 来自会话，不是请求体
        assert_eq!(seen.items.len(), 1);
        assert_eq!(seen.items[0].dish_id, 42);
    }
}
