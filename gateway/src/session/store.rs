//! 会话存储 - 签名 Cookie 到会话数据的映射
//!
//! Cookie 值形如 `"{uuid}.{hex(hmac_sha256(secret, uuid))}"`。
//! 签名不合法或会话不存在时按无会话处理，不报错。
//!
//! 会话数据本身只在网关内存里 (DashMap)；网关不持有任何持久化
//! 数据，购物车超出会话生命周期即消失。存储只在 [`persist`] 时
//! 增长：无 Cookie 的请求 (健康检查、转发) 不留任何条目，
//! 空闲超过 TTL 的会话由 [`evict_idle`] 回收。
//!
//! [`persist`]: SessionStore::persist
//! [`evict_idle`]: SessionStore::evict_idle

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use ring::hmac;
use shared::Identity;
use tokio::sync::Mutex;

use super::Cart;

/// 会话 Cookie 名称
pub const SESSION_COOKIE: &str = "gateway_session";

/// 单个浏览器会话的数据
///
/// identity 一旦设置，就是 checkout 时 user_id 的唯一来源，
/// 绝不信任客户端表单里的 user_id。
#[derive(Debug, Default)]
pub struct Session {
    pub identity: Option<Identity>,
    pub cart: Cart,
}

/// 会话句柄 - 每请求的显式上下文
///
/// tokio Mutex：购物车读-改-写以及 checkout 的
/// "快照 → 提交 → 清空" 全程持锁，同会话的并发请求串行化。
pub type SessionHandle = Arc<Mutex<Session>>;

/// 存储条目：会话句柄 + 最近访问时间 (距 store 创建的毫秒数)
struct SessionEntry {
    handle: SessionHandle,
    last_seen: AtomicU64,
}

impl SessionEntry {
    fn new(handle: SessionHandle, epoch: Instant) -> Self {
        Self {
            handle,
            last_seen: AtomicU64::new(elapsed_millis(epoch)),
        }
    }

    fn touch(&self, epoch: Instant) {
        self.last_seen.store(elapsed_millis(epoch), Ordering::Relaxed);
    }
}

fn elapsed_millis(epoch: Instant) -> u64 {
    epoch.elapsed().as_millis() as u64
}

/// 会话存储
pub struct SessionStore {
    sessions: DashMap<String, SessionEntry>,
    key: hmac::Key,
    epoch: Instant,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.sessions.len())
            .finish()
    }
}

impl SessionStore {
    /// 用签名密钥创建空的会话存储
    pub fn new(secret: &str) -> Self {
        Self {
            sessions: DashMap::new(),
            key: hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes()),
            epoch: Instant::now(),
        }
    }

    /// 按 Cookie 值查找已有会话，并刷新其访问时间
    ///
    /// 签名不合法或会话已被回收时返回 None；存储不会因此增长。
    pub fn lookup(&self, cookie_value: &str) -> Option<SessionHandle> {
        let id = self.verify(cookie_value)?;
        let entry = self.sessions.get(&id)?;
        entry.touch(self.epoch);
        Some(entry.handle.clone())
    }

    /// 落库一个新会话，返回签名后的 Cookie 值
    ///
    /// 只在 handler 确实写入了会话数据时调用 (中间件负责判断)；
    /// 这是存储唯一的增长入口。
    pub fn persist(&self, handle: SessionHandle) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.sessions
            .insert(id.clone(), SessionEntry::new(handle, self.epoch));
        self.sign(&id)
    }

    /// 回收空闲时间 >= max_idle 的会话，返回回收数量
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = elapsed_millis(self.epoch);
        let cutoff = max_idle.as_millis() as u64;
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| {
            now.saturating_sub(entry.last_seen.load(Ordering::Relaxed)) < cutoff
        });
        before - self.sessions.len()
    }

    /// 当前存活的会话数
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn sign(&self, id: &str) -> String {
        let tag = hmac::sign(&self.key, id.as_bytes());
        format!("{}.{}", id, hex::encode(tag.as_ref()))
    }

    /// 校验签名，合法时返回会话 id
    fn verify(&self, value: &str) -> Option<String> {
        let (id, sig) = value.split_once('.')?;
        let sig = hex::decode(sig).ok()?;
        hmac::verify(&self.key, id.as_bytes(), &sig).ok()?;
        Some(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_handle() -> SessionHandle {
        Arc::new(Mutex::new(Session::default()))
    }

    #[test]
    fn test_lookup_without_persist_stores_nothing() {
        let store = SessionStore::new("test-secret");
        assert!(store.lookup("no-signature-here").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_persist_then_lookup_roundtrip() {
        let store = SessionStore::new("test-secret");
        let handle = fresh_handle();
        handle.blocking_lock().identity = Some(Identity {
            id: 3,
            username: "alice".into(),
        });

        let value = store.persist(handle);
        assert!(value.contains('.'));
        assert_eq!(store.len(), 1);

        let found = store.lookup(&value).unwrap();
        assert_eq!(
            found.blocking_lock().identity.as_ref().map(|i| i.id),
            Some(3)
        );
    }

    #[test]
    fn test_tampered_cookie_rejected() {
        let store = SessionStore::new("test-secret");
        let value = store.persist(fresh_handle());

        // 换掉会话 id 但保留原签名
        let sig = value.split_once('.').unwrap().1;
        let forged = format!("{}.{}", uuid::Uuid::new_v4(), sig);

        assert!(store.lookup(&forged).is_none());
        // 查找失败不会产生新条目
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_different_secret_invalidates() {
        let store_a = SessionStore::new("secret-a");
        let store_b = SessionStore::new("secret-b");
        let value = store_a.persist(fresh_handle());
        assert!(store_b.lookup(&value).is_none());
    }

    #[test]
    fn test_evict_idle_reclaims_sessions() {
        let store = SessionStore::new("test-secret");
        let value = store.persist(fresh_handle());
        store.persist(fresh_handle());
        assert_eq!(store.len(), 2);

        // TTL 足够长时全部保留
        assert_eq!(store.evict_idle(Duration::from_secs(3600)), 0);
        assert_eq!(store.len(), 2);

        // 空闲 >= TTL 即回收；TTL 为零等价于全部回收
        assert_eq!(store.evict_idle(Duration::ZERO), 2);
        assert!(store.is_empty());
        assert!(store.lookup(&value).is_none());
    }
}
