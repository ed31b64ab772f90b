//! 用户存储 - 内存实现
//!
//! 用户记录只存 Argon2 哈希，明文密码从不落地。存储按用户名索引，
//! 注册时的唯一性检查和插入在同一个写锁内完成。

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use parking_lot::RwLock;
use shared::Identity;

pub struct AppState {
    pub users: UserStore,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            users: UserStore::new(),
        }
    }
}

struct UserRecord {
    id: i64,
    password_hash: String,
}

/// 注册失败的原因
#[derive(Debug, PartialEq, Eq)]
pub enum RegisterError {
    /// 用户名已被占用
    Exists,
    /// 哈希计算失败 (极少见)
    Hash,
}

pub struct UserStore {
    users: RwLock<HashMap<String, UserRecord>>,
    next_id: AtomicI64,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// 注册新用户，返回其身份
    pub fn register(&self, username: &str, password: &str) -> Result<Identity, RegisterError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| RegisterError::Hash)?
            .to_string();

        let mut users = self.users.write();
        if users.contains_key(username) {
            return Err(RegisterError::Exists);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        users.insert(
            username.to_string(),
            UserRecord {
                id,
                password_hash: hash,
            },
        );

        Ok(Identity {
            id,
            username: username.to_string(),
        })
    }

    /// 校验凭证；用户不存在或密码不对都返回 None，不区分原因
    pub fn authenticate(&self, username: &str, password: &str) -> Option<Identity> {
        let users = self.users.read();
        let record = users.get(username)?;
        let parsed = PasswordHash::new(&record.password_hash).ok()?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .ok()?;
        Some(Identity {
            id: record.id,
            username: username.to_string(),
        })
    }

    /// 所有用户的身份列表 (不含任何凭证材料)
    pub fn list(&self) -> Vec<Identity> {
        let mut users: Vec<Identity> = self
            .users
            .read()
            .iter()
            .map(|(username, record)| Identity {
                id: record.id,
                username: username.clone(),
            })
            .collect();
        users.sort_by_key(|u| u.id);
        users
    }
}
