//! Identity Model

use serde::{Deserialize, Serialize};

/// Opaque identity returned by auth-service on register/login
///
/// The gateway receives this once per login and keeps it in the session for
/// the session's lifetime. It is never mutated by the gateway, and it is the
/// sole source of the `user_id` used at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub username: String,
}
