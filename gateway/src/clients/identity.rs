//! Identity service client (auth-service)

use std::time::Duration;

use serde::Serialize;
use shared::Identity;

use super::{ClientResult, HttpClient};

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Typed wrapper over auth-service
///
/// Credential verification itself is opaque to the gateway: it sends the
/// credentials once and receives an [`Identity`] back (or a rejection).
#[derive(Debug, Clone)]
pub struct IdentityClient {
    inner: HttpClient,
}

impl IdentityClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            inner: HttpClient::new(http, base_url, timeout),
        }
    }

    /// POST /register - 创建用户并返回身份
    pub async fn register(&self, username: &str, password: &str) -> ClientResult<Identity> {
        self.inner
            .post_json("/register", &CredentialsRequest { username, password })
            .await
    }

    /// POST /login - 校验凭证并返回身份
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Identity> {
        self.inner
            .post_json("/login", &CredentialsRequest { username, password })
            .await
    }
}
