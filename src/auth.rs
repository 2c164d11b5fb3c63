//! Auth gateway client.
//!
//! Teacher sessions are issued by an external service; this backend only
//! forwards login/register calls and relays the reply. The token is an
//! opaque bearer credential to everything else in the crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use crate::error::{Error, Result};

#[derive(Debug, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "confirmPassword")]
    pub confirm_password: String,
}

/// Status and body as returned by the upstream, relayed verbatim.
#[derive(Debug)]
pub struct GatewayReply {
    pub status: u16,
    pub body: Value,
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<GatewayReply>;
    async fn register(&self, profile: &RegisterProfile) -> Result<GatewayReply>;
}

/// Forwards auth calls to the configured upstream over HTTP.
pub struct HttpAuthGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAuthGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn forward(&self, path: &str, body: &Value) -> Result<GatewayReply> {
        let url = format!("{}/{path}", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Gateway(format!("request to {url} failed: {e}")))?;
        let status = response.status().as_u16();
        let body = response.json::<Value>().await.unwrap_or_else(|e| {
            warn!("auth gateway returned a non-JSON body: {e}");
            json!({})
        });
        Ok(GatewayReply { status, body })
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, credentials: &Credentials) -> Result<GatewayReply> {
        self.forward("auth/login", &serde_json::to_value(credentials)?)
            .await
    }

    async fn register(&self, profile: &RegisterProfile) -> Result<GatewayReply> {
        self.forward("auth/register", &serde_json::to_value(profile)?)
            .await
    }
}
