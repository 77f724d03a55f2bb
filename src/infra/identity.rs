//! Best-effort caller identity from a public IP lookup service.
//!
//! The lookup answers `{ "ip": "..." }`. Any failure is logged and replaced by
//! a random `anonymous-*` identity; resolution itself never fails.

use crate::domain::identity::Identity;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Identity resolution failed: {0}")]
    ResolutionFailed(String),
}

/// Source of the caller's public address.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn lookup(&self) -> Result<String, IdentityError>;
}

#[derive(Deserialize)]
struct LookupResponse {
    ip: String,
}

/// Queries an ipify-style HTTP endpoint.
pub struct HttpAddressLookup {
    client: reqwest::Client,
    url: String,
}

impl HttpAddressLookup {
    pub fn new(url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl AddressLookup for HttpAddressLookup {
    async fn lookup(&self) -> Result<String, IdentityError> {
        let failed = |e: reqwest::Error| IdentityError::ResolutionFailed(e.to_string());

        let body: LookupResponse = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(failed)?
            .error_for_status()
            .map_err(failed)?
            .json::<LookupResponse>()
            .await
            .map_err(failed)?;

        let ip = body.ip.trim();
        if ip.is_empty() {
            return Err(IdentityError::ResolutionFailed(
                "lookup returned an empty ip".to_string(),
            ));
        }
        Ok(ip.to_string())
    }
}

#[derive(Clone)]
pub struct IdentityResolver {
    lookup: Arc<dyn AddressLookup>,
}

impl IdentityResolver {
    pub fn new(lookup: Arc<dyn AddressLookup>) -> Self {
        Self { lookup }
    }

    /// Resolver backed by [`HttpAddressLookup`].
    pub fn http(url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self::new(Arc::new(HttpAddressLookup::new(url, timeout)?)))
    }

    pub async fn resolve(&self) -> Identity {
        match self.lookup.lookup().await {
            Ok(ip) => {
                info!("Resolved caller identity from address lookup");
                Identity::new(ip)
            }
            Err(e) => {
                let fallback = Identity::fallback();
                warn!("{}; using fallback identity {}", e, fallback);
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLookup(&'static str);

    #[async_trait]
    impl AddressLookup for FixedLookup {
        async fn lookup(&self) -> Result<String, IdentityError> {
            Ok(self.0.to_string())
        }
    }

    struct NetworkDown;

    #[async_trait]
    impl AddressLookup for NetworkDown {
        async fn lookup(&self) -> Result<String, IdentityError> {
            Err(IdentityError::ResolutionFailed("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn uses_looked_up_address() {
        let resolver = IdentityResolver::new(Arc::new(FixedLookup("1.2.3.4")));
        let identity = resolver.resolve().await;
        assert_eq!(identity.as_str(), "1.2.3.4");
        assert!(!identity.is_fallback());
    }

    #[tokio::test]
    async fn network_error_falls_back_to_anonymous() {
        let resolver = IdentityResolver::new(Arc::new(NetworkDown));
        let identity = resolver.resolve().await;
        assert!(identity.as_str().starts_with("anonymous-"));
        assert!(identity.is_fallback());
    }

    /// Serves `body` at `/` on an ephemeral port and returns its URL.
    async fn stub_lookup_service(status: u16, body: &'static str) -> String {
        use axum::http::StatusCode;
        use axum::routing::get;

        let status = StatusCode::from_u16(status).unwrap();
        let app = axum::Router::new().route("/", get(move || async move { (status, body) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://127.0.0.1:{}/", port)
    }

    #[tokio::test]
    async fn http_lookup_reads_ip_field() {
        let url = stub_lookup_service(200, r#"{"ip":" 5.6.7.8 "}"#).await;
        let lookup = HttpAddressLookup::new(url, Duration::from_secs(2)).unwrap();
        assert_eq!(lookup.lookup().await.unwrap(), "5.6.7.8");
    }

    #[tokio::test]
    async fn malformed_or_failed_responses_fall_back() {
        for (status, body) in [
            (200, r#"{"address":"5.6.7.8"}"#),
            (200, "not json"),
            (200, r#"{"ip":""}"#),
            (503, r#"{"ip":"5.6.7.8"}"#),
        ] {
            let url = stub_lookup_service(status, body).await;
            let resolver = IdentityResolver::http(url, Duration::from_secs(2)).unwrap();
            let identity = resolver.resolve().await;
            assert!(identity.is_fallback(), "status {} body {}", status, body);
        }
    }

    #[tokio::test]
    async fn unreachable_http_endpoint_falls_back() {
        // Port 9 (discard) on loopback is closed in test environments.
        let resolver =
            IdentityResolver::http("http://127.0.0.1:9/", Duration::from_millis(500)).unwrap();
        let identity = resolver.resolve().await;
        assert!(identity.is_fallback());
    }
}
