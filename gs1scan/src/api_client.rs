//! HTTP client for the scan backend API
//!
//! This module provides JSON access to the partner and product endpoints of
//! the backend. Only available when the "http" feature is enabled.

#[cfg(feature = "http")]
pub mod http_impl {
    use async_trait::async_trait;
    use log::{debug, warn};
    use reqwest::header::CONTENT_TYPE;
    use reqwest::{Client, Method, StatusCode};
    use serde::de::DeserializeOwned;
    use serde_json::{json, Value};

    use crate::config::ApiConfig;
    use crate::partners::{Partner, PartnerRole};
    use crate::products::Product;
    use crate::store::RecordStore;
    use crate::{Error, Result};

    /// Header carrying the API key
    pub const API_KEY_HEADER: &str = "X-API-Key";

    /// Message used when an error response has no JSON body
    const UNKNOWN_ERROR: &str = "Unknown error";

    /// Message used when an error body has no `error` field
    const REQUEST_FAILED: &str = "Request failed";

    /// JSON client for the backend REST API
    #[derive(Debug, Clone)]
    pub struct ApiClient {
        client: Client,
        config: ApiConfig,
    }

    impl ApiClient {
        /// Create a client for the configured backend
        pub fn new(config: ApiConfig) -> Result<Self> {
            let client = Client::builder()
                .timeout(config.timeout)
                .build()
                .map_err(|e| Error::Config(e.to_string()))?;

            Ok(Self { client, config })
        }

        /// Create a client from `GS1SCAN_API_URL` / `GS1SCAN_API_KEY`
        pub fn from_env() -> Result<Self> {
            Self::new(ApiConfig::from_env())
        }

        /// Active configuration
        pub fn config(&self) -> &ApiConfig {
            &self.config
        }

        /// Send one JSON request
        ///
        /// Returns `Ok(None)` for `204 No Content`. Non-success statuses map to
        /// [`Error::Api`] with the body's `error` message; transport and body
        /// decoding failures map to [`Error::Network`].
        pub async fn request(
            &self,
            endpoint: &str,
            method: Method,
            body: Option<&Value>,
        ) -> Result<Option<Value>> {
            let url = self.config.endpoint_url(endpoint);
            debug!("{method} {url}");

            let mut builder = self
                .client
                .request(method, &url)
                .header(CONTENT_TYPE, "application/json")
                .header(API_KEY_HEADER, &self.config.api_key);
            if let Some(body) = body {
                builder = builder.body(body.to_string());
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Error::Network(e.to_string()))?;
            let status = response.status();

            if !status.is_success() {
                let message = match response.json::<Value>().await {
                    Ok(body) => body
                        .get("error")
                        .and_then(Value::as_str)
                        .filter(|msg| !msg.is_empty())
                        .unwrap_or(REQUEST_FAILED)
                        .to_string(),
                    Err(_) => UNKNOWN_ERROR.to_string(),
                };
                warn!("{url} answered {status}: {message}");
                return Err(Error::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            if status == StatusCode::NO_CONTENT {
                return Ok(None);
            }

            let value = response
                .json::<Value>()
                .await
                .map_err(|e| Error::Network(e.to_string()))?;
            Ok(Some(value))
        }

        /// GET an endpoint and deserialize its body; an empty body becomes the default
        async fn get_json<T: DeserializeOwned + Default>(&self, endpoint: &str) -> Result<T> {
            match self.request(endpoint, Method::GET, None).await? {
                Some(value) => Ok(serde_json::from_value(value)?),
                None => Ok(T::default()),
            }
        }

        /// List all partners
        pub async fn get_partners(&self) -> Result<Vec<Partner>> {
            self.get_json("/api/partners").await
        }

        /// Add or update the partner for `(role, gln)`
        pub async fn add_partner(&self, role: PartnerRole, name: &str, gln: &str) -> Result<Option<Value>> {
            let body = json!({ "role": role, "name": name, "gln": gln });
            self.request("/api/partners", Method::POST, Some(&body)).await
        }

        /// Delete a partner by id
        pub async fn delete_partner(&self, id: u64) -> Result<Option<Value>> {
            self.request(&format!("/api/partners/{id}"), Method::DELETE, None)
                .await
        }

        /// List all products
        pub async fn get_products(&self) -> Result<Vec<Product>> {
            self.get_json("/api/products").await
        }

        /// Fetch one product; a 404 is reported as `None`
        pub async fn get_product_by_gtin(&self, gtin: &str) -> Result<Option<Product>> {
            match self
                .request(&format!("/api/products/{gtin}"), Method::GET, None)
                .await
            {
                Ok(Some(value)) => Ok(Some(serde_json::from_value(value)?)),
                Ok(None) => Ok(None),
                Err(e) if e.status() == StatusCode::NOT_FOUND.as_u16() => Ok(None),
                Err(e) => Err(e),
            }
        }

        /// Add or update the product for its GTIN
        pub async fn add_product(&self, product: &Product) -> Result<Option<Value>> {
            let body = serde_json::to_value(product)?;
            self.request("/api/products", Method::POST, Some(&body)).await
        }

        /// Delete a product by GTIN
        pub async fn delete_product(&self, gtin: &str) -> Result<Option<Value>> {
            self.request(&format!("/api/products/{gtin}"), Method::DELETE, None)
                .await
        }
    }

    #[async_trait]
    impl RecordStore<Partner> for ApiClient {
        async fn list(&self) -> Result<Vec<Partner>> {
            self.get_partners().await
        }

        async fn upsert(&self, partner: Partner) -> Result<()> {
            self.add_partner(partner.role, &partner.name, &partner.gln)
                .await
                .map(|_| ())
        }

        async fn delete(&self, id: &u64) -> Result<bool> {
            match self.delete_partner(*id).await {
                Ok(_) => Ok(true),
                Err(e) if e.status() == StatusCode::NOT_FOUND.as_u16() => Ok(false),
                Err(e) => Err(e),
            }
        }

        /// The API has no single-partner endpoint; this scans the list
        async fn get_by_key(&self, id: &u64) -> Result<Option<Partner>> {
            Ok(self
                .get_partners()
                .await?
                .into_iter()
                .find(|p| p.id == Some(*id)))
        }
    }

    #[async_trait]
    impl RecordStore<Product> for ApiClient {
        async fn list(&self) -> Result<Vec<Product>> {
            self.get_products().await
        }

        async fn upsert(&self, product: Product) -> Result<()> {
            self.add_product(&product).await.map(|_| ())
        }

        async fn delete(&self, gtin: &String) -> Result<bool> {
            match self.delete_product(gtin).await {
                Ok(_) => Ok(true),
                Err(e) if e.status() == StatusCode::NOT_FOUND.as_u16() => Ok(false),
                Err(e) => Err(e),
            }
        }

        async fn get_by_key(&self, gtin: &String) -> Result<Option<Product>> {
            self.get_product_by_gtin(gtin).await
        }
    }

}

#[cfg(feature = "http")]
pub use http_impl::*;

#[cfg(not(feature = "http"))]
pub mod http_stub {
    use crate::config::ApiConfig;
    use crate::{Error, Result};

    pub struct ApiClient;

    impl ApiClient {
        pub fn new(_config: ApiConfig) -> Result<Self> {
            Err(Error::Config(
                "HTTP support not enabled. Build with --features http".to_string(),
            ))
        }
    }
}

#[cfg(not(feature = "http"))]
pub use http_stub::*;
