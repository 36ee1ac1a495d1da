use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use shavukha_common::config::{ShopConfig};
use shavukha_common::error::{CatalogError, ConfigError, OrderError};
use shavukha_common::order::OrderRequest;
use shavukha_common::product::Catalog;

/// The two remote calls the app makes.
#[allow(async_fn_in_trait)]
pub trait ShopApi {
    /// `GET /api/products` on the product service.
    async fn fetch_catalog(&self) -> Result<Catalog, CatalogError>;

    /// `POST /api/web-data` on the order service. On a 2xx answer the body is
    /// parsed as JSON and returned as-is.
    async fn post_order(&self, request: &OrderRequest) -> Result<serde_json::Value, OrderError>;
}

/// `ShopApi` over plain HTTP. No retries, no timeouts beyond the platform's.
#[derive(Debug, Clone)]
pub struct HttpShopApi {
    client: reqwest::Client,
    catalog_url: Url,
    order_url: Url,
}

impl HttpShopApi {
    pub fn new(config: &ShopConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: reqwest::Client::new(),
            catalog_url: config.catalog_url()?,
            order_url: config.order_url()?,
        })
    }

    /// Client for the production endpoints.
    pub fn production() -> Result<Self, ConfigError> {
        Self::new(&ShopConfig::default())
    }

    pub fn catalog_url(&self) -> &Url {
        &self.catalog_url
    }

    pub fn order_url(&self) -> &Url {
        &self.order_url
    }
}

impl ShopApi for HttpShopApi {
    async fn fetch_catalog(&self) -> Result<Catalog, CatalogError> {
        let resp = self
            .client
            .get(self.catalog_url.clone())
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        Catalog::from_json(&body).map_err(|e| CatalogError::Decode(e.to_string()))
    }

    async fn post_order(&self, request: &OrderRequest) -> Result<serde_json::Value, OrderError> {
        let body = request.to_json()?;
        let resp = self
            .client
            .post(self.order_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| OrderError::Transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| OrderError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(OrderError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| OrderError::Decode(e.to_string()))
    }
}
