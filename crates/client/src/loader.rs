//! Catalog loaders: where the product collection comes from.

use async_trait::async_trait;
use reqwest::header::ACCEPT;

use storefront_products::Product;

use crate::config::ClientConfig;
use crate::dto::decode_catalog;
use crate::error::LoadError;

/// Source of the full product catalog.
#[async_trait]
pub trait CatalogLoader: Send + Sync {
    async fn load(&self) -> Result<Vec<Product>, LoadError>;
}

/// Fetches the catalog with a single `GET` against the storefront API.
#[derive(Debug, Clone)]
pub struct HttpCatalogLoader {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogLoader {
    pub fn new(config: &ClientConfig) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            url: config.products_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogLoader for HttpCatalogLoader {
    async fn load(&self) -> Result<Vec<Product>, LoadError> {
        tracing::debug!(url = %self.url, "fetching catalog");

        let resp = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = match resp.text().await {
                Ok(body) => body,
                Err(err) => {
                    tracing::debug!(url = %self.url, error = %err, "could not read error body");
                    String::new()
                }
            };
            return Err(LoadError::Api(status.as_u16(), body));
        }

        let body = resp.bytes().await?;
        let products = decode_catalog(&body)?;

        tracing::info!(url = %self.url, products = products.len(), "catalog fetched");
        Ok(products)
    }
}

/// Serves a fixed catalog. Useful for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogLoader {
    products: Vec<Product>,
}

impl StaticCatalogLoader {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CatalogLoader for StaticCatalogLoader {
    async fn load(&self) -> Result<Vec<Product>, LoadError> {
        Ok(self.products.clone())
    }
}
