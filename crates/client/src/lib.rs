//! `storefront-client`
//!
//! **Responsibility:** fetch the product catalog from the storefront API and
//! hand it to a [`StorefrontSession`].
//!
//! The session and the filter engine never see HTTP; this crate is the only
//! place that knows about URLs, status codes and the `{"data": [...]}` envelope.

pub mod config;
pub mod dto;
pub mod error;
pub mod loader;

pub use config::{ClientConfig, ConfigError};
pub use dto::{decode_catalog, ProductDto, ProductsEnvelope, WirePrice};
pub use error::LoadError;
pub use loader::{CatalogLoader, HttpCatalogLoader, StaticCatalogLoader};

use chrono::Utc;
use storefront_products::StorefrontSession;

/// Message shown to the user when the catalog cannot be loaded.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch products";

/// Run one load cycle: mark the session loading, fetch, then install the
/// catalog or record the failure.
pub async fn refresh<L>(session: &mut StorefrontSession, loader: &L) -> Result<(), LoadError>
where
    L: CatalogLoader + ?Sized,
{
    session.begin_load().map_err(LoadError::Rejected)?;

    let products = match loader.load().await {
        Ok(products) => products,
        Err(err) => {
            tracing::warn!(error = %err, "catalog fetch failed");
            session.fail_load(FETCH_FAILED_MESSAGE);
            return Err(err);
        }
    };

    if let Err(err) = session.complete_load(products, Utc::now()) {
        tracing::warn!(error = %err, "catalog rejected");
        session.fail_load(FETCH_FAILED_MESSAGE);
        return Err(LoadError::Rejected(err));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{DomainError, ProductId};
    use storefront_products::{FilterCriteria, LoadState, Product};

    fn product(id: u64, name: &str, category: &str, price: f64) -> Product {
        Product::new(ProductId::Numeric(id), name, category, price).unwrap()
    }

    struct FailingLoader;

    #[async_trait::async_trait]
    impl CatalogLoader for FailingLoader {
        async fn load(&self) -> Result<Vec<Product>, LoadError> {
            Err(LoadError::Network("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn refresh_installs_catalog() {
        let loader = StaticCatalogLoader::new(vec![
            product(1, "Red Shirt", "Apparel", 20.0),
            product(2, "Blue Mug", "Kitchen", 8.0),
        ]);
        let mut session = StorefrontSession::new();

        refresh(&mut session, &loader).await.unwrap();

        assert!(session.is_ready());
        assert_eq!(session.visible().len(), 2);
        let visible = session
            .apply(FilterCriteria::from_inputs("", ["Apparel"], "10", ""))
            .unwrap();
        assert_eq!(visible.len(), 1);
    }

    #[tokio::test]
    async fn refresh_records_failure_message() {
        let mut session = StorefrontSession::new();

        let err = refresh(&mut session, &FailingLoader).await.unwrap_err();

        assert!(matches!(err, LoadError::Network(_)));
        assert_eq!(
            session.state(),
            &LoadState::Failed {
                message: FETCH_FAILED_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn refresh_rejects_duplicate_ids() {
        let loader = StaticCatalogLoader::new(vec![
            product(1, "A", "x", 1.0),
            product(1, "B", "x", 1.0),
        ]);
        let mut session = StorefrontSession::new();

        let err = refresh(&mut session, &loader).await.unwrap_err();

        assert!(matches!(err, LoadError::Rejected(DomainError::InvariantViolation(_))));
        assert!(!session.is_ready());
    }

    #[tokio::test]
    async fn refresh_refuses_overlapping_load() {
        let mut session = StorefrontSession::new();
        session.begin_load().unwrap();

        let err = refresh(&mut session, &StaticCatalogLoader::new(Vec::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::Rejected(DomainError::Conflict(_))));
        assert_eq!(session.state(), &LoadState::Loading);
    }

    #[tokio::test]
    async fn retry_after_failure_succeeds() {
        let mut session = StorefrontSession::new();
        let _ = refresh(&mut session, &FailingLoader).await;

        let loader = StaticCatalogLoader::new(vec![product(3, "Lamp", "Home", 35.0)]);
        refresh(&mut session, &loader).await.unwrap();

        assert!(session.is_ready());
        assert_eq!(session.categories().len(), 1);
    }
}
