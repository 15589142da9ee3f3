//! Products domain module: catalog storage and client-side filtering.
//!
//! This crate is deterministic domain logic only (no IO, no HTTP, no rendering).
//! The loader that fills the catalog lives in `storefront-client`.

pub mod catalog;
pub mod filter;
pub mod product;
pub mod session;

pub use catalog::{derive_categories, CatalogStore};
pub use filter::{apply, matching_positions, FilterCriteria, PriceBound};
pub use product::{Price, Product};
pub use session::{LoadState, StorefrontSession, VisibleIter, VisibleSet};
pub use storefront_core::ProductId;
