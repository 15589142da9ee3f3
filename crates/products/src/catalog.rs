//! Catalog Store: the authoritative, replace-only product collection.

use std::collections::{BTreeSet, HashSet};

use storefront_core::{DomainError, DomainResult, ProductId};

use crate::product::Product;

/// Distinct category labels of `products`, in lexicographic order.
pub fn derive_categories(products: &[Product]) -> BTreeSet<String> {
    products.iter().map(|p| p.category().to_string()).collect()
}

/// Holds the full, unfiltered catalog in API response order.
///
/// The category vocabulary is derived on every `load` and cached until the
/// next one; there is no other way to change the contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogStore {
    products: Vec<Product>,
    categories: BTreeSet<String>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole catalog.
    ///
    /// Fails without touching the current contents if two products share an id.
    pub fn load(&mut self, products: Vec<Product>) -> DomainResult<()> {
        let mut seen: HashSet<&ProductId> = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id_typed()) {
                return Err(DomainError::invariant(format!(
                    "duplicate product id in catalog: {}",
                    product.id_typed()
                )));
            }
        }

        self.categories = derive_categories(&products);
        self.products = products;

        tracing::debug!(
            products = self.products.len(),
            categories = self.categories.len(),
            "catalog loaded"
        );
        Ok(())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id_typed() == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
