//! Storefront session: owns the catalog, the active criteria and the visible set.
//!
//! Every criteria change re-filters the *full* catalog, so relaxing a filter
//! always brings previously hidden products back.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use storefront_core::{DomainError, DomainResult};

use crate::catalog::CatalogStore;
use crate::filter::{self, FilterCriteria};
use crate::product::Product;

/// Lifecycle of the catalog load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet.
    Idle,
    /// A load is outstanding; filtering is not possible.
    Loading,
    Ready {
        loaded_at: DateTime<Utc>,
        product_count: usize,
    },
    Failed {
        message: String,
    },
}

/// Products currently shown, in catalog order.
#[derive(Debug, Clone, Copy)]
pub struct VisibleSet<'a> {
    catalog: &'a [Product],
    positions: &'a [usize],
}

impl<'a> VisibleSet<'a> {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> VisibleIter<'a> {
        VisibleIter {
            catalog: self.catalog,
            positions: self.positions.iter(),
        }
    }

    pub fn to_vec(&self) -> Vec<&'a Product> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for VisibleSet<'a> {
    type Item = &'a Product;
    type IntoIter = VisibleIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct VisibleIter<'a> {
    catalog: &'a [Product],
    positions: std::slice::Iter<'a, usize>,
}

impl<'a> Iterator for VisibleIter<'a> {
    type Item = &'a Product;

    fn next(&mut self) -> Option<Self::Item> {
        self.positions.next().map(|&idx| &self.catalog[idx])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl ExactSizeIterator for VisibleIter<'_> {}

#[derive(Debug, Clone)]
pub struct StorefrontSession {
    state: LoadState,
    catalog: CatalogStore,
    criteria: FilterCriteria,
    visible: Vec<usize>,
}

impl Default for StorefrontSession {
    fn default() -> Self {
        Self::new()
    }
}

impl StorefrontSession {
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            catalog: CatalogStore::new(),
            criteria: FilterCriteria::default(),
            visible: Vec::new(),
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready { .. })
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        self.catalog.categories()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn visible(&self) -> VisibleSet<'_> {
        VisibleSet {
            catalog: self.catalog.products(),
            positions: &self.visible,
        }
    }

    /// Mark a load as outstanding. Only one load may be in flight.
    pub fn begin_load(&mut self) -> DomainResult<()> {
        if self.state == LoadState::Loading {
            return Err(DomainError::conflict("catalog load already in progress"));
        }
        self.state = LoadState::Loading;
        Ok(())
    }

    /// Install a freshly loaded catalog and reset all filters.
    pub fn complete_load(
        &mut self,
        products: Vec<Product>,
        loaded_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.catalog.load(products)?;
        self.criteria = FilterCriteria::default();
        self.visible = (0..self.catalog.len()).collect();
        self.state = LoadState::Ready {
            loaded_at,
            product_count: self.catalog.len(),
        };

        tracing::info!(products = self.catalog.len(), "storefront catalog ready");
        Ok(())
    }

    /// Record a failed load. The previous catalog, if any, is left as it was.
    pub fn fail_load(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "storefront catalog load failed");
        self.state = LoadState::Failed { message };
    }

    /// Re-filter the full catalog with `criteria` and replace the visible set.
    pub fn apply(&mut self, criteria: FilterCriteria) -> DomainResult<VisibleSet<'_>> {
        self.ensure_ready()?;

        self.visible = filter::matching_positions(self.catalog.products(), &criteria);
        self.criteria = criteria;

        tracing::debug!(
            catalog = self.catalog.len(),
            visible = self.visible.len(),
            search = %self.criteria.search_term,
            categories = self.criteria.selected_categories.len(),
            "filters applied"
        );
        Ok(self.visible())
    }

    pub fn clear_filters(&mut self) -> DomainResult<VisibleSet<'_>> {
        self.apply(FilterCriteria::default())
    }

    fn ensure_ready(&self) -> DomainResult<()> {
        match &self.state {
            LoadState::Ready { .. } => Ok(()),
            LoadState::Idle => Err(DomainError::invariant("catalog has not been loaded")),
            LoadState::Loading => Err(DomainError::invariant("catalog load is still in progress")),
            LoadState::Failed { message } => Err(DomainError::invariant(format!(
                "catalog load failed: {message}"
            ))),
        }
    }
}
