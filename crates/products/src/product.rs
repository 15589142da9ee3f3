use serde::Serialize;

use storefront_core::{DomainError, DomainResult, Entity, ProductId, ValueObject};

/// Non-negative, finite product price.
///
/// Stored as the API reports it (major currency units, e.g. `19.99`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub fn new(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if amount < 0.0 {
            return Err(DomainError::validation(format!(
                "price cannot be negative (got {amount})"
            )));
        }
        Ok(Self(amount))
    }

    pub fn amount(self) -> f64 {
        self.0
    }
}

impl ValueObject for Price {}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A catalog entry. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    category: String,
    price: Price,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> DomainResult<Self> {
        id.validate()?;
        let price = Price::new(price)?;

        Ok(Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
        })
    }

    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> Price {
        self.price
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
