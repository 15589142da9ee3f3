//! Wire shapes of the `GET /api/products` response.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ProductId};
use storefront_products::Product;

use crate::error::LoadError;

/// Response envelope: `{"data": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsEnvelope {
    pub data: Vec<ProductDto>,
}

/// One product record as the API sends it. Unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: WirePrice,
}

/// Price as a JSON number or as a decimal string (`"19.99"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WirePrice {
    Number(f64),
    Text(String),
}

impl WirePrice {
    pub fn to_amount(&self) -> DomainResult<f64> {
        match self {
            WirePrice::Number(n) => Ok(*n),
            WirePrice::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| DomainError::validation(format!("price is not a number: {s:?}"))),
        }
    }
}

impl TryFrom<ProductDto> for Product {
    type Error = DomainError;

    fn try_from(dto: ProductDto) -> Result<Self, Self::Error> {
        let price = dto.price.to_amount()?;
        Product::new(dto.id, dto.name, dto.category, price)
    }
}

/// Decode a response body into products, in response order.
///
/// One bad record fails the whole catalog.
pub fn decode_catalog(body: &[u8]) -> Result<Vec<Product>, LoadError> {
    let envelope: ProductsEnvelope =
        serde_json::from_slice(body).map_err(|e| LoadError::Parse(e.to_string()))?;

    envelope
        .data
        .into_iter()
        .enumerate()
        .map(|(index, dto)| {
            Product::try_from(dto).map_err(|source| LoadError::InvalidRecord { index, source })
        })
        .collect()
}
