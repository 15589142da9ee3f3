//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. They are defined entirely by their
//! attribute values, so two value objects with the same values are equal.

/// Marker trait for value objects.
///
/// - **Value Object**: no identity (a `Price` of 20.0 equals any other `Price` of 20.0)
/// - **Entity**: has identity (two products with the same `ProductId` are the same product)
///
/// Value objects are immutable. To "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Price(f64);
///
/// impl ValueObject for Price {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
