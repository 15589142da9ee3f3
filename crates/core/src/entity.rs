//! Things the storefront tracks by identity rather than by value.

/// A domain object identified by its id.
///
/// Two products with the same `ProductId` are the same product, even if their
/// other fields were read at different times.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
