//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities. The backing store assigns
//! ids (BIGSERIAL), so these wrap `i64` and are only constructed from
//! values the store returned.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type ProductId = Id<markers::Product>;
/// let id = ProductId::from_i64(42);
/// assert_eq!(id.as_i64(), 42);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Create from a store-assigned row id
    pub const fn from_i64(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying numeric id
    pub const fn as_i64(&self) -> i64 {
        self.value
    }
}

// Manual impls: derives would put bounds on the marker type, which is
// never instantiated and implements nothing.

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for Product IDs
    pub struct Product;

    /// Marker for Category IDs
    pub struct Category;

    /// Marker for CartItem IDs
    pub struct CartItem;

    /// Marker for Order IDs
    pub struct Order;

    /// Marker for Message IDs
    pub struct Message;
}

/// Type aliases for common IDs
pub type ProductId = Id<markers::Product>;
pub type CategoryId = Id<markers::Category>;
pub type CartItemId = Id<markers::CartItem>;
pub type OrderId = Id<markers::Order>;
pub type MessageId = Id<markers::Message>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let product_id: ProductId = Id::from_i64(1);
        let order_id: OrderId = Id::from_i64(1);

        // These are different types, cannot be mixed
        let _p: i64 = product_id.into();
        let _o: i64 = order_id.into();
    }

    #[test]
    fn test_id_equality_and_copy() {
        let a: ProductId = Id::from_i64(7);
        let b = a;
        assert_eq!(a, b);
        assert_ne!(a, Id::from_i64(8));
    }

    #[test]
    fn test_id_roundtrip() {
        let id: ProductId = Id::from_i64(99);
        assert_eq!(id.as_i64(), 99);
        assert_eq!(id.to_string(), "99");
        assert_eq!(format!("{:?}", id), "Id(99)");
    }
}
