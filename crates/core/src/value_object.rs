//! Value object trait: equality by value, not identity.
//!
//! Money amounts, exchange rates and bank references carry no identity of
//! their own; two of them with the same value are interchangeable.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. Constructors are the only place their invariants are
/// checked, so a value that exists is a valid value.
///
/// ```ignore
/// let a = Amount::new(dec!(100))?;
/// let b = Amount::new(dec!(100.00))?;
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
