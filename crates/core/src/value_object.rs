//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: an `Ean13`
/// holding `"4006381333931"` is the same EAN wherever it appears, and the
/// metadata attached to an order is defined entirely by its three fields.
///
/// ## Design Constraints
///
/// - **Clone**: value objects are values, copy them freely
/// - **PartialEq**: compared by their attribute values
/// - **Debug**: helpful for logging and tests
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
