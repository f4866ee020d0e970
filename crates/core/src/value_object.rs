//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances holding the same values
/// are equal. They are immutable once constructed, so a value object that
/// exists has already passed its validation rules.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct EmailAddress(String);
///
/// impl ValueObject for EmailAddress {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
