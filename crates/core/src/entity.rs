//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// A user record keeps its identifier across updates; everything else about
/// it may be replaced.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
