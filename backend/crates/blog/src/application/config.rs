//! Application Configuration
//!
//! Configuration for the Blog application layer.

/// Which posts the anonymous index shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingPolicy {
    /// Every post, public flag ignored
    #[default]
    All,
    /// Only posts flagged public
    PublicOnly,
}

/// Whether authenticated users are limited to their own posts
///
/// Applies to authenticated contexts only; anonymous routes are left as
/// they are exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnershipPolicy {
    /// Any verified user may view, edit or delete any post by id
    #[default]
    Unchecked,
    /// Viewing, editing or deleting someone else's post is `NotOwner`
    OwnerOnly,
}

/// Blog application configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct BlogConfig {
    pub listing_policy: ListingPolicy,
    pub ownership_policy: OwnershipPolicy,
}
