/// Identity provider seam
///
/// Sign-in and sign-out flows belong to the external identity provider;
/// the core only needs to know who (if anyone) is currently signed in so
/// it can resolve the per-user namespace.

/// Profile of the currently signed-in user
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    /// Stable user identifier from the identity provider
    pub id: String,
    /// Display name for the presentation layer
    pub display_name: String,
    /// Avatar URL, if the provider has one
    pub photo_url: Option<String>,
}

/// Source of the current authentication state
pub trait IdentityProvider {
    /// The signed-in user, or None when signed out
    fn current_user(&self) -> Option<UserProfile>;
}

/// Fixed identity, for tests and for the shared-namespace variant where
/// no sign-in is required.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user: Option<UserProfile>,
}

impl StaticIdentity {
    pub fn signed_in(id: &str, display_name: &str) -> Self {
        Self {
            user: Some(UserProfile {
                id: id.to_string(),
                display_name: display_name.to_string(),
                photo_url: None,
            }),
        }
    }

    pub fn signed_out() -> Self {
        Self { user: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<UserProfile> {
        self.user.clone()
    }
}
