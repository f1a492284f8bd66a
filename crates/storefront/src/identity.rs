//! Interface to the external identity provider.
//!
//! Authentication itself (sign-up, sign-in, token refresh) lives entirely in
//! the provider; the storefront core only reads the current-user state and
//! can subscribe to changes. Page guards and the checkout gate consume this
//! interface and nothing deeper.

use serde::{Deserialize, Serialize};
use sticker_craft_core::{Email, UserId};

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub uid: UserId,
    pub email: Email,
    pub display_name: Option<String>,
}

impl AuthUser {
    /// The name to show for this user: the explicit display name, or the
    /// local part of the email when none was ever set.
    #[must_use]
    pub fn display_name_or_default(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or_else(|| self.email.local_part())
    }
}

/// Read-only view of the authentication state.
pub trait IdentityProvider {
    /// The current user, or `None` while signed out.
    fn current_user(&self) -> Option<AuthUser>;

    /// Register an observer for sign-in/sign-out transitions.
    fn subscribe(&mut self, observer: Box<dyn AuthObserver>);
}

/// Callback interface for authentication state changes.
pub trait AuthObserver {
    fn auth_state_changed(&self, user: Option<&AuthUser>);
}
