//! Identity of the user behind a request

use crate::models::UserId;

/// Supplies the signed-in user, if any
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserId>;
}

/// Identity known up front, e.g. from a request header or the CLI
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedIdentity(Option<UserId>);

impl FixedIdentity {
    #[must_use]
    pub fn signed_in(user: UserId) -> Self {
        Self(Some(user))
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self(None)
    }

    /// Treat blank ids as anonymous
    #[must_use]
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(id) if !id.is_empty() => Self::signed_in(UserId::new(id)),
            _ => Self::anonymous(),
        }
    }
}

impl IdentityProvider for FixedIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.0.clone()
    }
}
