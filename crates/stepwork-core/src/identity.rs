//! Identity provider port
//!
//! Credentials and sessions live outside the workbook; it only needs the
//! signed-in user and their role.

use crate::error::IdentityError;
use crate::record::{Role, UserId};
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;

#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Signed-in user, if any
    fn current_user(&self) -> Option<UserId>;

    async fn role(&self, user: &UserId) -> Result<Role, IdentityError>;

    async fn set_role(&self, user: &UserId, role: Role) -> Result<(), IdentityError>;
}

/// Process-local identity provider
#[derive(Debug, Default)]
pub struct MemoryIdentity {
    current: RwLock<Option<UserId>>,
    roles: DashMap<UserId, Role>,
}

impl MemoryIdentity {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider with one registered, signed-in user
    #[must_use]
    pub fn signed_in(user: impl Into<UserId>, role: Role) -> Self {
        let identity = Self::new();
        let user = user.into();
        identity.register(user.clone(), role);
        identity.sign_in(user);
        identity
    }

    /// Create or overwrite a profile
    pub fn register(&self, user: UserId, role: Role) {
        self.roles.insert(user, role);
    }

    pub fn sign_in(&self, user: UserId) {
        *self.current.write() = Some(user);
    }

    pub fn sign_out(&self) {
        *self.current.write() = None;
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.current.read().clone()
    }

    async fn role(&self, user: &UserId) -> Result<Role, IdentityError> {
        self.roles
            .get(user)
            .map(|role| *role)
            .ok_or_else(|| IdentityError::UnknownUser(user.to_string()))
    }

    async fn set_role(&self, user: &UserId, role: Role) -> Result<(), IdentityError> {
        match self.roles.get_mut(user) {
            Some(mut stored) => {
                *stored = role;
                Ok(())
            }
            None => Err(IdentityError::UnknownUser(user.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_in_and_out() {
        let identity = MemoryIdentity::signed_in("u", Role::Sponsee);
        assert_eq!(identity.current_user(), Some(UserId::from("u")));
        identity.sign_out();
        assert!(identity.current_user().is_none());
    }

    #[tokio::test]
    async fn role_updates() {
        let identity = MemoryIdentity::signed_in("u", Role::Sponsee);
        let user = UserId::from("u");
        identity.set_role(&user, Role::Sponsor).await.unwrap();
        assert_eq!(identity.role(&user).await.unwrap(), Role::Sponsor);
    }

    #[tokio::test]
    async fn unknown_user_is_an_error() {
        let identity = MemoryIdentity::new();
        let err = identity.role(&"ghost".into()).await.unwrap_err();
        assert_eq!(err, IdentityError::UnknownUser("ghost".into()));
        assert!(!err.is_retryable());
    }
}
