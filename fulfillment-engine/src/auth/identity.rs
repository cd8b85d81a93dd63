//! Identity provider interface
//!
//! The engine never decides who the viewer is; role and identity come
//! from the external provider only. Auth-state changes are observed
//! through a broadcast subscription so the UI layer can re-scope its
//! queries when the session changes.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{RwLock, broadcast};

use shared::models::UserProfile;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("not signed in")]
    NotSignedIn,

    #[error("identity provider unavailable: {0}")]
    Unavailable(#[from] anyhow::Error),
}

/// Auth-state change event
#[derive(Debug, Clone)]
pub enum AuthEvent {
    SignedIn(UserProfile),
    SignedOut,
}

/// External identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The signed-in user, or `None` when no session is active.
    async fn current_user(&self) -> Result<Option<UserProfile>, IdentityError>;

    async fn login(&self) -> Result<UserProfile, IdentityError>;

    async fn logout(&self) -> Result<(), IdentityError>;

    /// Subscribe to auth-state changes.
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

/// In-process identity provider for tests and development.
///
/// Holds a single fixed profile; `login`/`logout` toggle the session and
/// broadcast the change.
pub struct MockIdentity {
    profile: UserProfile,
    signed_in: RwLock<bool>,
    tx: broadcast::Sender<AuthEvent>,
}

impl MockIdentity {
    pub fn new(profile: UserProfile) -> Self {
        let (tx, _) = broadcast::channel(16);
        Self {
            profile,
            signed_in: RwLock::new(false),
            tx,
        }
    }

    /// A provider that starts with an active session.
    pub fn signed_in(profile: UserProfile) -> Self {
        let (tx, _) = broadcast::channel(16);
        Self {
            profile,
            signed_in: RwLock::new(true),
            tx,
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentity {
    async fn current_user(&self) -> Result<Option<UserProfile>, IdentityError> {
        let signed_in = *self.signed_in.read().await;
        Ok(signed_in.then(|| self.profile.clone()))
    }

    async fn login(&self) -> Result<UserProfile, IdentityError> {
        *self.signed_in.write().await = true;
        let _ = self.tx.send(AuthEvent::SignedIn(self.profile.clone()));
        Ok(self.profile.clone())
    }

    async fn logout(&self) -> Result<(), IdentityError> {
        *self.signed_in.write().await = false;
        let _ = self.tx.send(AuthEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Role;

    fn make_profile() -> UserProfile {
        UserProfile {
            id: "user-1".to_string(),
            email: "sales@example.com".to_string(),
            display_name: None,
            role: Role::Sales,
        }
    }

    #[tokio::test]
    async fn test_login_logout_round_trip() {
        let identity = MockIdentity::new(make_profile());
        assert!(identity.current_user().await.unwrap().is_none());

        identity.login().await.unwrap();
        let user = identity.current_user().await.unwrap().unwrap();
        assert_eq!(user.id, "user-1");

        identity.logout().await.unwrap();
        assert!(identity.current_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_subscribe_observes_changes() {
        let identity = MockIdentity::new(make_profile());
        let mut rx = identity.subscribe();

        identity.login().await.unwrap();
        assert!(matches!(rx.recv().await.unwrap(), AuthEvent::SignedIn(_)));

        identity.logout().await.unwrap();
        assert!(matches!(rx.recv().await.unwrap(), AuthEvent::SignedOut));
    }
}
