//! Identity provider seam
//!
//! Login is a token exchange: the Google-issued id token is traded with
//! the document store's identity broker for a session.

use async_trait::async_trait;

/// An authenticated session with the document store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub user_id: String,
}

/// Client for the identity broker
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange an id token for a session
    async fn log_in_with_token(&self, id_token: &str) -> anyhow::Result<UserSession>;

    /// End the current session
    async fn log_out(&self) -> anyhow::Result<()>;

    /// Id of the currently logged-in user, if any
    fn current_user_id(&self) -> Option<String>;

    fn is_logged_in(&self) -> bool {
        self.current_user_id().is_some()
    }
}
