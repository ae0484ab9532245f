use tokio::sync::watch;

use crate::session::AuthStatus;

/// Observable session status published by the identity provider.
pub trait AuthSessionPort: Send + Sync {
    /// Latest status.
    fn current(&self) -> AuthStatus;

    /// Receiver that yields every status change.
    fn subscribe(&self) -> watch::Receiver<AuthStatus>;
}
