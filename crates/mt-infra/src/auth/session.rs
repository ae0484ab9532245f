use tokio::sync::watch;
use tracing::debug;

use mt_core::ports::AuthSessionPort;
use mt_core::AuthStatus;

/// Session state held in a `watch` channel. Starts out `Loading`.
pub struct InMemoryAuthSession {
    sender: watch::Sender<AuthStatus>,
}

impl Default for InMemoryAuthSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuthSession {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(AuthStatus::Loading);
        Self { sender }
    }

    pub fn publish(&self, status: AuthStatus) {
        debug!(signed_in = status.is_signed_in(), "auth session changed");
        self.sender.send_replace(status);
    }
}

impl AuthSessionPort for InMemoryAuthSession {
    fn current(&self) -> AuthStatus {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.sender.subscribe()
    }
}
