use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use mt_core::{Identity, ProfileWizard};

/// Shared wizard state plus the identity it was initialized from.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `wizard` first, then `identity`.
/// Neither lock is held across a port call.
#[derive(Clone, Default)]
pub(crate) struct ProfileSetupContext {
    wizard: Arc<Mutex<ProfileWizard>>,
    identity: Arc<Mutex<Option<Identity>>>,
}

impl ProfileSetupContext {
    pub(crate) fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub(crate) async fn wizard(&self) -> MutexGuard<'_, ProfileWizard> {
        self.wizard.lock().await
    }

    pub(crate) async fn identity(&self) -> Option<Identity> {
        self.identity.lock().await.clone()
    }

    pub(crate) async fn set_identity(&self, identity: Option<Identity>) {
        *self.identity.lock().await = identity;
    }
}
