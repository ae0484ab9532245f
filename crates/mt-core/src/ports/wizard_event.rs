use crate::wizard::WizardSnapshot;

/// Presentation hook notified after every wizard state change.
#[async_trait::async_trait]
pub trait WizardEventPort: Send + Sync {
    async fn emit_wizard_changed(&self, snapshot: &WizardSnapshot);
}
