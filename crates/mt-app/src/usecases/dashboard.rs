use std::sync::Arc;

use tracing::{info_span, warn, Instrument};

use mt_core::ports::{AuthSessionPort, UserRepositoryPort};
use mt_core::session::resolve_access;
use mt_core::user::UserRecord;
use mt_core::{Access, Identity};

/// What the dashboard shows for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    /// Session still resolving.
    Pending,
    RedirectToSignUp,
    Ready {
        identity: Identity,
        /// `None` if the user document is missing.
        record: Option<UserRecord>,
    },
}

impl DashboardView {
    pub fn profile_completed(&self) -> bool {
        match self {
            DashboardView::Ready {
                record: Some(record),
                ..
            } => record.profile_completed(),
            _ => false,
        }
    }
}

/// Use case for loading the signed-in user's dashboard.
pub struct GetDashboard {
    auth_session: Arc<dyn AuthSessionPort>,
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl GetDashboard {
    pub fn new(auth_session: Arc<dyn AuthSessionPort>, user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self {
            auth_session,
            user_repo,
        }
    }

    pub fn from_ports(
        auth_session: Arc<dyn AuthSessionPort>,
        user_repo: Arc<dyn UserRepositoryPort>,
    ) -> Self {
        Self::new(auth_session, user_repo)
    }

    pub async fn execute(&self) -> anyhow::Result<DashboardView> {
        let identity = match resolve_access(&self.auth_session.current()) {
            Access::Pending => return Ok(DashboardView::Pending),
            Access::RedirectToSignUp => return Ok(DashboardView::RedirectToSignUp),
            Access::Ready(identity) => identity,
        };

        let span = info_span!("usecase.get_dashboard.execute", uid = %identity.uid);
        async {
            let record = self.user_repo.get_by_id(&identity.uid).await?;
            if record.is_none() {
                warn!("signed-in user has no user record");
            }
            Ok(DashboardView::Ready { identity, record })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mt_core::ports::UserRepositoryPort;
    use mt_core::user::AuthProvider;
    use mt_core::{AuthStatus, CompletedProfile, FormData};
    use mt_infra::auth::InMemoryAuthSession;
    use mt_infra::user::FileUserRepository;
    use tempfile::TempDir;

    fn ada() -> Identity {
        Identity {
            email: Some("ada@example.com".into()),
            ..Identity::new("u1")
        }
    }

    #[tokio::test]
    async fn redirects_when_signed_out() {
        let dir = TempDir::new().unwrap();
        let session = Arc::new(InMemoryAuthSession::new());
        session.publish(AuthStatus::SignedOut);
        let repo = Arc::new(FileUserRepository::new(dir.path().to_path_buf()));

        let view = GetDashboard::new(session, repo).execute().await.unwrap();
        assert_eq!(view, DashboardView::RedirectToSignUp);
    }

    #[tokio::test]
    async fn pending_while_loading() {
        let dir = TempDir::new().unwrap();
        let session = Arc::new(InMemoryAuthSession::new());
        let repo = Arc::new(FileUserRepository::new(dir.path().to_path_buf()));

        let view = GetDashboard::from_ports(session, repo).execute().await.unwrap();
        assert_eq!(view, DashboardView::Pending);
    }

    #[tokio::test]
    async fn reports_profile_completion_from_record() {
        let dir = TempDir::new().unwrap();
        let session = Arc::new(InMemoryAuthSession::new());
        session.publish(AuthStatus::SignedIn(ada()));
        let repo = Arc::new(FileUserRepository::new(dir.path().to_path_buf()));
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let mut record = UserRecord::from_identity(&ada(), AuthProvider::Email, at);
        repo.create(&record).await.unwrap();
        let use_case = GetDashboard::new(session, repo.clone());
        assert!(!use_case.execute().await.unwrap().profile_completed());

        record.profile = Some(CompletedProfile::new(FormData::default(), at));
        repo.create(&record).await.unwrap();
        assert!(use_case.execute().await.unwrap().profile_completed());
    }
}
