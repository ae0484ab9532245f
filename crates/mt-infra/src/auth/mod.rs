//! Local stand-ins for the hosted identity provider.

mod local_provider;
mod session;

pub use local_provider::{LocalIdentityProvider, DEFAULT_ACCOUNTS_FILE};
pub use session::InMemoryAuthSession;
