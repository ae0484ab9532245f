pub mod auth;
pub mod fs;
pub mod theme;
pub mod time;
pub mod user;

pub use auth::{InMemoryAuthSession, LocalIdentityProvider};
pub use theme::FileThemeRepository;
pub use time::SystemClock;
pub use user::FileUserRepository;
