//! Email/password authentication use cases.
//!
//! Credential forms are checked before the identity provider is called;
//! every successful sign-up or sign-in ensures the user record exists.

mod ensure_user_record;
mod sign_in;
mod sign_out;
mod sign_up;

pub use ensure_user_record::EnsureUserRecord;
pub use sign_in::{SignInError, SignInWithEmail, SIGN_IN_FAILED_MESSAGE};
pub use sign_out::SignOut;
pub use sign_up::{SignUpError, SignUpWithEmail};
