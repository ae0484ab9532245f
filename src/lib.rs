//! MyTribe
//!
//! Account onboarding: email sign-up and sign-in, the three-step profile
//! setup wizard, and the theme preference. The domain lives in `mt-core`,
//! use cases in `mt-app`, and file-backed adapters in `mt-infra`; this crate
//! wires them together and drives them from a console.

pub mod bootstrap;
pub mod console;
