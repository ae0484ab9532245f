use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Opaque user identifier issued by the identity provider.
///
/// The wizard never inspects it; it only keys the profile document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl_id!(UserId);
