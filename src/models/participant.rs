//! Participant identity as supplied by the roster/profile service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (owned by the profile service).
pub type ParticipantId = Uuid;

/// A participant in a bracket. Treated as an immutable value copied into match slots.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    /// Avatar URL or storage key; None if the profile has no avatar.
    #[serde(default)]
    pub avatar_ref: Option<String>,
}

impl Participant {
    /// Create a participant with a fresh id and no avatar.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), display_name)
    }

    /// Create a participant with a known id (e.g. loaded from the profile service).
    pub fn with_id(id: ParticipantId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            avatar_ref: None,
        }
    }

    pub fn with_avatar(mut self, avatar_ref: impl Into<String>) -> Self {
        self.avatar_ref = Some(avatar_ref.into());
        self
    }
}
