use crate::{id::Id, nonce::Nonce, time::Timestamp, user::SubjectId};

/// Login handshake that has been started but not yet confirmed by the
/// identity provider. Carries the nonce the provider must echo back.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSession {
    pub id         : Id,
    pub nonce      : Nonce,
    pub expires_at : Timestamp,
}

impl PendingSession {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at < now
    }
}

/// Confirmed login session bound to a user.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id         : Id,
    pub user       : SubjectId,
    pub expires_at : Timestamp,
}

impl Session {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at < now
    }
}
