use crate::{
    repositories::Error as RepoError,
    usecases::prelude::*,
    util::validate::{is_valid_email, IdentityInvalidation, Validate},
};

/// Profile claims handed back by the identity provider after a
/// successful sign-in.
#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct ResolvedIdentity {
    pub subject : SubjectId,
    pub name    : String,
    pub email   : String,
    pub picture : String,
}

impl Validate for ResolvedIdentity {
    type Error = IdentityInvalidation;
    fn validate(&self) -> std::result::Result<(), Self::Error> {
        if !self.subject.is_valid() {
            return Err(Self::Error::Subject);
        }
        if !is_valid_email(&self.email) {
            return Err(Self::Error::EmailAddress);
        }
        Ok(())
    }
}

/// Starts a login handshake.
///
/// The returned pending session carries the nonce the identity provider
/// must echo back on confirmation.
pub fn begin_session<R: SessionRepo>(repo: &R, ttl: Duration) -> Result<PendingSession> {
    let pending = PendingSession {
        id: Id::new(),
        nonce: Nonce::new(),
        expires_at: Timestamp::now() + ttl,
    };
    repo.create_pending_session(&pending)?;
    Ok(pending)
}

/// Completes a login handshake and binds the session to a user.
///
/// The pending session is consumed no matter how confirmation turns
/// out, so a failed attempt cannot be replayed. First-time visitors get
/// an account with `first_login_permission`; returning users keep their
/// permission while the rest of their profile is refreshed from the
/// provider's claims.
pub fn confirm_session<R>(
    repo: &R,
    session_id: &str,
    presented_nonce: &str,
    identity: ResolvedIdentity,
    first_login_permission: Permission,
) -> Result<(Session, User)>
where
    R: SessionRepo + UserRepo,
{
    let pending = match repo.take_pending_session(session_id) {
        Ok(pending) => pending,
        Err(RepoError::NotFound) => return Err(Error::Unauthorized),
        Err(e) => return Err(Error::Repo(e)),
    };
    if pending.is_expired(Timestamp::now()) {
        return Err(Error::SessionExpired);
    }
    let nonce = presented_nonce.parse::<Nonce>()?;
    if nonce != pending.nonce {
        return Err(Error::InvalidNonce);
    }
    identity.validate()?;

    let user = match repo.try_get_user(&identity.subject)? {
        Some(mut user) => {
            user.name = identity.name;
            user.email = identity.email;
            user.picture = identity.picture;
            user
        }
        None => {
            log::info!(
                "First sign-in of {}, granting {} permission",
                identity.subject,
                first_login_permission
            );
            User {
                subject: identity.subject,
                name: identity.name,
                email: identity.email,
                picture: identity.picture,
                permission: first_login_permission,
            }
        }
    };
    repo.create_or_update_user(&user)?;

    let session = Session {
        id: pending.id,
        user: user.subject.clone(),
        expires_at: pending.expires_at,
    };
    repo.upgrade_session(&session)?;
    Ok((session, user))
}

/// Resolves the user behind an active session.
pub fn session_user<R>(repo: &R, session_id: &str) -> Result<User>
where
    R: SessionRepo + UserRepo,
{
    let session = match repo.get_session(session_id) {
        Ok(session) => session,
        Err(RepoError::NotFound) => return Err(Error::Unauthorized),
        Err(e) => return Err(Error::Repo(e)),
    };
    if session.is_expired(Timestamp::now()) {
        return Err(Error::SessionExpired);
    }
    repo.try_get_user(&session.user)?.ok_or(Error::Unauthorized)
}

/// Signing out twice is fine; only real store failures surface.
pub fn end_session<R: SessionRepo>(repo: &R, session_id: &str) -> Result<()> {
    match repo.delete_session(session_id) {
        Ok(()) | Err(RepoError::NotFound) => Ok(()),
        Err(e) => Err(Error::Repo(e)),
    }
}

pub fn purge_expired_sessions<R: SessionRepo>(repo: &R, now: Timestamp) -> Result<usize> {
    let purged = repo.delete_expired_sessions(now)?;
    if purged > 0 {
        log::info!("Purged {purged} expired sessions");
    }
    Ok(purged)
}
