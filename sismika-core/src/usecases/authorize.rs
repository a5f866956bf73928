use super::prelude::*;
use crate::repositories::Error as RepoError;

pub fn authorize_min_permission(user: &User, min_required_permission: Permission) -> Result<()> {
    crate::authorization::user::authorize_permission(user, min_required_permission)
        .map_err(|_| Error::Forbidden)
}

/// Resolves the user behind an active session and checks their
/// permission in one step.
///
/// A missing or dangling session is indistinguishable from no session
/// at all, while an expired one is reported as such so the caller can
/// ask for a fresh sign-in.
pub fn authorize_session_user<R>(
    repo: &R,
    session_id: &str,
    min_required_permission: Permission,
) -> Result<User>
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
    let Some(user) = repo.try_get_user(&session.user)? else {
        return Err(Error::Unauthorized);
    };
    authorize_min_permission(&user, min_required_permission)?;
    Ok(user)
}
