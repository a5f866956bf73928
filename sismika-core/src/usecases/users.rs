use super::{authorize::authorize_min_permission, prelude::*};

/// Users may look up their own record; everyone else's needs admin
/// rights.
pub fn get_user<R: UserRepo>(repo: &R, auth: &User, subject: &SubjectId) -> Result<User> {
    if &auth.subject != subject {
        authorize_min_permission(auth, Permission::Admin)?;
    }
    Ok(repo.get_user(subject)?)
}

pub fn all_users<R: UserRepo>(repo: &R, auth: &User) -> Result<Vec<User>> {
    authorize_min_permission(auth, Permission::Admin)?;
    Ok(repo.all_users()?)
}

pub fn change_user_permission<R: UserRepo>(
    repo: &R,
    auth: &User,
    subject: &SubjectId,
    permission: Permission,
) -> Result<()> {
    authorize_min_permission(auth, Permission::Admin)?;
    log::info!("Changing permission to {:?} for {}", permission, subject);
    let mut user = repo.try_get_user(subject)?.ok_or(Error::UserDoesNotExist)?;
    user.permission = permission;
    repo.create_or_update_user(&user)?;
    Ok(())
}

/// Users may remove their own account; removing someone else's needs
/// admin rights.
pub fn delete_user<R: UserRepo>(repo: &R, auth: &User, subject: &SubjectId) -> Result<()> {
    if &auth.subject != subject {
        authorize_min_permission(auth, Permission::Admin)?;
    }
    Ok(repo.delete_user(subject)?)
}
