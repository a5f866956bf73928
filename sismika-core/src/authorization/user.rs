use sismika_entities::user::{Permission, User};

use std::result::Result as StdResult;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("insufficient permission")]
    InsufficientPermission,
}

pub type Result<T> = StdResult<T, Error>;

pub fn authorize_permission(user: &User, min_required_permission: Permission) -> Result<()> {
    if user.permission < min_required_permission {
        return Err(Error::InsufficientPermission);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sismika_entities::user::SubjectId;

    fn user_with(permission: Permission) -> User {
        User {
            subject: SubjectId::from("auth0|1234"),
            name: "Maria".into(),
            email: "maria@example.ph".into(),
            picture: String::new(),
            permission,
        }
    }

    #[test]
    fn permissions_gate_by_rank() {
        let researcher = user_with(Permission::Researcher);
        assert!(authorize_permission(&researcher, Permission::None).is_ok());
        assert!(authorize_permission(&researcher, Permission::Researcher).is_ok());
        assert!(authorize_permission(&researcher, Permission::Admin).is_err());

        let admin = user_with(Permission::Admin);
        assert!(authorize_permission(&admin, Permission::Admin).is_ok());
    }
}
