use std::fmt;

use num_derive::{FromPrimitive, ToPrimitive};

/// Stable identifier issued by the identity provider (the `sub` claim).
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }
}

impl From<String> for SubjectId {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl From<&str> for SubjectId {
    fn from(from: &str) -> Self {
        from.to_owned().into()
    }
}

impl From<SubjectId> for String {
    fn from(from: SubjectId) -> Self {
        from.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub subject    : SubjectId,
    pub name       : String,
    pub email      : String,
    pub picture    : String,
    pub permission : Permission,
}

/// What a signed-in user is allowed to do.
///
/// The variants are ordered: every permission implies all the ones below
/// it, so gates compare with `>=` against the required minimum.
#[rustfmt::skip]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord,
    FromPrimitive, ToPrimitive, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Permission {
    None       = 0,
    Researcher = 1,
    Admin      = 2,
}

impl Default for Permission {
    fn default() -> Permission {
        Permission::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{FromPrimitive as _, ToPrimitive as _};

    #[test]
    fn permissions_are_ordered() {
        assert!(Permission::None < Permission::Researcher);
        assert!(Permission::Researcher < Permission::Admin);
        assert!(Permission::Admin >= Permission::Researcher);
    }

    #[test]
    fn permissions_round_trip_through_primitives() {
        for permission in [Permission::None, Permission::Researcher, Permission::Admin] {
            let raw = permission.to_i16().unwrap();
            assert_eq!(permission, Permission::from_i16(raw).unwrap());
        }
        assert_eq!(None, Permission::from_i16(3));
    }

    #[test]
    fn permissions_parse_from_lowercase_names() {
        assert_eq!(Permission::None, "none".parse().unwrap());
        assert_eq!(Permission::Researcher, "researcher".parse().unwrap());
        assert_eq!(Permission::Admin, "admin".parse().unwrap());
        assert!("root".parse::<Permission>().is_err());
    }
}
