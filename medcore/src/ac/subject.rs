use serde::{Deserialize, Serialize};

use super::{
    matrix::PermissionMatrix,
    role::Role,
    user::User,
};

/// The actor an access decision is made for.
///
/// The permission matrix is only consulted for secretaries; a secretary
/// without one is denied everything.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Subject {
    pub user: Option<User>,
    pub role: Role,
    pub permissions: Option<PermissionMatrix>,
}

impl Subject {
    /// A subject carrying only a role, without an identity.
    pub fn from_role(role: Role) -> Self {
        Self {
            role,
            .. Default::default()
        }
    }

    pub fn with_permissions(mut self, permissions: PermissionMatrix) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.name.as_str())
    }
}

impl From<User> for Subject {
    fn from(user: User) -> Self {
        Self {
            role: user.role,
            user: Some(user),
            permissions: None,
        }
    }
}

#[cfg(feature = "display")]
mod display {
    use std::fmt::{
        Display,
        Formatter,
        Result,
    };
    use super::Subject;

    impl Display for Subject {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            match self.name() {
                Some(name) => write!(f, "<{}:{name}>", self.role),
                None => write!(f, "<{}>", self.role),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_user() {
        let subject: Subject = User {
            id: 2,
            name: "sam".to_string(),
            role: Role::Secretary,
            created_ts: 1234567890,
        }.into();
        assert_eq!(subject.role, Role::Secretary);
        assert_eq!(subject.name(), Some("sam"));
        assert_eq!(subject.permissions, None);

        let subject = Subject::from_role(Role::Patient);
        assert_eq!(subject.name(), None);
        assert_eq!(subject.role, Role::Patient);
    }
}
