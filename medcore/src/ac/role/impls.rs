use std::{
    fmt,
    str::FromStr,
};
use crate::error::ValueError;
use super::Role;

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", <&'static str>::from(*self))
    }
}

impl From<Role> for String {
    fn from(role: Role) -> String {
        format!("{role}")
    }
}

impl From<Role> for &'static str {
    fn from(role: Role) -> &'static str {
        match role {
            Role::Doctor => "doctor",
            Role::Patient => "patient",
            Role::Secretary => "secretary",
            Role::Admin => "admin",
            Role::Undefined => "undefined",
        }
    }
}

impl FromStr for Role {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "doctor" => Ok(Role::Doctor),
            "patient" => Ok(Role::Patient),
            "secretary" => Ok(Role::Secretary),
            "admin" => Ok(Role::Admin),
            // Undefined,
            s => Err(ValueError::Unsupported(s.to_string())),
        }
    }
}

#[cfg(feature = "clap")]
mod clap {
    use ::clap::{
        ValueEnum,
        builder::PossibleValue,
    };
    use super::*;

    impl ValueEnum for Role {
        fn value_variants<'a>() -> &'a [Self] {
            &[
                Role::Doctor,
                Role::Patient,
                Role::Secretary,
                Role::Admin,
            ]
        }

        fn to_possible_value(&self) -> Option<PossibleValue> {
            match self {
                Role::Undefined => None,
                role => Some(PossibleValue::new(<&'static str>::from(*role))),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;
    use super::Role;
    use crate::error::ValueError;

    #[test]
    fn smoke() -> anyhow::Result<()> {
        // sample of standard conversions
        assert_eq!(Role::Doctor.to_string(), "doctor");
        assert_eq!(Role::Doctor, Role::from_str("doctor")?);
        assert_eq!(Role::Secretary.to_string(), "secretary");
        assert_eq!(Role::Secretary, Role::from_str("Secretary")?);

        // error conversion
        assert!(Role::from_str("undefined").is_err());
        assert!(matches!(
            Role::from_str("no_such_role")
                .expect_err("should be an error"),
            ValueError::Unsupported(s) if s == "no_such_role".to_string(),
        ));

        // infallable conversion
        assert_eq!(
            Role::from_str("no_such_role")
                .unwrap_or_default(),
            Role::Undefined,
        );
        Ok(())
    }

    #[test]
    fn serde() -> anyhow::Result<()> {
        assert_eq!(serde_json::to_string(&Role::Secretary)?, r#""secretary""#);
        assert_eq!(serde_json::from_str::<Role>(r#""admin""#)?, Role::Admin);
        Ok(())
    }
}
