use enumset::EnumSet;
use std::{
    fmt,
    str::FromStr,
};
use crate::error::ValueError;
use super::Action;

impl Action {
    /// The actions held by anyone holding this action, including itself.
    pub fn implied(&self) -> EnumSet<Action> {
        EnumSet::<Action>::all()
            .iter()
            .filter(|action| action <= self)
            .collect()
    }

    /// The actions that imply this one, including itself.
    pub fn implied_by(&self) -> EnumSet<Action> {
        EnumSet::<Action>::all()
            .iter()
            .filter(|action| action >= self)
            .collect()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", <&'static str>::from(*self))
    }
}

impl From<Action> for String {
    fn from(action: Action) -> String {
        format!("{action}")
    }
}

impl From<Action> for &'static str {
    fn from(action: Action) -> &'static str {
        match action {
            Action::View => "view",
            Action::Edit => "edit",
            Action::Manage => "manage",
        }
    }
}

impl FromStr for Action {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "view" => Ok(Action::View),
            "edit" => Ok(Action::Edit),
            "manage" => Ok(Action::Manage),
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

    impl ValueEnum for Action {
        fn value_variants<'a>() -> &'a [Self] {
            &[
                Action::View,
                Action::Edit,
                Action::Manage,
            ]
        }

        fn to_possible_value(&self) -> Option<PossibleValue> {
            Some(PossibleValue::new(<&'static str>::from(*self)))
        }
    }
}

#[cfg(test)]
mod test {
    use enumset::enum_set;
    use std::str::FromStr;
    use super::Action;

    #[test]
    fn smoke() -> anyhow::Result<()> {
        assert_eq!(Action::Manage.to_string(), "manage");
        assert_eq!(Action::Edit, Action::from_str("edit")?);
        assert!(Action::from_str("delete").is_err());
        Ok(())
    }

    #[test]
    fn hierarchy() {
        assert!(Action::View < Action::Edit);
        assert!(Action::Edit < Action::Manage);
        assert_eq!(Action::View.implied(), enum_set!(Action::View));
        assert_eq!(Action::Edit.implied(), enum_set!(Action::View | Action::Edit));
        assert_eq!(
            Action::Manage.implied(),
            enum_set!(Action::View | Action::Edit | Action::Manage),
        );
        assert_eq!(
            Action::View.implied_by(),
            enum_set!(Action::View | Action::Edit | Action::Manage),
        );
        assert_eq!(Action::Manage.implied_by(), enum_set!(Action::Manage));
    }
}
