use enumset::EnumSet;
use serde::{Deserialize, Serialize};

use super::action::Action;

/// The capabilities held against a single resource.
///
/// The three flags are independent as stored; nothing here prevents a
/// permit such as `manage` without `view`.  Writes that should uphold
/// the hierarchy go through `medrbac::writer`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Permit {
    pub view: bool,
    pub edit: bool,
    pub manage: bool,
}

impl Permit {
    pub const fn new(view: bool, edit: bool, manage: bool) -> Self {
        Self { view, edit, manage }
    }

    pub const fn none() -> Self {
        Self::new(false, false, false)
    }

    pub const fn all() -> Self {
        Self::new(true, true, true)
    }

    pub fn get(&self, action: Action) -> bool {
        match action {
            Action::View => self.view,
            Action::Edit => self.edit,
            Action::Manage => self.manage,
        }
    }

    /// Sets a single flag, leaving the others untouched.
    pub fn set(&mut self, action: Action, value: bool) {
        match action {
            Action::View => self.view = value,
            Action::Edit => self.edit = value,
            Action::Manage => self.manage = value,
        }
    }

    pub fn actions(&self) -> EnumSet<Action> {
        EnumSet::<Action>::all()
            .iter()
            .filter(|action| self.get(*action))
            .collect()
    }

    /// Whether `manage` implies `edit` implies `view` for this permit.
    pub fn is_consistent(&self) -> bool {
        self.actions()
            .iter()
            .all(|action| action.implied().is_subset(self.actions()))
    }
}

impl From<EnumSet<Action>> for Permit {
    fn from(actions: EnumSet<Action>) -> Self {
        Self {
            view: actions.contains(Action::View),
            edit: actions.contains(Action::Edit),
            manage: actions.contains(Action::Manage),
        }
    }
}

#[cfg(test)]
mod test {
    use enumset::enum_set;
    use super::*;

    #[test]
    fn flags() {
        let mut permit = Permit::none();
        assert!(!permit.get(Action::View));
        permit.set(Action::Manage, true);
        assert!(permit.get(Action::Manage));
        assert!(!permit.get(Action::Edit));
        assert_eq!(permit.actions(), enum_set!(Action::Manage));
        assert!(!permit.is_consistent());

        assert!(Permit::none().is_consistent());
        assert!(Permit::all().is_consistent());
        assert!(Permit::new(true, true, false).is_consistent());
        assert!(!Permit::new(false, true, false).is_consistent());
        assert_eq!(
            Permit::from(enum_set!(Action::View | Action::Edit)),
            Permit::new(true, true, false),
        );
    }

    #[test]
    fn missing_fields_deny() -> anyhow::Result<()> {
        let permit: Permit = serde_json::from_str(r#"{"view": true}"#)?;
        assert_eq!(permit, Permit::new(true, false, false));
        let permit: Permit = serde_json::from_str("{}")?;
        assert_eq!(permit, Permit::none());
        Ok(())
    }
}
