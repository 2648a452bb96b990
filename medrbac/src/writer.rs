//! The write path of the permission matrix.
//!
//! Every mutation made here leaves the touched permit consistent with
//! the action hierarchy: granting an action grants everything it
//! implies, revoking an action revokes everything implying it.  A
//! stored permit that was already inconsistent is closed in the
//! direction of the write, upward for a grant and downward for a revoke.

use enumset::EnumSet;
use medcore::ac::{
    Action,
    PermissionMatrix,
    Permit,
    Resource,
};

use crate::{
    checker::{
        parse_action,
        parse_resource,
    },
    error::Error,
};

/// Returns a copy of the matrix with the cell set to `value`, cascading
/// through the hierarchy.
pub fn write(
    matrix: &PermissionMatrix,
    resource: Resource,
    action: Action,
    value: bool,
) -> PermissionMatrix {
    let mut permit = matrix.permit(resource);
    let cascade = if value {
        action.implied()
    } else {
        action.implied_by()
    };
    for action in cascade {
        permit.set(action, value);
    }
    let permit = if value {
        normalize_permit(&permit)
    } else {
        restrict_permit(&permit)
    };
    log::trace!("write {resource} {action}={value}: {permit:?}");
    let mut result = matrix.clone();
    result.insert(resource, permit);
    result
}

/// As [`write`], for resource and action names from outside the crate.
pub fn write_str(
    matrix: &PermissionMatrix,
    resource: &str,
    action: &str,
    value: bool,
) -> Result<PermissionMatrix, Error> {
    Ok(write(matrix, parse_resource(resource)?, parse_action(action)?, value))
}

/// Closes every permit of the matrix upwards: the highest action held
/// determines the permit.
pub fn normalize(matrix: &PermissionMatrix) -> PermissionMatrix {
    matrix.iter()
        .map(|(resource, permit)| (*resource, normalize_permit(permit)))
        .collect()
}

fn normalize_permit(permit: &Permit) -> Permit {
    permit.actions()
        .iter()
        .max()
        .map(|action| Permit::from(action.implied()))
        .unwrap_or_default()
}

// keeps only the unbroken run of held actions from the lowest up
fn restrict_permit(permit: &Permit) -> Permit {
    EnumSet::<Action>::all()
        .iter()
        .take_while(|action| permit.get(*action))
        .collect::<EnumSet<Action>>()
        .into()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn grant_cascades_down() {
        let matrix = PermissionMatrix::new();
        let result = write(&matrix, Resource::Patients, Action::Manage, true);
        assert_eq!(result.permit(Resource::Patients), Permit::all());

        let result = write(&matrix, Resource::Patients, Action::Edit, true);
        assert_eq!(result.permit(Resource::Patients), Permit::new(true, true, false));

        let result = write(&matrix, Resource::Patients, Action::View, true);
        assert_eq!(result.permit(Resource::Patients), Permit::new(true, false, false));
        // the source is left untouched
        assert_eq!(matrix, PermissionMatrix::new());
    }

    #[test]
    fn revoke_cascades_up() {
        let matrix = PermissionMatrix::from_iter([
            (Resource::Patients, Permit::all()),
        ]);
        let result = write(&matrix, Resource::Patients, Action::View, false);
        assert_eq!(result.permit(Resource::Patients), Permit::none());

        let result = write(&matrix, Resource::Patients, Action::Edit, false);
        assert_eq!(result.permit(Resource::Patients), Permit::new(true, false, false));

        let result = write(&matrix, Resource::Patients, Action::Manage, false);
        assert_eq!(result.permit(Resource::Patients), Permit::new(true, true, false));
    }

    #[test]
    fn idempotent() {
        let matrix = PermissionMatrix::default_secretary();
        let once = write(&matrix, Resource::Billing, Action::View, true);
        let twice = write(&once, Resource::Billing, Action::View, true);
        assert_eq!(once, twice);

        let once = write(&matrix, Resource::Billing, Action::Edit, false);
        let twice = write(&once, Resource::Billing, Action::Edit, false);
        assert_eq!(once, twice);
    }

    #[test]
    fn repairs_touched_permit() {
        let matrix = PermissionMatrix::from_iter([
            (Resource::Billing, Permit::new(false, false, true)),
        ]);
        let result = write(&matrix, Resource::Billing, Action::Edit, true);
        assert_eq!(result.permit(Resource::Billing), Permit::all());
        assert!(result.is_consistent());
    }

    #[test]
    fn every_write_is_consistent() {
        for bits in 0..8u8 {
            let stored = Permit::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
            let matrix = PermissionMatrix::from_iter([(Resource::Billing, stored)]);
            for action in [Action::View, Action::Edit, Action::Manage] {
                for value in [true, false] {
                    let permit = write(&matrix, Resource::Billing, action, value)
                        .permit(Resource::Billing);
                    assert!(
                        permit.is_consistent(),
                        "{stored:?} {action}={value} gave {permit:?}",
                    );
                    assert_eq!(permit.get(action), value);
                }
            }
        }
    }

    #[test]
    fn closes_stored_permit_in_write_direction() {
        let matrix = PermissionMatrix::from_iter([
            (Resource::Billing, Permit::new(false, false, true)),
            (Resource::Patients, Permit::new(false, true, false)),
        ]);
        let result = write(&matrix, Resource::Billing, Action::View, true);
        assert_eq!(result.permit(Resource::Billing), Permit::all());
        let result = write(&matrix, Resource::Patients, Action::Manage, false);
        assert_eq!(result.permit(Resource::Patients), Permit::none());
    }

    #[test]
    fn other_resources_untouched() {
        let matrix = PermissionMatrix::default_secretary();
        let result = write(&matrix, Resource::Consultations, Action::Manage, true);
        for resource in Resource::all() {
            if resource != Resource::Consultations {
                assert_eq!(result.get(resource), matrix.get(resource));
            }
        }
    }

    #[test]
    fn strings() -> anyhow::Result<()> {
        let matrix = write_str(&PermissionMatrix::new(), "medicalRecords", "edit", true)?;
        assert_eq!(
            matrix.permit(Resource::MedicalRecords),
            Permit::new(true, true, false),
        );
        assert!(matches!(
            write_str(&matrix, "pharmacy", "edit", true),
            Err(Error::UnknownResource(s)) if s == "pharmacy",
        ));
        assert!(matches!(
            write_str(&matrix, "billing", "own", true),
            Err(Error::UnknownAction(s)) if s == "own",
        ));
        Ok(())
    }

    #[test]
    fn normalize_closes_upward() {
        let matrix = PermissionMatrix::from_iter([
            (Resource::Billing, Permit::new(false, false, true)),
            (Resource::Patients, Permit::new(false, true, false)),
            (Resource::Appointments, Permit::new(true, false, false)),
            (Resource::Consultations, Permit::none()),
        ]);
        let result = normalize(&matrix);
        assert_eq!(result.permit(Resource::Billing), Permit::all());
        assert_eq!(result.permit(Resource::Patients), Permit::new(true, true, false));
        assert_eq!(result.permit(Resource::Appointments), Permit::new(true, false, false));
        assert_eq!(result.get(Resource::Consultations), Some(&Permit::none()));
        assert!(result.is_consistent());
        assert_eq!(normalize(&result), result);
    }
}
