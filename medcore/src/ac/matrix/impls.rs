use std::{
    collections::BTreeMap,
    ops::Deref,
    str::FromStr,
};
use crate::error::ValueError;
use super::*;

impl PermissionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// The matrix a newly provisioned secretary account starts with.
    pub fn default_secretary() -> Self {
        Self::from_iter([
            (Resource::Appointments, Permit::new(true, true, false)),
            (Resource::Patients, Permit::new(true, false, false)),
            (Resource::Billing, Permit::new(true, true, false)),
            (Resource::Consultations, Permit::new(true, false, false)),
            (Resource::MedicalRecords, Permit::new(true, false, false)),
        ])
    }

    /// Builds a matrix from entries keyed by resource name, dropping the
    /// entries naming resources that no longer exist.
    ///
    /// Meant for data read back from storage, which may predate changes
    /// to the resource set.
    pub fn from_lenient<K: AsRef<str>>(
        entries: impl IntoIterator<Item = (K, Permit)>,
    ) -> Self {
        entries.into_iter()
            .filter_map(|(key, permit)| match Resource::from_str(key.as_ref()) {
                Ok(resource) => Some((resource, permit)),
                Err(_) => {
                    log::warn!("dropping permit for unknown resource {:?}", key.as_ref());
                    None
                }
            })
            .collect()
    }

    /// The permit for the resource, if one has been set.
    pub fn get(&self, resource: Resource) -> Option<&Permit> {
        self.0.get(&resource)
    }

    /// The permit for the resource, all-false where none has been set.
    pub fn permit(&self, resource: Resource) -> Permit {
        self.0.get(&resource)
            .copied()
            .unwrap_or_default()
    }

    pub fn insert(&mut self, resource: Resource, permit: Permit) -> Option<Permit> {
        self.0.insert(resource, permit)
    }

    /// Whether every permit in the matrix respects the action hierarchy.
    pub fn is_consistent(&self) -> bool {
        self.0.values().all(Permit::is_consistent)
    }
}

impl Deref for PermissionMatrix {
    type Target = BTreeMap<Resource, Permit>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<(Resource, Permit)> for PermissionMatrix {
    fn from_iter<I: IntoIterator<Item=(Resource, Permit)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<Resource, Permit>> for PermissionMatrix {
    fn from(value: BTreeMap<Resource, Permit>) -> Self {
        Self(value)
    }
}

impl From<PermissionMatrix> for BTreeMap<Resource, Permit> {
    fn from(value: PermissionMatrix) -> Self {
        value.0
    }
}

impl TryFrom<BTreeMap<String, Permit>> for PermissionMatrix {
    type Error = ValueError;

    fn try_from(value: BTreeMap<String, Permit>) -> Result<Self, Self::Error> {
        value.into_iter()
            .map(|(key, permit)| Ok((Resource::from_str(&key)?, permit)))
            .collect()
    }
}

impl IntoIterator for PermissionMatrix {
    type Item = (Resource, Permit);
    type IntoIter = std::collections::btree_map::IntoIter<Resource, Permit>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_secretary() -> anyhow::Result<()> {
        let matrix = PermissionMatrix::default_secretary();
        let expected: PermissionMatrix = serde_json::from_str(r#"{
            "appointments": {"view": true, "edit": true, "manage": false},
            "patients": {"view": true, "edit": false, "manage": false},
            "billing": {"view": true, "edit": true, "manage": false},
            "consultations": {"view": true, "edit": false, "manage": false},
            "medicalRecords": {"view": true, "edit": false, "manage": false}
        }"#)?;
        assert_eq!(matrix, expected);
        assert_eq!(matrix.len(), Resource::all().len());
        assert!(matrix.is_consistent());
        Ok(())
    }

    #[test]
    fn missing_entry() {
        let matrix = PermissionMatrix::new();
        assert_eq!(matrix.get(Resource::Billing), None);
        assert_eq!(matrix.permit(Resource::Billing), Permit::none());
    }

    #[test]
    fn strict_deserialize() {
        assert!(serde_json::from_str::<PermissionMatrix>(r#"{
            "labs": {"view": true, "edit": false, "manage": false}
        }"#).is_err());

        let raw = BTreeMap::from([
            ("labs".to_string(), Permit::all()),
        ]);
        assert!(matches!(
            PermissionMatrix::try_from(raw),
            Err(ValueError::Unsupported(s)) if s == "labs",
        ));
    }

    #[test]
    fn lenient() {
        let matrix = PermissionMatrix::from_lenient([
            ("labs", Permit::all()),
            ("billing", Permit::new(true, false, false)),
        ]);
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.permit(Resource::Billing), Permit::new(true, false, false));
    }

    #[test]
    fn serialize() -> anyhow::Result<()> {
        let matrix = PermissionMatrix::from_iter([
            (Resource::MedicalRecords, Permit::new(true, false, false)),
        ]);
        assert_eq!(
            serde_json::to_string(&matrix)?,
            r#"{"medicalRecords":{"view":true,"edit":false,"manage":false}}"#,
        );
        Ok(())
    }
}
