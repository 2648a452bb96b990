use enumset::EnumSetType;
use serde::{Deserialize, Serialize};

/// A protected capability domain of the practice.
///
/// The set is fixed; strings naming anything else are rejected during
/// conversion rather than silently denied.
#[derive(Debug, EnumSetType, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    Appointments,
    Patients,
    Billing,
    Consultations,
    MedicalRecords,
}

mod impls;
