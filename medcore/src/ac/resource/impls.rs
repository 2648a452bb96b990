use enumset::EnumSet;
use std::{
    fmt,
    str::FromStr,
};
use crate::error::ValueError;
use super::Resource;

impl Resource {
    pub fn all() -> EnumSet<Resource> {
        EnumSet::all()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", <&'static str>::from(*self))
    }
}

impl From<Resource> for String {
    fn from(resource: Resource) -> String {
        format!("{resource}")
    }
}

impl From<Resource> for &'static str {
    fn from(resource: Resource) -> &'static str {
        match resource {
            Resource::Appointments => "appointments",
            Resource::Patients => "patients",
            Resource::Billing => "billing",
            Resource::Consultations => "consultations",
            Resource::MedicalRecords => "medicalRecords",
        }
    }
}

impl FromStr for Resource {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appointments" => Ok(Resource::Appointments),
            "patients" => Ok(Resource::Patients),
            "billing" => Ok(Resource::Billing),
            "consultations" => Ok(Resource::Consultations),
            "medicalRecords" => Ok(Resource::MedicalRecords),
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

    impl ValueEnum for Resource {
        fn value_variants<'a>() -> &'a [Self] {
            &[
                Resource::Appointments,
                Resource::Patients,
                Resource::Billing,
                Resource::Consultations,
                Resource::MedicalRecords,
            ]
        }

        fn to_possible_value(&self) -> Option<PossibleValue> {
            Some(PossibleValue::new(<&'static str>::from(*self)))
        }
    }
}
