//! Step validation. Pure functions over the wizard record.
//!
//! An empty map means the step is valid; any entry blocks navigation past it.

use crate::domain::{AuthSession, RegistrationRecord};
use std::collections::BTreeMap;

/// Key for errors not attributable to a single field, shown at section level.
/// One slot per step: writers overwrite, they never accumulate.
pub const GENERAL: &str = "_general";

/// field-name-or-`_general` -> human-readable message. BTreeMap keeps
/// rendering order stable.
pub type StepErrors = BTreeMap<String, String>;

/// Wizard step. Two pages, hardcoded; there is no generic step engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WizardStep {
    #[default]
    RoleAuth,
    Profile,
}

impl WizardStep {
    /// 1-based index for the step indicator.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::RoleAuth => 1,
            WizardStep::Profile => 2,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::RoleAuth => "Role & Login",
            WizardStep::Profile => "Business Profile",
        }
    }

    /// Next step, capped at the last one.
    pub fn next(&self) -> WizardStep {
        match self {
            WizardStep::RoleAuth => WizardStep::Profile,
            WizardStep::Profile => WizardStep::Profile,
        }
    }

    /// Previous step, floored at the first one.
    pub fn previous(&self) -> WizardStep {
        WizardStep::RoleAuth
    }
}

/// Validate one step of the record. `session` is the single authorization
/// predicate's input: step 1 is valid only once a session exists.
pub fn validate_step(
    step: WizardStep,
    record: &RegistrationRecord,
    session: Option<&AuthSession>,
) -> StepErrors {
    let mut errors = StepErrors::new();
    match step {
        WizardStep::RoleAuth => {
            // Literal message regardless of which role is selected.
            if session.is_none() {
                errors.insert(GENERAL.into(), "Please login as agent to proceed".into());
            }
        }
        WizardStep::Profile => {
            let p = &record.profile;
            let required: [(&str, &str, &str); 5] = [
                ("name", &p.name, "Restaurant name is required"),
                ("mobile", &p.mobile, "Mobile number is required"),
                ("email", &p.email, "Login email is required"),
                ("password", &p.password, "Login password is required"),
                ("fullAddress", &p.full_address, "Full address is required"),
            ];
            for (field, value, message) in required {
                if value.trim().is_empty() {
                    errors.insert(field.into(), message.into());
                }
            }
            // Single `_general` slot: a missing coordinate overwrites whatever
            // else might have claimed it.
            if p.latitude.trim().is_empty() || p.longitude.trim().is_empty() {
                errors.insert(GENERAL.into(), "Please select a location on the map".into());
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthSession, Role};

    fn session() -> AuthSession {
        AuthSession {
            role: Role::Agent,
            token: "tok".into(),
        }
    }

    #[test]
    fn step1_without_session_yields_exactly_the_general_error() {
        let record = RegistrationRecord::default();
        let errors = validate_step(WizardStep::RoleAuth, &record, None);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(GENERAL).map(String::as_str),
            Some("Please login as agent to proceed")
        );
    }

    #[test]
    fn step1_with_session_is_valid() {
        let record = RegistrationRecord::default();
        let s = session();
        assert!(validate_step(WizardStep::RoleAuth, &record, Some(&s)).is_empty());
    }

    #[test]
    fn step2_blank_record_yields_five_field_errors_plus_location() {
        let record = RegistrationRecord::default();
        let errors = validate_step(WizardStep::Profile, &record, None);
        for field in ["name", "mobile", "email", "password", "fullAddress"] {
            assert!(errors.contains_key(field), "missing error for {field}");
        }
        assert_eq!(
            errors.get(GENERAL).map(String::as_str),
            Some("Please select a location on the map")
        );
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn step2_with_coordinates_has_no_general_error() {
        let mut record = RegistrationRecord::default();
        record.profile.latitude = "41.0".into();
        record.profile.longitude = "29.0".into();
        let errors = validate_step(WizardStep::Profile, &record, None);
        assert_eq!(errors.len(), 5);
        assert!(!errors.contains_key(GENERAL));
    }

    #[test]
    fn step2_whitespace_only_fields_are_treated_as_blank() {
        let mut record = RegistrationRecord::default();
        record.profile.name = "  ".into();
        record.profile.latitude = " ".into();
        record.profile.longitude = "29.0".into();
        let errors = validate_step(WizardStep::Profile, &record, None);
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key(GENERAL));
    }

    #[test]
    fn step2_complete_record_is_valid() {
        let mut record = RegistrationRecord::default();
        record.profile.name = "Kebapchi".into();
        record.profile.mobile = "+90 555 000 0000".into();
        record.profile.email = "owner@kebapchi.example".into();
        record.profile.password = "hunter2".into();
        record.profile.full_address = "1 Liman Cd, Istanbul".into();
        record.profile.latitude = "41.0".into();
        record.profile.longitude = "29.0".into();
        assert!(validate_step(WizardStep::Profile, &record, None).is_empty());
    }
}
