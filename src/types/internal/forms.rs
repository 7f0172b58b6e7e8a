use chrono::NaiveDate;

use crate::errors::InternalError;
use crate::errors::internal::ValidationError;

use super::{Priority, RequestStatus};

/// Disability value the registration form submits for "none"
const NO_DISABILITY: &str = "ninguno";

/// Validated beneficiary registration or edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeneficiaryForm {
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub disability_type: Option<String>,
    pub notes: Option<String>,
}

impl BeneficiaryForm {
    /// Validate raw form fields
    ///
    /// # Errors
    /// * missing or blank `full_name`
    /// * `birth_date` that is not `YYYY-MM-DD`
    pub fn parse(
        full_name: &str,
        birth_date: Option<&str>,
        disability_type: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Self, InternalError> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(ValidationError::missing(
                "full_name",
                "El nombre completo es requerido",
            ));
        }

        let birth_date = match non_empty(birth_date) {
            Some(raw) => Some(NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                ValidationError::invalid("birth_date", "La fecha de nacimiento no es válida")
            })?),
            None => None,
        };

        let disability_type =
            non_empty(disability_type).filter(|value| !value.eq_ignore_ascii_case(NO_DISABILITY));

        Ok(Self {
            full_name: full_name.to_string(),
            birth_date,
            disability_type,
            notes: non_empty(notes),
        })
    }
}

/// Validated request creation form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestForm {
    pub beneficiary_id: String,
    pub description: String,
    pub priority: Priority,
}

impl RequestForm {
    pub fn parse(
        beneficiary_id: &str,
        description: &str,
        priority: Option<Priority>,
    ) -> Result<Self, InternalError> {
        let beneficiary_id = beneficiary_id.trim();
        if beneficiary_id.is_empty() {
            return Err(ValidationError::missing(
                "beneficiary_id",
                "El beneficiario es requerido",
            ));
        }

        Ok(Self {
            beneficiary_id: beneficiary_id.to_string(),
            description: required_description(description)?,
            priority: priority.unwrap_or_default(),
        })
    }
}

/// Validated request edit form
///
/// `status` is `None` when the form leaves the status alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEditForm {
    pub description: String,
    pub priority: Priority,
    pub status: Option<RequestStatus>,
}

impl RequestEditForm {
    pub fn parse(
        description: &str,
        priority: Priority,
        status: Option<RequestStatus>,
    ) -> Result<Self, InternalError> {
        Ok(Self {
            description: required_description(description)?,
            priority,
            status,
        })
    }
}

/// Validated sign-up form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
}

impl SignupForm {
    /// All rule violations are reported together
    pub fn parse(username: &str, password: &str, confirm_password: &str) -> Result<Self, InternalError> {
        let username = username.trim();
        let mut errors = Vec::new();

        if username.chars().count() < 3 {
            errors.push("El usuario debe tener al menos 3 caracteres".to_string());
        }
        if password.chars().count() < 6 {
            errors.push("La contraseña debe tener al menos 6 caracteres".to_string());
        }
        if password != confirm_password {
            errors.push("Las contraseñas no coinciden".to_string());
        }

        if !errors.is_empty() {
            return Err(ValidationError::Multiple(errors).into());
        }

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Validated password change form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChangeForm {
    pub current_password: String,
    pub new_password: String,
}

impl PasswordChangeForm {
    pub fn parse(
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<Self, InternalError> {
        if current_password.is_empty() || new_password.is_empty() || confirm_password.is_empty() {
            return Err(ValidationError::missing(
                "password",
                "Todos los campos son requeridos",
            ));
        }
        if new_password != confirm_password {
            return Err(ValidationError::invalid(
                "confirm_password",
                "Las contraseñas no coinciden",
            ));
        }
        if new_password.chars().count() < 6 {
            return Err(ValidationError::invalid(
                "new_password",
                "La nueva contraseña debe tener al menos 6 caracteres",
            ));
        }

        Ok(Self {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        })
    }
}

fn required_description(description: &str) -> Result<String, InternalError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(ValidationError::missing(
            "description",
            "La descripción es requerida",
        ));
    }
    Ok(description.to_string())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: InternalError) -> String {
        err.to_string()
    }

    #[test]
    fn test_beneficiary_requires_full_name() {
        let err = BeneficiaryForm::parse("   ", None, None, None).unwrap_err();
        assert_eq!(message(err), "El nombre completo es requerido");
    }

    #[test]
    fn test_beneficiary_optional_fields_normalize_to_none() {
        let form = BeneficiaryForm::parse("Ana García", Some(""), Some("ninguno"), Some("  ")).unwrap();

        assert_eq!(form.full_name, "Ana García");
        assert_eq!(form.birth_date, None);
        assert_eq!(form.disability_type, None);
        assert_eq!(form.notes, None);
    }

    #[test]
    fn test_beneficiary_parses_birth_date() {
        let form = BeneficiaryForm::parse("Pedro Pérez", Some("1948-07-21"), Some("Motora"), None).unwrap();

        assert_eq!(form.birth_date, NaiveDate::from_ymd_opt(1948, 7, 21));
        assert_eq!(form.disability_type.as_deref(), Some("Motora"));
    }

    #[test]
    fn test_beneficiary_rejects_malformed_birth_date() {
        let err = BeneficiaryForm::parse("Pedro Pérez", Some("21/07/1948"), None, None).unwrap_err();
        assert!(matches!(
            err,
            InternalError::Validation(ValidationError::InvalidField { ref field, .. }) if field == "birth_date"
        ));
    }

    #[test]
    fn test_request_form_defaults_priority_to_media() {
        let form = RequestForm::parse("ben-1", "Necesita silla de ruedas", None).unwrap();
        assert_eq!(form.priority, Priority::Medium);
    }

    #[test]
    fn test_request_form_requires_description() {
        let err = RequestForm::parse("ben-1", "", Some(Priority::High)).unwrap_err();
        assert_eq!(message(err), "La descripción es requerida");
    }

    #[test]
    fn test_signup_reports_every_violation() {
        let err = SignupForm::parse("ab", "123", "456").unwrap_err();
        assert_eq!(
            message(err),
            "El usuario debe tener al menos 3 caracteres, \
             La contraseña debe tener al menos 6 caracteres, \
             Las contraseñas no coinciden"
        );
    }

    #[test]
    fn test_signup_accepts_valid_form() {
        let form = SignupForm::parse(" vocero ", "secreto123", "secreto123").unwrap();
        assert_eq!(form.username, "vocero");
    }

    #[test]
    fn test_password_change_rules_in_order() {
        assert_eq!(
            message(PasswordChangeForm::parse("", "nueva123", "nueva123").unwrap_err()),
            "Todos los campos son requeridos"
        );
        assert_eq!(
            message(PasswordChangeForm::parse("actual", "nueva123", "nueva124").unwrap_err()),
            "Las contraseñas no coinciden"
        );
        assert_eq!(
            message(PasswordChangeForm::parse("actual", "corta", "corta").unwrap_err()),
            "La nueva contraseña debe tener al menos 6 caracteres"
        );
        assert!(PasswordChangeForm::parse("actual", "nueva123", "nueva123").is_ok());
    }
}
