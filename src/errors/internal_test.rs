#[cfg(test)]
mod tests {
    use crate::errors::internal::{
        CredentialError, InternalError, NotFoundError, TransitionError, ValidationError,
    };
    use crate::types::internal::RequestStatus;
    use sea_orm::DbErr;

    #[test]
    fn test_database_error_includes_operation() {
        let db_err = DbErr::RecordNotFound("test record".to_string());
        let error = InternalError::database("create_beneficiary", db_err);

        let error_string = error.to_string();
        assert!(error_string.contains("create_beneficiary"));
        assert!(error_string.contains("Database error"));
    }

    #[test]
    fn test_parse_error_includes_value_type() {
        let error = InternalError::parse("birth_date", "invalid format");

        let error_string = error.to_string();
        assert!(error_string.contains("birth_date"));
        assert!(error_string.contains("invalid format"));
        assert!(error_string.contains("Parse error"));
    }

    #[test]
    fn test_crypto_error_includes_operation() {
        let error = InternalError::crypto("argon2_init", "invalid secret length");

        let error_string = error.to_string();
        assert!(error_string.contains("argon2_init"));
        assert!(error_string.contains("Crypto error"));
    }

    #[test]
    fn test_credential_error_invalid_credentials() {
        let error = CredentialError::InvalidCredentials;
        assert_eq!(error.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_validation_error_displays_user_message() {
        let error = ValidationError::missing("description", "La descripción es requerida");
        assert_eq!(error.to_string(), "La descripción es requerida");
    }

    #[test]
    fn test_multiple_validation_errors_are_joined() {
        let error = ValidationError::Multiple(vec![
            "El usuario debe tener al menos 3 caracteres".to_string(),
            "Las contraseñas no coinciden".to_string(),
        ]);
        assert_eq!(
            error.to_string(),
            "El usuario debe tener al menos 3 caracteres, Las contraseñas no coinciden"
        );
    }

    #[test]
    fn test_not_found_error_names_entity() {
        let error = NotFoundError::request("req-1");
        assert_eq!(error.to_string(), "Request not found: req-1");
    }

    #[test]
    fn test_transition_error_wraps_transparently() {
        let error = InternalError::from(TransitionError::NotAllowed {
            from: RequestStatus::Rejected,
            to: RequestStatus::Delivered,
        });
        assert_eq!(
            error.to_string(),
            "Transition from Rechazada to Entregada is not allowed"
        );
    }
}
