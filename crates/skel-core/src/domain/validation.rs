use crate::domain::{entities::ClassSource, error::DomainError, value_objects::Parameter};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_class_source(source: &ClassSource) -> Result<(), DomainError> {
        source.validate()
    }

    /// Reject a parameter whose name is already in `existing`.
    ///
    /// Names are compared ignoring ASCII case, since getter names are
    /// derived by capitalising them.
    pub fn validate_new_parameter(
        existing: &[Parameter],
        name: &str,
    ) -> Result<(), DomainError> {
        if existing.iter().any(|p| p.name().eq_ignore_ascii_case(name)) {
            return Err(DomainError::DuplicateParameter {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Check a full parameter list, e.g. one given through `--param`.
    pub fn validate_parameters(parameters: &[Parameter]) -> Result<(), DomainError> {
        for (index, parameter) in parameters.iter().enumerate() {
            Self::validate_new_parameter(&parameters[..index], parameter.name())?;
        }
        Ok(())
    }
}
