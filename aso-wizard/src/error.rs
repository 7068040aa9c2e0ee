use crate::form::FormField;
use crate::state::WizardPhase;
use aso_common::AsoError;
use std::fmt;

/// One inline message attached to a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// Every invalid field of a submission, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: FormField, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: FormField, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for `field`, if it failed.
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Drop the message for `field`, e.g. once the user edits it.
    pub fn clear(&mut self, field: FormField) {
        self.errors.retain(|e| e.field != field);
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing was pushed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field.label(), e.message)?;
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum WizardError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Generation(#[from] AsoError),

    /// A generation call is still in flight.
    #[error("a request is already being processed")]
    Busy,

    #[error("cannot {action} while {phase}")]
    InvalidAction {
        action: &'static str,
        phase: WizardPhase,
    },

    #[error("all {max} feedback rounds have been used")]
    RevisionLimitReached { max: u8 },
}

impl From<ValidationErrors> for WizardError {
    fn from(errors: ValidationErrors) -> Self {
        WizardError::Validation(errors)
    }
}

impl WizardError {
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            WizardError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
