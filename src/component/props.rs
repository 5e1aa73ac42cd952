//! Props validation for components
//!
//! Validators are small, composable checks run before a component renders
//! new props. A failed check keeps the previously rendered state.

use std::fmt::{self, Display};

/// Error indicating validation problems with props
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropValidationError {
    /// A property had an invalid value
    InvalidValue {
        /// Name of the property
        name: String,
        /// Description of the validation error
        reason: String,
    },
    /// A passthrough attribute collides with one the component owns
    ReservedAttribute(String),
    /// Multiple validation errors
    Multiple(Vec<PropValidationError>),
}

impl Display for PropValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValidationError::InvalidValue { name, reason } => {
                write!(f, "Invalid value for property {name}: {reason}")
            }
            PropValidationError::ReservedAttribute(name) => {
                write!(f, "Attribute {name} is managed by the component")
            }
            PropValidationError::Multiple(errors) => {
                writeln!(f, "Multiple validation errors:")?;
                for (i, error) in errors.iter().enumerate() {
                    writeln!(f, "  {}. {}", i + 1, error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for PropValidationError {}

/// Trait for props validation
pub trait PropValidator<P> {
    /// Validate the props
    fn validate(&self, props: &P) -> Result<(), PropValidationError>;
}

impl<P, F> PropValidator<P> for F
where
    F: Fn(&P) -> Result<(), PropValidationError>,
{
    fn validate(&self, props: &P) -> Result<(), PropValidationError> {
        self(props)
    }
}

/// A property validator composed of multiple validators
pub struct CompositeValidator<P> {
    /// The validators to run
    validators: Vec<Box<dyn PropValidator<P>>>,
}

impl<P> CompositeValidator<P> {
    /// Create a new composite validator
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Add a validator to the composite
    pub fn add<V>(mut self, validator: V) -> Self
    where
        V: PropValidator<P> + 'static,
    {
        self.validators.push(Box::new(validator));
        self
    }
}

impl<P> PropValidator<P> for CompositeValidator<P> {
    fn validate(&self, props: &P) -> Result<(), PropValidationError> {
        let mut errors: Vec<_> = self
            .validators
            .iter()
            .filter_map(|validator| validator.validate(props).err())
            .collect();

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(PropValidationError::Multiple(errors)),
        }
    }
}

impl<P> Default for CompositeValidator<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject `Some("")` (or whitespace only) for an optional string prop
pub fn non_blank(name: &str, value: Option<&str>) -> Result<(), PropValidationError> {
    match value {
        Some(value) if value.trim().is_empty() => Err(PropValidationError::InvalidValue {
            name: name.to_string(),
            reason: "must not be empty".to_string(),
        }),
        _ => Ok(()),
    }
}

/// Reject a value that would split into several tokens of a space-separated list
///
/// Blank values pass; [`non_blank`] reports those.
pub fn single_token(name: &str, value: Option<&str>) -> Result<(), PropValidationError> {
    match value {
        Some(value)
            if !value.trim().is_empty() && value.bytes().any(|b| b.is_ascii_whitespace()) =>
        {
            Err(PropValidationError::InvalidValue {
                name: name.to_string(),
                reason: "must not contain whitespace".to_string(),
            })
        }
        _ => Ok(()),
    }
}
