use std::fmt;

/// Represents the errors that can occur while assembling a waste classifier.
///
/// Classification itself never fails; these only surface from the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// Error occurred during the build phase
    BuildError(String),
    /// Error occurred due to invalid rule parameters
    ValidationError(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuildError(msg) => write!(f, "Build error: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ClassifierError {}
