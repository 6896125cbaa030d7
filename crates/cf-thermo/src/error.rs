//! Gas property errors.

use thiserror::Error;

/// Result type for thermodynamic operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors that can occur during gas property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// Non-physical values (negative pressure, gamma below one, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Species name that the backend does not know.
    #[error("Unknown species: {name}")]
    UnknownSpecies { name: String },

    /// Composition string entry that could not be parsed.
    #[error("Malformed composition entry: {entry}")]
    MalformedComposition { entry: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ThermoError::NonPhysical { what: "pressure" };
        assert!(err.to_string().contains("pressure"));

        let err = ThermoError::UnknownSpecies {
            name: "C8H18".into(),
        };
        assert!(err.to_string().contains("C8H18"));
    }
}
