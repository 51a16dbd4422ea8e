//! Error module for the izhinet library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
///
/// The simulation core itself does not fail: invalid links are refused with a boolean and
/// out-of-range resizes are no-ops. These errors come from configuration, parsing and I/O.
#[derive(Debug, PartialEq)]
pub enum SNNError {
    /// Error for invalid parameters, e.g., a negative number of neurons.
    InvalidParameter(String),
    /// Error for a neuron type name that is not in the registry.
    UnknownNeuronType(String),
    /// Error for malformed textual input.
    ParseError(String),
    /// Error for I/O operations.
    IOError(String),
}

impl fmt::Display for SNNError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SNNError::InvalidParameter(e) => write!(f, "Invalid parameters: {}", e),
            SNNError::UnknownNeuronType(e) => write!(f, "Unknown neuron type: {}", e),
            SNNError::ParseError(e) => write!(f, "Parse error: {}", e),
            SNNError::IOError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for SNNError {}

impl From<std::io::Error> for SNNError {
    fn from(e: std::io::Error) -> Self {
        SNNError::IOError(e.to_string())
    }
}

impl From<serde_json::Error> for SNNError {
    fn from(e: serde_json::Error) -> Self {
        SNNError::ParseError(e.to_string())
    }
}
