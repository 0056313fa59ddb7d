//! oVirt XML marshaling errors

use thiserror::Error;

/// Errors that can occur while writing objects as XML
#[derive(Debug, Error)]
pub enum XmlError {
    /// `write_one` was handed no object
    #[error("input object pointer is nil")]
    NilInput,

    /// The underlying sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Text contains a character XML 1.0 cannot represent
    #[error("element {element:?} contains character U+{code:04X}, which is not allowed in XML")]
    InvalidCharacter {
        /// Element (or element carrying the attribute) being written
        element: String,
        /// Code point of the offending character
        code: u32,
    },

    /// Buffered output was not UTF-8
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Returned when a string is not a known wire value of an enum
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {kind} value {value:?}")]
pub struct ParseEnumError {
    /// Enum type name, e.g. `"CpuMode"`
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}
