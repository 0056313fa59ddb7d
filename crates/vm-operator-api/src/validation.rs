//! Field-level validation
//!
//! The CRD types accept any combination of optional fields. The rules
//! documented on the fields (mutually exclusive providers, unique names,
//! port ranges) are checked here so that admission webhooks and tests can
//! share them. Validators collect every violation instead of stopping at the
//! first.

use std::collections::HashSet;
use std::fmt;
use std::net::IpAddr;

use thiserror::Error;
use tracing::debug;

use crate::quantity::parse_milli;

/// A single invalid field
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    /// Field must be set
    #[error("{field}: required value")]
    Required {
        /// Dotted path of the field
        field: String,
    },

    /// Field value is not acceptable
    #[error("{field}: invalid value {value:?}: {reason}")]
    Invalid {
        /// Dotted path of the field
        field: String,
        /// Offending value
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Value repeated in a list that must be unique
    #[error("{field}: duplicate value {value:?}")]
    Duplicate {
        /// Dotted path of the list
        field: String,
        /// Repeated value
        value: String,
    },

    /// More than one of a set of exclusive fields is set
    #[error("{}: fields are mutually exclusive", .fields.join(", "))]
    MutuallyExclusive {
        /// Dotted paths of the fields that are set
        fields: Vec<String>,
    },
}

impl FieldError {
    /// A required field is missing.
    pub fn required(field: impl Into<String>) -> Self {
        Self::Required { field: field.into() }
    }

    /// A field has an unacceptable value.
    pub fn invalid(field: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// A value is repeated.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Fields that may not be set together.
    pub fn mutually_exclusive<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MutuallyExclusive {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Dotted path of the (first) offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::Required { field } | Self::Invalid { field, .. } | Self::Duplicate { field, .. } => field,
            Self::MutuallyExclusive { fields } => fields.first().map_or("", String::as_str),
        }
    }
}

/// Every violation found while validating one object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// Record one violation.
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Record several violations.
    pub fn extend(&mut self, errors: impl IntoIterator<Item = FieldError>) {
        self.0.extend(errors);
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Violations in the order they were found.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            debug!(count = self.len(), "Validation failed");
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Types that can check their own documented invariants
pub trait Validate {
    /// Collect every violation; `Err` when there is at least one.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Report every repeated name under `field`.
pub(crate) fn check_unique<'a>(
    errors: &mut ValidationErrors,
    field: &str,
    names: impl IntoIterator<Item = &'a str>,
) {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            errors.push(FieldError::duplicate(field, name));
        }
    }
}

/// RFC 1123 DNS label: lowercase alphanumerics and '-', at most 63 characters,
/// starting and ending with an alphanumeric.
pub(crate) fn is_dns_label(value: &str) -> bool {
    let bytes = value.as_bytes();
    !bytes.is_empty()
        && bytes.len() <= 63
        && bytes.iter().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
        && bytes[0] != b'-'
        && bytes[bytes.len() - 1] != b'-'
}

pub(crate) fn check_port(errors: &mut ValidationErrors, field: &str, port: i32) {
    if !(1..=65535).contains(&port) {
        errors.push(FieldError::invalid(field, port, "must be between 1 and 65535, inclusive"));
    }
}

/// Parse a quantity, reporting a field error on failure.
pub(crate) fn check_quantity(errors: &mut ValidationErrors, field: &str, value: &str) -> Option<i128> {
    match parse_milli(value) {
        Ok(milli) => Some(milli),
        Err(err) => {
            errors.push(FieldError::invalid(field, value, err.to_string()));
            None
        }
    }
}

/// Parse `IP/prefix`, returning the address on success.
pub(crate) fn parse_cidr(value: &str) -> Result<IpAddr, String> {
    let (address, prefix) = value
        .split_once('/')
        .ok_or_else(|| "must be an IP address with a prefix length".to_string())?;
    let ip: IpAddr = address.parse().map_err(|_| format!("{address:?} is not an IP address"))?;
    let prefix: u8 = prefix.parse().map_err(|_| format!("{prefix:?} is not a prefix length"))?;
    let max = if ip.is_ipv4() { 32 } else { 128 };
    if prefix > max {
        return Err(format!("prefix length must be at most {max}"));
    }
    Ok(ip)
}
