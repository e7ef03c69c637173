// ins_core/src/error.rs

//! Error types for INS parameter handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParamsError {
    /// A calibration value failed the validation step. `field` is the dotted
    /// path of the first offending field, e.g. `inertial.gyro.scale_factor`.
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// The configuration sources could not be deserialized into parameters.
    #[error("failed to extract parameters: {0}")]
    Extract(#[from] figment::Error),
}

impl ParamsError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ParamsError::InvalidConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the offending field path for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            ParamsError::InvalidConfiguration { field, .. } => Some(field),
            ParamsError::Extract(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParamsError>;
