use thiserror::Error;

/// Failure taxonomy shared by the dictionary and the columnar codec.
///
/// Every variant is fatal to the single record or operation that raised it; the
/// codec performs no retries. Messages carry the residue/atom context needed to
/// locate the offending input inside a bulk pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {details}")]
    Configuration { details: String },

    #[error("residue name '{name}' is not present in the bound dictionary")]
    Lookup { name: String },

    #[error("validation failed: {details}")]
    Validation { details: String },

    #[error("unsupported operation: {details}")]
    Unsupported { details: String },
}

impl Error {
    pub fn configuration(details: impl Into<String>) -> Self {
        Self::Configuration {
            details: details.into(),
        }
    }

    pub fn lookup(name: impl Into<String>) -> Self {
        Self::Lookup { name: name.into() }
    }

    pub fn validation(details: impl Into<String>) -> Self {
        Self::Validation {
            details: details.into(),
        }
    }

    pub fn unsupported(details: impl Into<String>) -> Self {
        Self::Unsupported {
            details: details.into(),
        }
    }
}
