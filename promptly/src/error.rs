//! # Errors
//!
//! Every fallible operation in this crate returns [`PromptError`].
//!
//! Bad user input is **not** an error: inside a prompt loop a line that
//! fails validation becomes a [`Rejection`](crate::utils::Rejection) and the
//! user is asked again. `PromptError` is reserved for problems the user
//! cannot fix by typing something else (a malformed type name, an invalid
//! regex, a closed input stream) and for direct calls to the converter.
use crate::utils::TypeDescriptor;

/// Represents possible errors raised while parsing type names, converting
/// input or driving a prompt.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// The requested bit width is below 8 or not below 128.
    #[error("Invalid bit width {bits} => must be at least 8 and below 128")]
    BitOutOfRange { bits: u64 },

    /// The requested bit width is not a power of two.
    #[error("Invalid bit width {bits} => must be a power of two")]
    BitNotPowerOfTwo { bits: u64 },

    /// The raw text could not be converted into the requested type.
    #[error("Cannot convert '{input}' to {target}: {reason}")]
    Conversion {
        input: String,
        target: TypeDescriptor,
        reason: String,
    },

    /// The validation pattern itself does not compile.
    #[error("Regex '{pattern}' is invalid")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The line source reached end of input before an answer was accepted.
    #[error("Input closed before a valid answer was given")]
    InputClosed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PromptError {
    /// Returns `true` for errors that indicate a setup defect in the calling
    /// code rather than bad data from the user.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidRegex { .. } | Self::BitOutOfRange { .. } | Self::BitNotPowerOfTwo { .. }
        )
    }
}
