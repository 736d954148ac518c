//! Error types for signature parsing.
//!
//! Signatures that fall outside the supported grammar are reported per
//! function instead of aborting the whole run. The generator records them as
//! diagnostics together with the file they came from.

use thiserror::Error;

/// Reasons a raw signature could not be turned into a [`crate::Signature`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The text contains no `(`, so there is no parameter list.
    #[error("missing parameter list in `{raw}`")]
    MissingParameterList { raw: String },

    /// The parameter list was opened but never closed.
    #[error("unterminated parameter list in `{raw}`")]
    UnterminatedParameterList { raw: String },

    /// Nothing precedes the parameter list, so there is no function name.
    #[error("missing function name in `{raw}`")]
    MissingName { raw: String },

    /// An opaque-marker parameter has no `<T>` type argument.
    #[error("cannot extract type argument from parameter type `{ty}` in `{raw}`")]
    MissingTypeArgument { ty: String, raw: String },
}

impl SignatureError {
    /// The raw signature text that failed.
    pub fn raw(&self) -> &str {
        match self {
            SignatureError::MissingParameterList { raw }
            | SignatureError::UnterminatedParameterList { raw }
            | SignatureError::MissingName { raw }
            | SignatureError::MissingTypeArgument { raw, .. } => raw,
        }
    }
}

pub type SignatureResult<T> = Result<T, SignatureError>;
