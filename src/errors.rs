//! Crate-specific error and result types, plus common conversions.

use ::std::fmt::{self, Display};

/// Result type returned by fallible configuration and assistive calls.
pub type Result<T> = ::std::result::Result<T, Error>;

/// The category of failure. Implements [`Display`] with a short description
/// suitable for logs and user-facing notices.
///
/// [`Display`]: std::fmt::Display
#[derive(Clone, Debug, PartialEq, Eq, ::thiserror::Error)]
pub enum ErrorKind {
    /// A layout table violated one of its invariants (no rows, an empty row,
    /// or a label which is not a single printable character).
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// The platform does not provide the requested assistive capability.
    #[error("{capability} is not supported on this platform")]
    Unsupported { capability: &'static str },

    /// The speech recognition service reported a failure.
    #[error("speech recognition failed: {0}")]
    Recognition(String),

    /// The speech synthesis service reported a failure.
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
}

/// Error type for the crate. The error carries the failure category and an
/// optional description of what was happening at the time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    /// The failure category.
    kind: ErrorKind,

    /// An optional context information which describes what was happening
    /// at the time error.
    context: Option<String>,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { kind, context } = &self;

        if let Some(context) = context {
            write!(f, "{context}\nCaused by:\n    {kind}")
        } else {
            write!(f, "{kind}")
        }
    }
}

impl ::std::error::Error for Error {
    fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }
}

impl Error {
    /// Returns the failure category.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the attached context message, if any.
    pub fn context_message(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Returns `true` if the error reports a missing platform capability.
    pub fn is_unsupported(&self) -> bool {
        matches!(self.kind, ErrorKind::Unsupported { .. })
    }
}

/// A crate-private trait which allows context information to be attached to
/// fallible types.
///
/// Collaborator failures tend to be terse ("not-allowed", "network"); the
/// context records which user action triggered them.
pub(crate) trait Context<T> {
    /// Attach a context message to a fallible type and return crate error.
    fn context(self, ctx: impl AsRef<str>) -> Result<T>
    where
        Self: Sized;
}

impl<T> Context<T> for Result<T> {
    fn context(mut self, ctx: impl AsRef<str>) -> Result<T>
    where
        Self: Sized,
    {
        if let Err(err) = &mut self {
            err.context = Some(ctx.as_ref().to_owned());
        }
        self
    }
}

impl<T> Context<T> for ::std::result::Result<T, ErrorKind> {
    fn context(self, ctx: impl AsRef<str>) -> Result<T> {
        self.map_err(|kind| Error {
            kind,
            context: Some(ctx.as_ref().to_owned()),
        })
    }
}
