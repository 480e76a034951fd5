//! Composer errors.

use std::error::Error;
use std::fmt;

use resources::FontError;


/// Error from an operation invoked on the `Composer` at the wrong time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComposeError {
    /// There is no picture to make a meme from.
    NoImage,
    /// The screen has been configured without the share button.
    ShareDisabled,
    /// Previous meme is still being shared.
    SharePending,
}

impl Error for ComposeError {}

impl fmt::Display for ComposeError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ComposeError::NoImage => write!(fmt, "no picture has been picked"),
            ComposeError::ShareDisabled => write!(fmt, "sharing is disabled"),
            ComposeError::SharePending => write!(fmt, "previous meme is still being shared"),
        }
    }
}


/// Error that resulted from misconfiguration of the `Composer` via its `Builder`.
#[derive(Debug)]
pub enum BuildError {
    /// No `ImageSource` has been given.
    NoImageSource,
    /// No `ShareSink` has been given.
    NoShareSink,
    /// Font of given name couldn't be loaded.
    Font(String, FontError),
    /// Invalid value or combination of configuration parameters.
    Invalid(String),
}

impl BuildError {
    #[inline]
    pub(super) fn conflict<P: fmt::Display, Q: fmt::Display>(first: P, second: Q) -> Self {
        BuildError::Invalid(format!("cannot set both {} and {}", first, second))
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            BuildError::Font(_, ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            BuildError::NoImageSource => write!(fmt, "no image source configured"),
            BuildError::NoShareSink => write!(fmt, "no share sink configured"),
            BuildError::Font(ref name, ref e) => write!(fmt, "cannot load font `{}`: {}", name, e),
            BuildError::Invalid(ref msg) => write!(fmt, "invalid configuration: {}", msg),
        }
    }
}
