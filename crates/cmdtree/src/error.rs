//! Parse error taxonomy.
//!
//! Every failure the parser can produce is a [`ParseError`]: a stable
//! [`Code`] plus a free-form tag naming the offending option, token, or
//! arity detail. The code-to-message mapping lives here and nowhere else;
//! callers match on [`ParseError::code`] and present [`ParseError::tag`]
//! however they like.

use std::borrow::Cow;

use thiserror::Error;

/// Human-readable name of this error category.
pub const CATEGORY: &str = "cli arguments";

/// Stable machine-readable codes for parse failures.
///
/// The integer values are part of the public contract and never reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Code {
    /// Not a failure: a built-in handler (help, version) finished the run
    /// early and no action should be invoked.
    #[error("not an error")]
    NoError,

    /// Too few or too many positional tokens for the declared arguments.
    #[error("invalid number of arguments")]
    InvalidNumberOfArgs,

    /// An option that requires a value was given without one.
    #[error("value is expected")]
    ValueExpected,

    /// An option or subcommand name that no declaration matches.
    #[error("unexpected value")]
    UnexpectedValue,

    /// Input that cannot be interpreted at all, such as an unknown target
    /// given to the help built-in.
    #[error("invalid input")]
    InvalidInput,

    /// A textual value failed conversion to its bound destination type.
    #[error("error parsing option value")]
    OptionParsing,
}

impl Code {
    /// Stable integer value of this code.
    pub fn as_i32(self) -> i32 {
        match self {
            Code::NoError => 0,
            Code::InvalidNumberOfArgs => 1,
            Code::ValueExpected => 2,
            Code::UnexpectedValue => 3,
            Code::InvalidInput => 4,
            Code::OptionParsing => 5,
        }
    }
}

/// A structured parse failure: stable [`Code`] plus the offending name or
/// value.
///
/// The tag borrows from the token array or the declared specification
/// whenever possible; owned tags are only produced by user callbacks that
/// format their own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {tag}")]
pub struct ParseError<'a> {
    code: Code,
    tag: Cow<'a, str>,
}

impl<'a> ParseError<'a> {
    pub fn new(code: Code, tag: impl Into<Cow<'a, str>>) -> Self {
        Self {
            code,
            tag: tag.into(),
        }
    }

    /// The designed non-failure stop signal used by the help and version
    /// built-ins to short-circuit dispatch without running any action.
    pub fn stop(tag: impl Into<Cow<'a, str>>) -> Self {
        Self::new(Code::NoError, tag)
    }

    pub fn code(&self) -> Code {
        self.code
    }

    /// The offending option name, token, or arity detail.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether this is the [`Code::NoError`] stop signal rather than a
    /// real failure.
    pub fn is_stop(&self) -> bool {
        self.code == Code::NoError
    }

    /// Detach the error from the token buffer it borrows from.
    pub fn into_owned(self) -> ParseError<'static> {
        ParseError {
            code: self.code,
            tag: Cow::Owned(self.tag.into_owned()),
        }
    }
}

pub type ParseResult<'a, T> = Result<T, ParseError<'a>>;
