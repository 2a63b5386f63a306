#![feature(error_generic_member_access)]
#![deny(missing_docs)]

//! This crate defines error & result types for Tabula.
//! It also contains a variety of useful macros for error handling.

use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Deref;
use std::{env, fmt};

/// A string that can be used as an error message.
#[derive(Debug)]
pub struct ErrString(Cow<'static, str>);

#[allow(clippy::fallible_impl_from)]
impl<T> From<T> for ErrString
where
    T: Into<Cow<'static, str>>,
{
    #[allow(clippy::panic)]
    fn from(msg: T) -> Self {
        let msg: Cow<'static, str> = msg.into();
        if env::var("TABULA_PANIC_ON_ERR").as_deref().unwrap_or("") == "1" {
            panic!("{}\nBacktrace:\n{}", msg, Backtrace::capture());
        } else {
            Self(msg)
        }
    }
}

impl AsRef<str> for ErrString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ErrString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// The top-level error type for Tabula.
#[derive(thiserror::Error)]
#[non_exhaustive]
pub enum TabulaError {
    /// A index is out of bounds.
    #[error("index {0} out of bounds from {1} to {2}\nBacktrace:\n{3}")]
    OutOfBounds(usize, usize, usize, Backtrace),
    /// An invalid argument was provided.
    #[error("{0}\nBacktrace:\n{1}")]
    InvalidArgument(ErrString, Backtrace),
    /// An error occurred while serializing or deserializing.
    #[error("{0}\nBacktrace:\n{1}")]
    InvalidSerde(ErrString, Backtrace),
    /// An unimplemented function was called.
    #[error("function {0} not implemented for {1}\nBacktrace:\n{2}")]
    NotImplemented(ErrString, ErrString, Backtrace),
    /// A type mismatch occurred.
    #[error("expected type: {0} but instead got {1}\nBacktrace:\n{2}")]
    MismatchedTypes(ErrString, ErrString, Backtrace),
    /// A wrapper for other errors, carrying additional context.
    #[error("{0}: {1}")]
    Context(ErrString, #[source] Box<TabulaError>),
    /// A wrapper for errors from the FlatBuffers library.
    #[cfg(feature = "flatbuffers")]
    #[error("{0}\nBacktrace:\n{1}")]
    FlatBuffersError(#[from] flatbuffers::InvalidFlatbuffer, Backtrace),
    /// A wrapper for serialization errors from the FlexBuffers library.
    #[cfg(feature = "flexbuffers")]
    #[error("{0}\nBacktrace:\n{1}")]
    FlexBuffersSerError(#[from] flexbuffers::SerializationError, Backtrace),
    /// A wrapper for deserialization errors from the FlexBuffers library.
    #[cfg(feature = "flexbuffers")]
    #[error("{0}\nBacktrace:\n{1}")]
    FlexBuffersDeError(#[from] flexbuffers::DeserializationError, Backtrace),
}

impl TabulaError {
    /// Adds additional context to an error.
    pub fn with_context<T: Into<ErrString>>(self, msg: T) -> Self {
        TabulaError::Context(msg.into(), Box::new(self))
    }
}

impl Debug for TabulaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// A type alias for Results that return TabulaErrors as their error type.
pub type TabulaResult<T> = Result<T, TabulaError>;

/// A convenient macro for creating a TabulaError.
#[macro_export]
macro_rules! tabula_err {
    (OutOfBounds: $idx:expr, $start:expr, $stop:expr) => {{
        use std::backtrace::Backtrace;
        $crate::__private::must_use(
            $crate::TabulaError::OutOfBounds($idx, $start, $stop, Backtrace::capture())
        )
    }};
    (NotImplemented: $func:expr, $by_whom:expr) => {{
        use std::backtrace::Backtrace;
        $crate::__private::must_use(
            $crate::TabulaError::NotImplemented($func.into(), format!("{}", $by_whom).into(), Backtrace::capture())
        )
    }};
    (MismatchedTypes: $expected:expr, $actual:expr) => {{
        use std::backtrace::Backtrace;
        $crate::__private::must_use(
            $crate::TabulaError::MismatchedTypes($expected.to_string().into(), $actual.to_string().into(), Backtrace::capture())
        )
    }};
    ($variant:ident: $fmt:literal $(, $arg:expr)* $(,)?) => {{
        use std::backtrace::Backtrace;
        $crate::__private::must_use(
            $crate::TabulaError::$variant(format!($fmt, $($arg),*).into(), Backtrace::capture())
        )
    }};
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::tabula_err!(InvalidArgument: $fmt, $($arg),*)
    };
}

/// A convenient macro for returning a TabulaError.
#[macro_export]
macro_rules! tabula_bail {
    ($($tt:tt)+) => {
        return Err($crate::tabula_err!($($tt)+))
    };
}

/// A convenient macro for panicking with a TabulaError in the presence of a programmer error
/// (e.g., an invariant has been violated).
#[macro_export]
macro_rules! tabula_panic {
    (OutOfBounds: $idx:expr, $start:expr, $stop:expr) => {{
        $crate::tabula_panic!($crate::tabula_err!(OutOfBounds: $idx, $start, $stop))
    }};
    ($variant:ident: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::tabula_panic!($crate::tabula_err!($variant: $fmt, $($arg),*))
    };
    ($err:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
        let err: $crate::TabulaError = $err;
        $crate::tabula_panic!(err.with_context(format!($fmt, $($arg),*)))
    }};
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::tabula_panic!($crate::tabula_err!($fmt, $($arg),*))
    };
    ($err:expr) => {{
        #[allow(clippy::panic)]
        {
            let err: $crate::TabulaError = $err;
            panic!("{}", err)
        }
    }};
}

/// A trait for unwrapping a TabulaResult.
pub trait TabulaUnwrap {
    /// The type of the value being unwrapped.
    type Output;

    /// Returns the value of the result if it is Ok, otherwise panics with the error.
    /// Should be called only in contexts where the error condition represents a bug
    /// (programmer error).
    fn tabula_unwrap(self) -> Self::Output;
}

impl<T, E> TabulaUnwrap for Result<T, E>
where
    E: Into<TabulaError>,
{
    type Output = T;

    #[inline(always)]
    fn tabula_unwrap(self) -> Self::Output {
        self.map_err(Into::<TabulaError>::into)
            .unwrap_or_else(|err| tabula_panic!(err))
    }
}

/// A trait for expect-ing a TabulaResult or an Option.
pub trait TabulaExpect {
    /// The type of the value being expected.
    type Output;

    /// Returns the value of the result if it is Ok, otherwise panics with the error.
    /// Should be called only in contexts where the error condition represents a bug
    /// (programmer error).
    fn tabula_expect(self, msg: &str) -> Self::Output;
}

impl<T, E> TabulaExpect for Result<T, E>
where
    E: Into<TabulaError>,
{
    type Output = T;

    #[inline(always)]
    fn tabula_expect(self, msg: &str) -> Self::Output {
        self.map_err(Into::<TabulaError>::into)
            .unwrap_or_else(|e| tabula_panic!(e.with_context(msg.to_string())))
    }
}

impl<T> TabulaExpect for Option<T> {
    type Output = T;

    #[inline(always)]
    fn tabula_expect(self, msg: &str) -> Self::Output {
        self.unwrap_or_else(|| {
            let err = TabulaError::InvalidArgument(msg.to_string().into(), Backtrace::capture());
            tabula_panic!(err)
        })
    }
}

#[doc(hidden)]
pub mod __private {
    use crate::TabulaError;

    #[doc(hidden)]
    #[inline]
    #[must_use]
    pub const fn must_use(err: TabulaError) -> TabulaError {
        err
    }
}
