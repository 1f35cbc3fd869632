//! Unified error type for t3-keyboard.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.
//!
//! Runtime input never fails: a full buffer, an empty backspace or a
//! stale timer are ordinary no-ops. Only construction-time problems
//! show up here.

use core::fmt;

/// Top-level error type used across the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// None of the three keyboard sets holds a layout.
    NoKeyboards,

    /// Configured maximum length exceeds the buffer capacity.
    MaxLength(usize),

    /// A fixed-width layout string is malformed.
    Layout(LayoutError),
}

/// Problems found while decoding a fixed-width layout string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// Decoded length in chars; must be 36, or 35 without the final terminator.
    Length(usize),
    /// A candidate follows an empty slot inside the same key.
    Gap { key: u8 },
    /// A candidate is a control character.
    Unprintable { key: u8 },
    /// The fourth slot of a key is not a terminator.
    Unterminated { key: u8 },
}

// Convenience conversions

impl From<LayoutError> for Error {
    fn from(e: LayoutError) -> Self {
        Error::Layout(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoKeyboards => f.write_str("no keyboard layouts defined"),
            Error::MaxLength(n) => write!(f, "max length {n} exceeds buffer capacity"),
            Error::Layout(e) => write!(f, "invalid layout: {e}"),
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Length(n) => write!(f, "expected 36 slots, found {n}"),
            LayoutError::Gap { key } => write!(f, "key {key} has a candidate after an empty slot"),
            LayoutError::Unprintable { key } => write!(f, "key {key} has an unprintable candidate"),
            LayoutError::Unterminated { key } => write!(f, "key {key} is not terminated"),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
