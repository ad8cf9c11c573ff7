//! Error types for the SleepBunny companion.
//!
//! This module defines the centralized error type [`SleepBunnyError`] and a type
//! alias [`Result`] for convenient error handling throughout the crate. All errors
//! are implemented using the `thiserror` crate for automatic `Error` trait
//! implementation.

use thiserror::Error;

/// The main error type for SleepBunny operations.
///
/// This enum consolidates all error conditions that can occur while the
/// companion is running, from storage operations to invalid user input.
/// Variants either wrap underlying errors from external crates using `#[from]`
/// or carry a description of what went wrong.
///
/// Playback-engine failures are deliberately *not* represented here: a sound
/// that cannot start degrades to a simulated session instead of surfacing an
/// error, so the companion experience continues regardless of missing media.
#[derive(Debug, Error)]
pub enum SleepBunnyError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the persisted document fails.
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A mood variant name could not be parsed.
    ///
    /// Occurs when a caller asks for a bunny state that does not exist. The
    /// machine is left untouched.
    #[error("Unknown mood variant: {0}")]
    UnknownMood(String),

    /// A sound id has no entry in the sound catalog.
    ///
    /// Occurs when a play command names a sound the catalog does not know.
    /// No session is torn down or created.
    #[error("Unknown sound: {0}")]
    UnknownSound(String),

    /// A book id has no entry in the book library.
    #[error("Unknown book: {0}")]
    UnknownBook(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when the configuration file cannot be read or parsed.
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for SleepBunny operations.
///
/// This is a type alias for `std::result::Result<T, SleepBunnyError>` that
/// simplifies function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, SleepBunnyError>;
