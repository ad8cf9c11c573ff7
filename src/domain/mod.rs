//! Domain layer for the SleepBunny companion.
//!
//! This module contains the core domain types shared across the crate,
//! independent of storage, scheduling, or host concerns: the mood variants of
//! the bunny, the error type, particle-aware text formatting, and the book
//! library.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`mood`]: Mood variant enum and its timing contract
//! - [`hangul`]: Korean particle selection for status messages
//! - [`book`]: Fixed bedtime book library

pub mod book;
pub mod error;
pub mod hangul;
pub mod mood;

pub use book::{Book, BookLibrary};
pub use error::{Result, SleepBunnyError};
pub use mood::MoodVariant;
