//! Observability: structured tracing for the whole crate.

pub mod init;

pub use init::init_tracing;
