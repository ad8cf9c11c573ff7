//! Application core: the command dispatcher tying the components together.

pub mod dispatcher;

pub use dispatcher::{AppEvent, Command, Dispatcher};
