//! Hot-reload boundary between the persistent host and swappable logic

pub mod host;
pub mod module;

pub use host::ModuleHost;
pub use module::{LogicModule, ModuleLoader, QueuedLoader};
