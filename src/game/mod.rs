//! Game state container and the logic module that drives it

pub mod frame;
pub mod state;

pub use frame::{FrameContext, HostRequests};
pub use state::{FrameStats, GameState, STATE_SCHEMA_VERSION};

use crate::reload::module::LogicModule;

/// Entry-point table for the built-in logic
pub fn logic_module() -> LogicModule {
    LogicModule {
        name: "tilecraft-core",
        schema_version: STATE_SCHEMA_VERSION,
        preload: frame::preload,
        update: frame::update,
        postload: frame::postload,
        flush_diagnostics: frame::flush_diagnostics,
    }
}
