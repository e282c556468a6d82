//! The logic module's entry-point table
//!
//! A module is nothing but plain function pointers. They cannot capture
//! an environment, so a module has nowhere to keep data of its own:
//! everything it remembers between frames goes through `GameState`.

use std::fmt;

use crate::game::frame::FrameContext;
use crate::game::state::GameState;
use crate::platform::assets::AssetSource;

/// Entry points a host drives. `update` runs every frame; the others run
/// on load, swap and diagnostics flush.
#[derive(Clone, Copy)]
pub struct LogicModule {
    pub name: &'static str,
    /// Must equal the host state's `STATE_SCHEMA_VERSION`
    pub schema_version: u32,
    /// Every load and reload. Must not depend on or change game progress.
    pub preload: fn(&mut GameState, &mut dyn AssetSource),
    pub update: fn(&mut GameState, &mut FrameContext<'_>),
    /// Once after a swap, never on the first load
    pub postload: fn(&mut GameState),
    pub flush_diagnostics: fn(&mut GameState),
}

impl fmt::Debug for LogicModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogicModule")
            .field("name", &self.name)
            .field("schema_version", &self.schema_version)
            .finish_non_exhaustive()
    }
}

/// Host-side source of new module builds
pub trait ModuleLoader {
    /// A freshly built module, if one became available since the last poll
    fn poll(&mut self) -> Option<LogicModule>;
}

/// Loader that hands out a queue of prepared modules, one per poll
#[derive(Debug, Default)]
pub struct QueuedLoader {
    pending: std::collections::VecDeque<LogicModule>,
}

impl QueuedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, module: LogicModule) {
        self.pending.push_back(module);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl ModuleLoader for QueuedLoader {
    fn poll(&mut self) -> Option<LogicModule> {
        self.pending.pop_front()
    }
}
