//! The persistent side of the reload boundary
//!
//! `ModuleHost` owns the game state in a box whose address never changes,
//! and drives whichever logic module is currently attached.

use std::time::Instant;

use crate::core::config::CoreConfig;
use crate::core::error::{GameError, Result};
use crate::game::frame::{FrameContext, HostRequests};
use crate::game::state::GameState;
use crate::platform::assets::AssetSource;
use crate::platform::input::InputSnapshot;
use crate::reload::module::{LogicModule, ModuleLoader};
use crate::render::draw::DrawList;

#[derive(Debug)]
pub struct ModuleHost {
    state: Box<GameState>,
    module: Option<LogicModule>,
    loads: u32,
}

impl ModuleHost {
    pub fn new(config: CoreConfig) -> Result<Self> {
        Ok(Self::with_state(GameState::new(config)?))
    }

    pub fn with_state(state: GameState) -> Self {
        Self {
            state: Box::new(state),
            module: None,
            loads: 0,
        }
    }

    /// Attach a module.
    ///
    /// Refuses a module built against a different state schema and keeps
    /// the current one. Runs `preload` on every load and `postload` only
    /// when replacing an attached module.
    pub fn load(&mut self, module: LogicModule, assets: &mut dyn AssetSource) -> Result<()> {
        if module.schema_version != self.state.schema_version {
            tracing::warn!(
                "Refusing module '{}': schema v{} does not match state v{}",
                module.name,
                module.schema_version,
                self.state.schema_version
            );
            return Err(GameError::SchemaMismatch {
                state: self.state.schema_version,
                module: module.schema_version,
            });
        }

        let swapping = self.module.is_some();
        (module.preload)(&mut self.state, assets);
        if swapping {
            (module.postload)(&mut self.state);
        }
        self.module = Some(module);
        self.loads += 1;

        if swapping {
            tracing::info!("Reloaded module '{}' (load #{})", module.name, self.loads);
        } else {
            tracing::info!("Loaded module '{}'", module.name);
        }
        Ok(())
    }

    /// Swap in a new build if the loader has one. Returns whether a swap
    /// happened.
    pub fn reload_from(
        &mut self,
        loader: &mut dyn ModuleLoader,
        assets: &mut dyn AssetSource,
    ) -> Result<bool> {
        match loader.poll() {
            Some(module) => self.load(module, assets).map(|_| true),
            None => Ok(false),
        }
    }

    /// Run one frame of the attached module inside the profiling span
    pub fn frame(
        &mut self,
        input: &InputSnapshot,
        assets: &mut dyn AssetSource,
        draw: &mut DrawList,
    ) -> Result<HostRequests> {
        let module = self.module.ok_or(GameError::NoModule)?;

        let span = tracing::info_span!("frame", n = self.state.frame + 1);
        let _enter = span.enter();
        let start = Instant::now();

        let mut ctx = FrameContext::new(input, assets, draw);
        (module.update)(&mut self.state, &mut ctx);
        let requests = ctx.requests;

        self.state.stats.record(start.elapsed());
        Ok(requests)
    }

    pub fn flush_diagnostics(&mut self) -> Result<()> {
        let module = self.module.ok_or(GameError::NoModule)?;
        (module.flush_diagnostics)(&mut self.state);
        Ok(())
    }

    pub fn module(&self) -> Option<&LogicModule> {
        self.module.as_ref()
    }

    /// Number of successful loads, first load included
    pub fn loads(&self) -> u32 {
        self.loads
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
