use thiserror::Error;

use crate::entity::pool::PoolError;
use crate::memory::arena::ArenaError;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Arena error: {0}")]
    Arena(#[from] ArenaError),

    #[error("Entity pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("State schema v{state} is incompatible with module schema v{module}")]
    SchemaMismatch { state: u32, module: u32 },

    #[error("No logic module loaded")]
    NoModule,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
