pub mod kind;
pub mod pool;
pub mod spawn;

pub use kind::{Category, EntityKind, KindInfo};
pub use pool::{Entity, EntityHandle, EntityPool, PoolError};
