//! Per-frame input consumption and the effects clicks have on the world

pub mod effects;
pub mod gate;

pub use effects::{place_building, strike, StrikeOutcome};
pub use gate::ConsumptionGate;
