//! Settlement tables - inventory counts and building data

pub mod buildings;
pub mod inventory;

pub use buildings::{BuildingData, BuildingTable};
pub use inventory::Inventory;
