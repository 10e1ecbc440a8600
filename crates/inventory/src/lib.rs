//! Inventory domain module: material master data and availability.
//!
//! This crate contains read-side business rules for material availability,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod availability;
pub mod material;
pub mod stock;

pub use availability::{AvailabilityResolver, AvailabilitySnapshot};
pub use material::{Material, MaterialCatalog};
pub use stock::{InboundReceipt, StockLedger, StockPosition};
