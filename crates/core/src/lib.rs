//! Domain foundation shared by every kitready crate.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{BomId, BomLineId, MachineId, MaterialId, ProjectId, PurchaseOrderId, TenantId};
