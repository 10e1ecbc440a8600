//! Purchasing domain module: purchase orders and expected-arrival lookups.
//!
//! Read-side only. Purchase orders are reference data consumed by readiness
//! analysis to estimate when a missing material will arrive.

pub mod arrival;
pub mod book;
pub mod order;

pub use arrival::{ArrivalError, ArrivalLookup, ArrivalSource, NoArrivals, ResilientArrivals};
pub use book::PurchaseOrderBook;
pub use order::{PurchaseOrder, PurchaseOrderLine, PurchaseOrderStatus};
