use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kitready_core::MaterialId;

/// Point-in-time availability breakdown for one material.
///
/// Ephemeral: produced per (material, check date), never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AvailabilitySnapshot {
    pub stock: Decimal,
    pub allocated: Decimal,
    pub in_transit: Decimal,
    pub available: Decimal,
}

impl AvailabilitySnapshot {
    pub fn new(
        stock: Decimal,
        allocated: Decimal,
        in_transit: Decimal,
        available: Decimal,
    ) -> Self {
        Self {
            stock,
            allocated,
            in_transit,
            available,
        }
    }
}

/// Resolves how much of a material is available as of a check date.
pub trait AvailabilityResolver {
    fn resolve(&self, material_id: MaterialId, check_date: NaiveDate) -> AvailabilitySnapshot;
}

impl<R> AvailabilityResolver for &R
where
    R: AvailabilityResolver + ?Sized,
{
    fn resolve(&self, material_id: MaterialId, check_date: NaiveDate) -> AvailabilitySnapshot {
        (**self).resolve(material_id, check_date)
    }
}
