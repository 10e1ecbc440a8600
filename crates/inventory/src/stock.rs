//! Reference availability computation over an in-memory stock picture.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kitready_core::{DomainError, DomainResult, MaterialId};

use crate::availability::{AvailabilityResolver, AvailabilitySnapshot};

/// On-hand and reserved quantity of one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockPosition {
    pub material_id: MaterialId,
    pub on_hand: Decimal,
    #[serde(default)]
    pub allocated: Decimal,
}

/// Goods on their way in, expected to land on `expected_on`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundReceipt {
    pub material_id: MaterialId,
    pub quantity: Decimal,
    pub expected_on: NaiveDate,
}

/// In-memory stock picture implementing [`AvailabilityResolver`].
///
/// For a check date: `in_transit` counts receipts expected on or before that
/// date and `available = on_hand - allocated + in_transit`. Materials with no
/// recorded position resolve to an all-zero snapshot.
#[derive(Debug, Clone, Default)]
pub struct StockLedger {
    positions: HashMap<MaterialId, StockPosition>,
    inbound: Vec<InboundReceipt>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stock position for a material.
    pub fn set_position(&mut self, position: StockPosition) -> DomainResult<()> {
        if position.on_hand.is_sign_negative() {
            return Err(DomainError::validation("on_hand cannot be negative"));
        }
        if position.allocated.is_sign_negative() {
            return Err(DomainError::validation("allocated cannot be negative"));
        }
        self.positions.insert(position.material_id, position);
        Ok(())
    }

    pub fn add_receipt(&mut self, receipt: InboundReceipt) -> DomainResult<()> {
        if receipt.quantity <= Decimal::ZERO {
            return Err(DomainError::validation("receipt quantity must be positive"));
        }
        self.inbound.push(receipt);
        Ok(())
    }

    pub fn position(&self, material_id: MaterialId) -> Option<&StockPosition> {
        self.positions.get(&material_id)
    }

    fn in_transit_by(&self, material_id: MaterialId, check_date: NaiveDate) -> Decimal {
        self.inbound
            .iter()
            .filter(|r| r.material_id == material_id && r.expected_on <= check_date)
            .map(|r| r.quantity)
            .sum()
    }
}

impl AvailabilityResolver for StockLedger {
    fn resolve(&self, material_id: MaterialId, check_date: NaiveDate) -> AvailabilitySnapshot {
        let (stock, allocated) = self
            .positions
            .get(&material_id)
            .map(|p| (p.on_hand, p.allocated))
            .unwrap_or((Decimal::ZERO, Decimal::ZERO));
        let in_transit = self.in_transit_by(material_id, check_date);

        AvailabilitySnapshot::new(stock, allocated, in_transit, stock - allocated + in_transit)
    }
}
