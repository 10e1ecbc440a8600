use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kitready_core::{Entity, MaterialId, PurchaseOrderId};

/// Purchase order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    Draft,
    Approved,
    PartiallyReceived,
    Received,
    Closed,
}

impl PurchaseOrderStatus {
    /// Orders in these states still have goods on the way.
    pub fn is_open(self) -> bool {
        matches!(
            self,
            PurchaseOrderStatus::Approved | PurchaseOrderStatus::PartiallyReceived
        )
    }
}

/// Purchase order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    pub line_no: u32,
    pub material_id: MaterialId,
    pub quantity: Decimal,
    /// Supplier-promised delivery date, if one was given.
    #[serde(default)]
    pub promised_date: Option<NaiveDate>,
}

/// Purchase order read model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    pub status: PurchaseOrderStatus,
    #[serde(default)]
    pub lines: Vec<PurchaseOrderLine>,
}

impl PurchaseOrder {
    pub fn new(id: PurchaseOrderId, status: PurchaseOrderStatus) -> Self {
        Self {
            id,
            status,
            lines: Vec::new(),
        }
    }

    /// Builder-style line append; line numbers are assigned sequentially.
    pub fn with_line(
        mut self,
        material_id: MaterialId,
        quantity: Decimal,
        promised_date: Option<NaiveDate>,
    ) -> Self {
        let line_no = (self.lines.len() as u32) + 1;
        self.lines.push(PurchaseOrderLine {
            line_no,
            material_id,
            quantity,
            promised_date,
        });
        self
    }
}

impl Entity for PurchaseOrder {
    type Id = PurchaseOrderId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
