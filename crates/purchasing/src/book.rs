use chrono::NaiveDate;

use kitready_core::{MaterialId, PurchaseOrderId};

use crate::arrival::{ArrivalError, ArrivalSource};
use crate::order::PurchaseOrder;

/// In-memory collection of purchase orders answering arrival queries.
#[derive(Debug, Clone, Default)]
pub struct PurchaseOrderBook {
    orders: Vec<PurchaseOrder>,
}

impl PurchaseOrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an order (keyed by id).
    pub fn upsert(&mut self, order: PurchaseOrder) {
        match self.orders.iter_mut().find(|o| o.id == order.id) {
            Some(existing) => *existing = order,
            None => self.orders.push(order),
        }
    }

    pub fn get(&self, id: PurchaseOrderId) -> Option<&PurchaseOrder> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn orders(&self) -> &[PurchaseOrder] {
        &self.orders
    }

    /// Earliest promised date for a material across open orders.
    pub fn earliest_promised(&self, material_id: MaterialId) -> Option<NaiveDate> {
        self.orders
            .iter()
            .filter(|o| o.status.is_open())
            .flat_map(|o| o.lines.iter())
            .filter(|l| l.material_id == material_id)
            .filter_map(|l| l.promised_date)
            .min()
    }
}

impl FromIterator<PurchaseOrder> for PurchaseOrderBook {
    fn from_iter<I: IntoIterator<Item = PurchaseOrder>>(iter: I) -> Self {
        let mut book = Self::new();
        for order in iter {
            book.upsert(order);
        }
        book
    }
}

impl ArrivalSource for PurchaseOrderBook {
    fn earliest_arrival(&self, material_id: MaterialId) -> Result<Option<NaiveDate>, ArrivalError> {
        Ok(self.earliest_promised(material_id))
    }
}
