//! In-crate test fixture wiring the reference collaborators together.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use kitready_core::{BomId, MachineId, MaterialId, ProjectId, PurchaseOrderId};
use kitready_inventory::{Material, MaterialCatalog, StockLedger, StockPosition};
use kitready_purchasing::{
    PurchaseOrder, PurchaseOrderBook, PurchaseOrderStatus, ResilientArrivals,
};

use crate::alert::ThresholdAlertClassifier;
use crate::bom::{Bom, BomLineItem, Machine, Project};
use crate::config::ReadinessConfig;
use crate::engine::{ReadinessRequest, ReadinessSources};
use crate::line::LineContext;
use crate::validate::ProjectDirectory;

pub(crate) struct Fixture {
    pub check_date: NaiveDate,
    pub config: ReadinessConfig,
    pub materials: HashMap<MaterialId, Material>,
    pub stock: StockLedger,
    pub arrivals: ResilientArrivals<PurchaseOrderBook>,
    pub alerts: ThresholdAlertClassifier,
    pub project: Project,
    pub bom: Bom,
    pub machine: Machine,
}

impl MaterialCatalog for Fixture {
    fn material(&self, id: MaterialId) -> Option<Material> {
        self.materials.get(&id).cloned()
    }
}

impl ProjectDirectory for Fixture {
    fn project(&self, id: ProjectId) -> Option<Project> {
        (self.project.id == id).then(|| self.project.clone())
    }

    fn bom(&self, id: BomId) -> Option<Bom> {
        (self.bom.id == id).then(|| self.bom.clone())
    }

    fn machine(&self, id: MachineId) -> Option<Machine> {
        (self.machine.id == id).then(|| self.machine.clone())
    }
}

impl Fixture {
    /// Fixture checking availability on 2025-03-`day`.
    pub fn new(day: u32) -> Self {
        let project = Project {
            id: ProjectId::new(),
            code: "PRJ-1".to_string(),
            name: "Test project".to_string(),
        };
        let bom = Bom {
            id: BomId::new(),
            project_id: project.id,
            name: "Main BOM".to_string(),
            lines: Vec::new(),
        };
        let machine = Machine {
            id: MachineId::new(),
            project_id: project.id,
            serial_no: "SN-0001".to_string(),
        };
        Self {
            check_date: Self::march(day),
            config: ReadinessConfig::default(),
            materials: HashMap::new(),
            stock: StockLedger::new(),
            arrivals: ResilientArrivals::new(PurchaseOrderBook::new()),
            alerts: ThresholdAlertClassifier::default(),
            project,
            bom,
            machine,
        }
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    pub fn date(&self, day: u32) -> NaiveDate {
        Self::march(day)
    }

    /// Register a material with `available` units on hand.
    pub fn add_material(&mut self, code: &str, available: Decimal) -> MaterialId {
        let id = MaterialId::new();
        self.materials
            .insert(id, Material::new(id, code, format!("{code} (test)")));
        self.stock
            .set_position(StockPosition {
                material_id: id,
                on_hand: available,
                allocated: Decimal::ZERO,
            })
            .unwrap();
        id
    }

    /// Add an approved purchase order promising `material` on `date`.
    pub fn promise(&mut self, material: MaterialId, date: NaiveDate) {
        self.arrivals.source_mut().upsert(
            PurchaseOrder::new(PurchaseOrderId::new(), PurchaseOrderStatus::Approved)
                .with_line(material, Decimal::ONE, Some(date)),
        );
    }

    pub fn ctx(&self) -> LineContext<'_> {
        LineContext {
            check_date: self.check_date,
            config: &self.config,
            materials: self,
            availability: &self.stock,
            alerts: &self.alerts,
            arrivals: &self.arrivals,
        }
    }

    pub fn push_line(&mut self, line: BomLineItem) {
        self.bom.lines.push(line);
    }

    pub fn request(&self) -> ReadinessRequest {
        ReadinessRequest {
            project_id: self.project.id,
            bom_id: self.bom.id,
            machine_id: Some(self.machine.id),
            check_date: self.check_date,
        }
    }

    pub fn sources(&self) -> ReadinessSources<'_> {
        ReadinessSources {
            directory: self,
            materials: self,
            availability: &self.stock,
            alerts: &self.alerts,
            arrivals: &self.arrivals,
        }
    }
}
