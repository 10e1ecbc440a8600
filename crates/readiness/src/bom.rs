//! Projects, bills of materials and production units.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kitready_core::{BomId, BomLineId, Entity, MachineId, MaterialId, ProjectId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub code: String,
    pub name: String,
}

/// A production unit built under a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    pub id: MachineId,
    pub project_id: ProjectId,
    pub serial_no: String,
}

/// Bill of materials with its requirement rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bom {
    pub id: BomId,
    pub project_id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub lines: Vec<BomLineItem>,
}

/// Where a line is consumed during assembly and whether it gates that stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyAttributes {
    /// Assigned stage code; absent or unknown codes fall back to the
    /// configured fallback stage.
    #[serde(default)]
    pub stage_code: Option<String>,
    #[serde(default = "default_blocking")]
    pub blocking: bool,
}

fn default_blocking() -> bool {
    true
}

impl AssemblyAttributes {
    pub fn new(stage_code: impl Into<String>, blocking: bool) -> Self {
        Self {
            stage_code: Some(stage_code.into()),
            blocking,
        }
    }
}

/// One material requirement row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomLineItem {
    pub id: BomLineId,
    pub material_id: MaterialId,
    /// Defaults to 1 when unset.
    #[serde(default)]
    pub required_quantity: Option<Decimal>,
    #[serde(default)]
    pub required_date: Option<NaiveDate>,
    #[serde(default)]
    pub assembly: Option<AssemblyAttributes>,
}

impl BomLineItem {
    pub fn new(material_id: MaterialId, required_quantity: Decimal) -> Self {
        Self {
            id: BomLineId::new(),
            material_id,
            required_quantity: Some(required_quantity),
            required_date: None,
            assembly: None,
        }
    }

    pub fn in_stage(mut self, stage_code: impl Into<String>, blocking: bool) -> Self {
        self.assembly = Some(AssemblyAttributes::new(stage_code, blocking));
        self
    }

    pub fn required_by(mut self, date: NaiveDate) -> Self {
        self.required_date = Some(date);
        self
    }

    pub fn required_or_default(&self) -> Decimal {
        self.required_quantity.unwrap_or(Decimal::ONE)
    }
}

impl Entity for Project {
    type Id = ProjectId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Entity for Machine {
    type Id = MachineId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Entity for Bom {
    type Id = BomId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
