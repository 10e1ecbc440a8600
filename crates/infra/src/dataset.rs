//! JSON dataset files: stage catalog, optional config and per-tenant reference data.
//!
//! ```json
//! {
//!   "stages": [{ "code": "MECH", "name": "Mechanical", "order": 10 }],
//!   "config": { "fallback_stage": "MECH" },
//!   "tenants": [{
//!     "tenant_id": "…",
//!     "projects": [], "boms": [], "machines": [], "materials": [],
//!     "stock": [], "receipts": [], "purchase_orders": []
//!   }]
//! }
//! ```
//!
//! Omitting `purchase_orders` for a tenant means the purchasing module is not
//! installed there; an empty list means it is installed but has no orders.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use kitready_core::{DomainError, DomainResult, TenantId};
use kitready_inventory::{InboundReceipt, Material, StockPosition};
use kitready_purchasing::PurchaseOrder;
use kitready_readiness::{
    Bom, Machine, Project, ReadinessConfig, ReadinessEngine, Stage, StageCatalog,
};

use crate::workspace::InMemoryWorkspace;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub stages: Vec<Stage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ReadinessConfig>,
    #[serde(default)]
    pub tenants: Vec<TenantData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantData {
    pub tenant_id: TenantId,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub boms: Vec<Bom>,
    #[serde(default)]
    pub machines: Vec<Machine>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub stock: Vec<StockPosition>,
    #[serde(default)]
    pub receipts: Vec<InboundReceipt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_orders: Option<Vec<PurchaseOrder>>,
}

impl TenantData {
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            projects: Vec::new(),
            boms: Vec::new(),
            machines: Vec::new(),
            materials: Vec::new(),
            stock: Vec::new(),
            receipts: Vec::new(),
            purchase_orders: None,
        }
    }
}

impl Dataset {
    pub fn from_json(raw: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            stages = dataset.stages.len(),
            tenants = dataset.tenants.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn stage_catalog(&self) -> DomainResult<StageCatalog> {
        StageCatalog::new(self.stages.iter().cloned())
    }

    /// Embedded config, or defaults when the file has none.
    pub fn readiness_config(&self) -> ReadinessConfig {
        self.config.clone().unwrap_or_default()
    }

    /// Engine over this dataset's stages with `config`.
    pub fn engine(&self, config: ReadinessConfig) -> DomainResult<ReadinessEngine> {
        ReadinessEngine::new(config, self.stage_catalog()?)
    }

    /// Load every tenant into `workspace`, replacing what it held for them.
    pub fn populate(&self, workspace: &InMemoryWorkspace) {
        for tenant in &self.tenants {
            let id = tenant.tenant_id;
            workspace.clear_tenant(id);

            tenant.projects.iter().cloned().for_each(|p| workspace.put_project(id, p));
            tenant.boms.iter().cloned().for_each(|b| workspace.put_bom(id, b));
            tenant.machines.iter().cloned().for_each(|m| workspace.put_machine(id, m));
            tenant.materials.iter().cloned().for_each(|m| workspace.put_material(id, m));
            tenant.stock.iter().copied().for_each(|s| workspace.put_stock(id, s));
            tenant.receipts.iter().copied().for_each(|r| workspace.add_receipt(id, r));

            if let Some(orders) = &tenant.purchase_orders {
                workspace.enable_purchasing(id);
                orders
                    .iter()
                    .cloned()
                    .for_each(|o| workspace.put_purchase_order(id, o));
            }
        }
    }

    pub fn into_workspace(self) -> InMemoryWorkspace {
        let workspace = InMemoryWorkspace::new();
        self.populate(&workspace);
        workspace
    }
}
