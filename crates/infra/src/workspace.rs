//! In-memory, tenant-isolated backing for every readiness lookup.
//!
//! [`InMemoryWorkspace`] holds reference data for many tenants. An analysis
//! never touches it directly: [`InMemoryWorkspace::scoped`] takes a consistent
//! snapshot of one tenant as a [`TenantView`], which implements the lookup
//! traits the engine consumes.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use chrono::NaiveDate;
use tracing::debug;

use kitready_core::{
    BomId, DomainResult, Entity, MachineId, MaterialId, ProjectId, PurchaseOrderId, TenantId,
};
use kitready_inventory::{
    AvailabilityResolver, AvailabilitySnapshot, InboundReceipt, Material, MaterialCatalog,
    StockLedger, StockPosition,
};
use kitready_purchasing::{
    ArrivalError, ArrivalSource, PurchaseOrder, PurchaseOrderBook, ResilientArrivals,
};
use kitready_readiness::{
    AlertClassifier, Bom, Machine, Project, ProjectDirectory, ReadinessEngine, ReadinessReport,
    ReadinessRequest, ReadinessSources,
};

use crate::read_model::{InMemoryTenantStore, TenantStore};

#[derive(Debug, Default)]
pub struct InMemoryWorkspace {
    projects: InMemoryTenantStore<ProjectId, Project>,
    boms: InMemoryTenantStore<BomId, Bom>,
    machines: InMemoryTenantStore<MachineId, Machine>,
    materials: InMemoryTenantStore<MaterialId, Material>,
    positions: InMemoryTenantStore<MaterialId, StockPosition>,
    receipts: InMemoryTenantStore<MaterialId, Vec<InboundReceipt>>,
    purchase_orders: InMemoryTenantStore<PurchaseOrderId, PurchaseOrder>,
    /// Tenants with the purchasing module installed.
    purchasing: RwLock<HashSet<TenantId>>,
}

impl InMemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_project(&self, tenant_id: TenantId, project: Project) {
        put_entity(&self.projects, tenant_id, project);
    }

    pub fn put_bom(&self, tenant_id: TenantId, bom: Bom) {
        put_entity(&self.boms, tenant_id, bom);
    }

    pub fn put_machine(&self, tenant_id: TenantId, machine: Machine) {
        put_entity(&self.machines, tenant_id, machine);
    }

    pub fn put_material(&self, tenant_id: TenantId, material: Material) {
        put_entity(&self.materials, tenant_id, material);
    }

    pub fn put_stock(&self, tenant_id: TenantId, position: StockPosition) {
        self.positions.upsert(tenant_id, position.material_id, position);
    }

    pub fn add_receipt(&self, tenant_id: TenantId, receipt: InboundReceipt) {
        self.receipts.upsert_with(tenant_id, receipt.material_id, |prev| {
            let mut all = prev.unwrap_or_default();
            all.push(receipt);
            all
        });
    }

    /// Mark the purchasing module as installed for `tenant_id`.
    pub fn enable_purchasing(&self, tenant_id: TenantId) {
        if let Ok(mut set) = self.purchasing.write() {
            set.insert(tenant_id);
        }
    }

    /// Store a purchase order; implies purchasing is enabled for the tenant.
    pub fn put_purchase_order(&self, tenant_id: TenantId, order: PurchaseOrder) {
        self.enable_purchasing(tenant_id);
        put_entity(&self.purchase_orders, tenant_id, order);
    }

    pub fn clear_tenant(&self, tenant_id: TenantId) {
        self.projects.clear_tenant(tenant_id);
        self.boms.clear_tenant(tenant_id);
        self.machines.clear_tenant(tenant_id);
        self.materials.clear_tenant(tenant_id);
        self.positions.clear_tenant(tenant_id);
        self.receipts.clear_tenant(tenant_id);
        self.purchase_orders.clear_tenant(tenant_id);
        if let Ok(mut set) = self.purchasing.write() {
            set.remove(&tenant_id);
        }
    }

    fn purchasing_enabled(&self, tenant_id: TenantId) -> bool {
        let flagged = self
            .purchasing
            .read()
            .map(|set| set.contains(&tenant_id))
            .unwrap_or(false);
        flagged || self.purchase_orders.has_tenant(tenant_id)
    }

    /// Snapshot one tenant's data. Fails if stored stock data is invalid.
    pub fn scoped(&self, tenant_id: TenantId) -> DomainResult<TenantView> {
        let mut stock = StockLedger::new();
        for position in self.positions.list(tenant_id) {
            stock.set_position(position)?;
        }
        for receipt in self.receipts.list(tenant_id).into_iter().flatten() {
            stock.add_receipt(receipt)?;
        }

        let purchasing: Option<PurchaseOrderBook> = self
            .purchasing_enabled(tenant_id)
            .then(|| self.purchase_orders.list(tenant_id).into_iter().collect());

        let view = TenantView {
            tenant_id,
            projects: index(self.projects.list(tenant_id)),
            boms: index(self.boms.list(tenant_id)),
            machines: index(self.machines.list(tenant_id)),
            materials: index(self.materials.list(tenant_id)),
            stock,
            purchasing,
        };
        debug!(
            %tenant_id,
            projects = view.projects.len(),
            boms = view.boms.len(),
            materials = view.materials.len(),
            purchasing = view.purchasing.is_some(),
            "tenant view built"
        );
        Ok(view)
    }
}

fn put_entity<E>(store: &InMemoryTenantStore<E::Id, E>, tenant_id: TenantId, entity: E)
where
    E: Entity + Clone + Send + Sync + 'static,
    E::Id: Send + Sync + 'static,
{
    store.upsert(tenant_id, entity.id(), entity);
}

fn index<E: Entity>(records: Vec<E>) -> HashMap<E::Id, E> {
    records.into_iter().map(|e| (e.id(), e)).collect()
}

/// Read-only snapshot of a single tenant.
#[derive(Debug, Clone)]
pub struct TenantView {
    tenant_id: TenantId,
    projects: HashMap<ProjectId, Project>,
    boms: HashMap<BomId, Bom>,
    machines: HashMap<MachineId, Machine>,
    materials: HashMap<MaterialId, Material>,
    stock: StockLedger,
    purchasing: Option<PurchaseOrderBook>,
}

impl TenantView {
    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    /// Run `engine` against this tenant with arrival failures degraded to "unknown".
    pub fn analyze(
        &self,
        engine: &ReadinessEngine,
        request: &ReadinessRequest,
        alerts: &dyn AlertClassifier,
    ) -> DomainResult<ReadinessReport> {
        let arrivals = ResilientArrivals::new(self);
        let sources = ReadinessSources {
            directory: self,
            materials: self,
            availability: self,
            alerts,
            arrivals: &arrivals,
        };
        engine.analyze(request, &sources)
    }
}

impl ProjectDirectory for TenantView {
    fn project(&self, id: ProjectId) -> Option<Project> {
        self.projects.get(&id).cloned()
    }

    fn bom(&self, id: BomId) -> Option<Bom> {
        self.boms.get(&id).cloned()
    }

    fn machine(&self, id: MachineId) -> Option<Machine> {
        self.machines.get(&id).cloned()
    }
}

impl MaterialCatalog for TenantView {
    fn material(&self, id: MaterialId) -> Option<Material> {
        self.materials.get(&id).cloned()
    }
}

impl AvailabilityResolver for TenantView {
    fn resolve(&self, material_id: MaterialId, check_date: NaiveDate) -> AvailabilitySnapshot {
        self.stock.resolve(material_id, check_date)
    }
}

impl ArrivalSource for TenantView {
    fn earliest_arrival(&self, material_id: MaterialId) -> Result<Option<NaiveDate>, ArrivalError> {
        match &self.purchasing {
            Some(book) => book.earliest_arrival(material_id),
            None => Err(ArrivalError::Unavailable("purchasing".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitready_purchasing::{ArrivalLookup, PurchaseOrderStatus};
    use rust_decimal_macros::dec;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
    }

    fn material(code: &str) -> Material {
        Material::new(MaterialId::new(), code, code)
    }

    #[test]
    fn scoped_view_only_sees_its_tenant() {
        let ws = InMemoryWorkspace::new();
        let a = TenantId::new();
        let b = TenantId::new();
        let steel = material("STEEL");
        ws.put_material(a, steel.clone());

        assert_eq!(ws.scoped(a).unwrap().material(steel.id), Some(steel.clone()));
        assert_eq!(ws.scoped(b).unwrap().material(steel.id), None);
    }

    #[test]
    fn availability_includes_receipts_due_by_check_date() {
        let ws = InMemoryWorkspace::new();
        let tenant = TenantId::new();
        let steel = material("STEEL");
        ws.put_stock(
            tenant,
            StockPosition {
                material_id: steel.id,
                on_hand: dec!(10),
                allocated: dec!(4),
            },
        );
        ws.add_receipt(
            tenant,
            InboundReceipt {
                material_id: steel.id,
                quantity: dec!(5),
                expected_on: d(10),
            },
        );
        ws.add_receipt(
            tenant,
            InboundReceipt {
                material_id: steel.id,
                quantity: dec!(7),
                expected_on: d(20),
            },
        );

        let view = ws.scoped(tenant).unwrap();
        assert_eq!(view.resolve(steel.id, d(1)).available, dec!(6));
        assert_eq!(view.resolve(steel.id, d(15)).available, dec!(11));
        assert_eq!(view.resolve(steel.id, d(25)).available, dec!(18));
    }

    #[test]
    fn invalid_stock_fails_the_snapshot() {
        let ws = InMemoryWorkspace::new();
        let tenant = TenantId::new();
        ws.put_stock(
            tenant,
            StockPosition {
                material_id: MaterialId::new(),
                on_hand: dec!(-1),
                allocated: dec!(0),
            },
        );

        let err = ws.scoped(tenant).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn tenant_without_purchasing_reports_unavailable() {
        let ws = InMemoryWorkspace::new();
        let tenant = TenantId::new();
        let view = ws.scoped(tenant).unwrap();

        assert!(matches!(
            view.earliest_arrival(MaterialId::new()),
            Err(ArrivalError::Unavailable(_))
        ));
        // The resilient adapter hides it from the engine.
        assert_eq!(ResilientArrivals::new(&view).expected_arrival(MaterialId::new()), None);
    }

    #[test]
    fn enabled_purchasing_without_orders_answers_none() {
        let ws = InMemoryWorkspace::new();
        let tenant = TenantId::new();
        ws.enable_purchasing(tenant);

        let view = ws.scoped(tenant).unwrap();
        assert_eq!(view.earliest_arrival(MaterialId::new()), Ok(None));
    }

    #[test]
    fn purchase_orders_feed_arrivals() {
        let ws = InMemoryWorkspace::new();
        let tenant = TenantId::new();
        let steel = material("STEEL");
        ws.put_purchase_order(
            tenant,
            PurchaseOrder::new(PurchaseOrderId::new(), PurchaseOrderStatus::Approved)
                .with_line(steel.id, dec!(3), Some(d(12))),
        );
        ws.put_purchase_order(
            tenant,
            PurchaseOrder::new(PurchaseOrderId::new(), PurchaseOrderStatus::Draft)
                .with_line(steel.id, dec!(3), Some(d(2))),
        );

        let view = ws.scoped(tenant).unwrap();
        assert_eq!(view.earliest_arrival(steel.id), Ok(Some(d(12))));
    }

    #[test]
    fn clear_tenant_removes_everything() {
        let ws = InMemoryWorkspace::new();
        let tenant = TenantId::new();
        let steel = material("STEEL");
        ws.put_material(tenant, steel.clone());
        ws.enable_purchasing(tenant);

        ws.clear_tenant(tenant);

        let view = ws.scoped(tenant).unwrap();
        assert_eq!(view.material(steel.id), None);
        assert!(view.earliest_arrival(steel.id).is_err());
    }
}
