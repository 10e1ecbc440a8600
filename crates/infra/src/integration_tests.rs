//! End-to-end: dataset file -> workspace -> tenant view -> readiness report.
//!
//! Verifies:
//! - JSON wire format of every reference record
//! - Receipts, allocations and purchase orders reach the analysis
//! - Gating, blocking items and alert levels over a multi-stage BOM
//! - Tenant isolation

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::str::FromStr;

    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use kitready_core::{BomId, BomLineId, DomainError, ProjectId, TenantId};
    use kitready_readiness::{AlertLevel, ReadinessRequest, ThresholdAlertClassifier};

    use crate::dataset::Dataset;

    const TENANT: &str = "01960000-0000-7000-8000-000000000001";
    const PROJECT: &str = "01960000-0000-7000-8000-000000000010";
    const BOM: &str = "01960000-0000-7000-8000-000000000020";
    const CABLE_LINE: &str = "01960000-0000-7000-8000-000000000103";
    const PLC_LINE: &str = "01960000-0000-7000-8000-000000000104";

    const DATASET: &str = r##"{
      "stages": [
        { "code": "MECH", "name": "Mechanical", "order": 10, "color": "#607d8b" },
        { "code": "ELEC", "name": "Electrical", "order": 20 },
        { "code": "TEST", "name": "Testing", "order": 30 }
      ],
      "tenants": [{
        "tenant_id": "01960000-0000-7000-8000-000000000001",
        "projects": [
          { "id": "01960000-0000-7000-8000-000000000010", "code": "PRJ-42", "name": "Filling line" }
        ],
        "machines": [
          { "id": "01960000-0000-7000-8000-000000000030",
            "project_id": "01960000-0000-7000-8000-000000000010", "serial_no": "FL-001" }
        ],
        "materials": [
          { "id": "01960000-0000-7000-8000-0000000000a1", "code": "FRAME", "name": "Base frame" },
          { "id": "01960000-0000-7000-8000-0000000000a2", "code": "BOLT", "name": "M8 bolt" },
          { "id": "01960000-0000-7000-8000-0000000000a3", "code": "CABLE", "name": "Power cable" },
          { "id": "01960000-0000-7000-8000-0000000000a4", "code": "PLC", "name": "Controller" }
        ],
        "stock": [
          { "material_id": "01960000-0000-7000-8000-0000000000a1", "on_hand": "4" },
          { "material_id": "01960000-0000-7000-8000-0000000000a2", "on_hand": "100", "allocated": "40" },
          { "material_id": "01960000-0000-7000-8000-0000000000a3", "on_hand": "0" },
          { "material_id": "01960000-0000-7000-8000-0000000000a4", "on_hand": "1" }
        ],
        "receipts": [
          { "material_id": "01960000-0000-7000-8000-0000000000a1", "quantity": "6", "expected_on": "2025-03-05" }
        ],
        "purchase_orders": [
          { "id": "01960000-0000-7000-8000-0000000000b1", "status": "approved",
            "lines": [{ "line_no": 1, "material_id": "01960000-0000-7000-8000-0000000000a3",
                        "quantity": "20", "promised_date": "2025-03-20" }] },
          { "id": "01960000-0000-7000-8000-0000000000b2", "status": "draft",
            "lines": [{ "line_no": 1, "material_id": "01960000-0000-7000-8000-0000000000a3",
                        "quantity": "20", "promised_date": "2025-03-12" }] }
        ],
        "boms": [{
          "id": "01960000-0000-7000-8000-000000000020",
          "project_id": "01960000-0000-7000-8000-000000000010",
          "name": "FL main",
          "lines": [
            { "id": "01960000-0000-7000-8000-000000000101",
              "material_id": "01960000-0000-7000-8000-0000000000a1", "required_quantity": "10",
              "assembly": { "stage_code": "MECH", "blocking": true } },
            { "id": "01960000-0000-7000-8000-000000000102",
              "material_id": "01960000-0000-7000-8000-0000000000a2", "required_quantity": "50",
              "assembly": { "stage_code": "MECH" } },
            { "id": "01960000-0000-7000-8000-000000000103",
              "material_id": "01960000-0000-7000-8000-0000000000a3", "required_quantity": "20",
              "required_date": "2025-03-12",
              "assembly": { "stage_code": "ELEC", "blocking": true } },
            { "id": "01960000-0000-7000-8000-000000000104",
              "material_id": "01960000-0000-7000-8000-0000000000a4", "required_quantity": "2",
              "assembly": { "stage_code": "TEST", "blocking": false } },
            { "id": "01960000-0000-7000-8000-000000000105",
              "material_id": "01960000-0000-7000-8000-0000000000ff", "required_quantity": "5" },
            { "id": "01960000-0000-7000-8000-000000000106",
              "material_id": "01960000-0000-7000-8000-0000000000a2" }
          ]
        }]
      }]
    }"##;

    fn load() -> Dataset {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DATASET.as_bytes()).unwrap();
        Dataset::load(file.path()).unwrap()
    }

    fn request() -> ReadinessRequest {
        ReadinessRequest {
            project_id: ProjectId::from_str(PROJECT).unwrap(),
            bom_id: BomId::from_str(BOM).unwrap(),
            machine_id: None,
            check_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        }
    }

    #[test]
    fn dataset_file_drives_a_full_analysis() {
        let dataset = load();
        let engine = dataset.engine(dataset.readiness_config()).unwrap();
        let workspace = dataset.into_workspace();
        let view = workspace.scoped(TenantId::from_str(TENANT).unwrap()).unwrap();

        let report = view
            .analyze(&engine, &request(), &ThresholdAlertClassifier::default())
            .unwrap();

        assert_eq!(report.project_code, "PRJ-42");
        assert_eq!(report.bom_name, "FL main");

        // MECH: frame covered by receipt, bolts net of allocation, defaulted line.
        let mech = report.gate("MECH").unwrap();
        assert_eq!((mech.total, mech.fulfilled), (3, 3));
        assert_eq!(mech.stage_color, "#607d8b");
        assert!(mech.can_start);

        let elec = report.gate("ELEC").unwrap();
        assert_eq!((elec.blocking_total, elec.blocking_fulfilled), (1, 0));
        assert!(!elec.can_start);

        let test = report.gate("TEST").unwrap();
        assert_eq!(test.kit_rate, dec!(0));
        assert_eq!(test.blocking_rate, dec!(100));
        assert!(!test.can_start);

        assert!(!report.can_proceed);
        assert_eq!(report.first_blocked_stage.as_deref(), Some("ELEC"));
        assert_eq!(report.current_workable_stage.as_deref(), Some("MECH"));

        assert_eq!(report.overall.total, 5);
        assert_eq!(report.overall.kit_rate, dec!(60));
        assert_eq!(report.overall.blocking_rate, dec!(75));
        assert_eq!(report.overall.shortage_count, 2);

        assert_eq!(report.blocking_items.len(), 1);
        let cable = &report.blocking_items[0];
        assert_eq!(cable.line_id, BomLineId::from_str(CABLE_LINE).unwrap());
        assert_eq!(cable.shortage_quantity, dec!(20));
        assert_eq!(cable.days_to_required, 2);
        assert_eq!(cable.alert_level, AlertLevel::Critical);
        // Draft order's earlier date is ignored.
        assert_eq!(cable.expected_arrival, NaiveDate::from_ymd_opt(2025, 3, 20));

        let plc = report
            .shortage_details
            .iter()
            .find(|s| s.line_id == BomLineId::from_str(PLC_LINE).unwrap())
            .unwrap();
        assert_eq!(plc.shortage_rate, dec!(50));
        assert_eq!(plc.days_to_required, 7);
        assert_eq!(plc.alert_level, AlertLevel::Medium);
        assert_eq!(plc.expected_arrival, None);
    }

    #[test]
    fn other_tenants_see_nothing() {
        let dataset = load();
        let engine = dataset.engine(dataset.readiness_config()).unwrap();
        let workspace = dataset.into_workspace();
        let stranger = workspace.scoped(TenantId::new()).unwrap();

        let err = stranger
            .analyze(&engine, &request(), &ThresholdAlertClassifier::default())
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("project"));
    }

    #[test]
    fn report_serializes_to_json() {
        let dataset = load();
        let engine = dataset.engine(dataset.readiness_config()).unwrap();
        let view = dataset
            .into_workspace()
            .scoped(TenantId::from_str(TENANT).unwrap())
            .unwrap();
        let report = view
            .analyze(&engine, &request(), &ThresholdAlertClassifier::default())
            .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["first_blocked_stage"], "ELEC");
        assert_eq!(json["blocking_items"][0]["alert_level"], "critical");
        assert_eq!(json["check_date"], "2025-03-10");
    }
}
