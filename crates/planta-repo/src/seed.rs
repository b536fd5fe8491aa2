// Archivo: seed.rs
// Propósito: construir el dataset de demostración con el que se siembra un
// documento recién creado. El contenido es fijo; solo los ids y timestamps
// se generan al momento de sembrar.
use crate::migration::CURRENT_SCHEMA_VERSION;
use chrono::{NaiveDate, Utc};
use planta_domain::{Criticality, Document, Equipment, MaintenanceKind, MaintenanceTask, MovementKind, Process, Product,
                    Recipe, RecipeItem, StockMovement, StockStatus, TaskStatus, Unit};
use uuid::Uuid;

fn product(sku: &str, name: &str, unit: Unit, stock: f64, reorder: f64) -> Product {
    Product { id: Uuid::new_v4(),
              sku: sku.into(),
              name: name.into(),
              unit,
              current_stock: stock,
              reorder_point: reorder,
              status: StockStatus::derive(stock, reorder) }
}

/// Documento de demostración: dos procesos, cuatro productos, una receta con
/// dos líneas, dos equipos, una tarea pendiente y los dos movimientos de
/// apertura que respaldan el stock inicial de harina y azúcar.
pub fn demo_document() -> Document {
    let horneado = Process { id: Uuid::new_v4(),
                             name: "Horneado".into(),
                             description: Some("Línea de horneado principal".into()),
                             is_active: true };
    let envasado = Process { id: Uuid::new_v4(),
                             name: "Envasado".into(),
                             description: None,
                             is_active: true };

    let harina = product("MP-001", "Harina de trigo", Unit::Kg, 120.0, 40.0);
    let azucar = product("MP-002", "Azúcar", Unit::Kg, 80.0, 30.0);
    let levadura = product("MP-003", "Levadura", Unit::Kg, 5.0, 8.0);
    let envase = product("EN-001", "Envase 500 g", Unit::U, 500.0, 200.0);

    let receta = Recipe { id: Uuid::new_v4(),
                          name: "Pan de caja".into(),
                          process_id: horneado.id,
                          notes: None };
    let items = vec![RecipeItem { id: Uuid::new_v4(),
                                  recipe_id: receta.id,
                                  product_id: harina.id,
                                  qty_per_unit: 0.5 },
                     RecipeItem { id: Uuid::new_v4(),
                                  recipe_id: receta.id,
                                  product_id: levadura.id,
                                  qty_per_unit: 0.02 }];

    let horno = Equipment { id: Uuid::new_v4(),
                            code: "HO-01".into(),
                            name: "Horno principal".into(),
                            area: "Producción".into(),
                            criticality: Criticality::Alta };
    let envasadora = Equipment { id: Uuid::new_v4(),
                                 code: "EN-01".into(),
                                 name: "Envasadora".into(),
                                 area: "Empaque".into(),
                                 criticality: Criticality::Media };

    let tarea = MaintenanceTask { id: Uuid::new_v4(),
                                  equipment_id: horno.id,
                                  kind: MaintenanceKind::Preventivo,
                                  title: "Inspección de quemadores".into(),
                                  description: None,
                                  scheduled_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap_or_default(),
                                  status: TaskStatus::Pendiente };

    // Movimientos de apertura: respaldan el invariante de auditabilidad
    // (stock = base + Σ efectos) para los productos cargados por compra.
    let apertura = |p: &Product| StockMovement { id: Uuid::new_v4(),
                                                 product_id: p.id,
                                                 kind: MovementKind::In,
                                                 quantity: p.current_stock,
                                                 reason: Some("carga inicial".into()),
                                                 linked_run_id: None,
                                                 created_at: Utc::now() };
    let movimientos = vec![apertura(&harina), apertura(&azucar)];

    Document { schema_version: CURRENT_SCHEMA_VERSION,
               processes: vec![horneado, envasado],
               products: vec![harina, azucar, levadura, envase],
               stock_movements: movimientos,
               recipes: vec![receta],
               recipe_items: items,
               oee_runs: Vec::new(),
               equipment: vec![horno, envasadora],
               maintenance_tasks: vec![tarea],
               maintenance_logs: Vec::new() }
}
