use chrono::NaiveDate;
use planta_domain::{MovementKind, Product, Recipe, RecipeItem, StockStatus, Unit};
use planta_repo::{DocumentStore, InMemoryDocumentStore, MovementDraft, PersistResult, PlantaService, RunDraft,
                  StoreError, CONSUMPTION_REASON, CURRENT_SCHEMA_VERSION};
use std::sync::Arc;
use uuid::Uuid;

fn service() -> PlantaService<InMemoryDocumentStore> {
    PlantaService::new(Arc::new(InMemoryDocumentStore::new()))
}

fn nuevo_producto(sku: &str, stock: f64, reorden: f64) -> Product {
    Product { id: Uuid::new_v4(),
              sku: sku.into(),
              name: format!("Producto {}", sku),
              unit: Unit::Kg,
              current_stock: stock,
              reorder_point: reorden,
              status: StockStatus::EnStock }
}

fn fecha() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 10).unwrap()
}

fn corrida_base(process_id: Uuid) -> RunDraft {
    RunDraft { process_id,
               date: fecha(),
               planned_time_min: 480.0,
               downtime_min: 30.0,
               total_count: 450.0,
               reject_count: 10.0,
               ideal_cycle_time_sec: 1.0,
               recipe_id: None,
               produced_units: None,
               notes: None }
}

#[test]
fn primera_lectura_siembra_el_documento() {
    let svc = service();
    let doc = svc.read_all().unwrap();

    assert_eq!(doc.schema_version, CURRENT_SCHEMA_VERSION);
    assert_eq!(doc.processes.len(), 2);
    assert_eq!(doc.products.len(), 4);
    assert_eq!(doc.recipes.len(), 1);
    assert_eq!(doc.stock_movements.len(), 2);

    // el status sembrado es coherente con el stock y el punto de reorden
    for p in &doc.products {
        assert_eq!(p.status, StockStatus::derive(p.current_stock, p.reorder_point));
    }
    let levadura = doc.products.iter().find(|p| p.sku == "MP-003").unwrap();
    assert_eq!(levadura.status, StockStatus::Bajo);
}

#[test]
fn post_movement_in_suma_y_recalcula_status() {
    let svc = service();
    let producto = nuevo_producto("TST-001", 100.0, 10.0);
    let id = producto.id;
    svc.upsert_product(producto).unwrap();

    let mov = svc.post_movement(MovementDraft { product_id: id,
                                                kind: MovementKind::In,
                                                quantity: 50.0,
                                                reason: Some("compra".into()),
                                                linked_run_id: None })
                 .unwrap();
    assert_eq!(mov.product_id, id);
    assert_eq!(mov.quantity, 50.0);
    assert!(mov.linked_run_id.is_none());

    let doc = svc.read_all().unwrap();
    let p = doc.product(id).unwrap();
    assert_eq!(p.current_stock, 150.0);
    assert_eq!(p.status, StockStatus::EnStock);
    // el registro quedó en el historial tal como se devolvió
    assert!(doc.stock_movements.iter().any(|m| m.id == mov.id));
}

#[test]
fn adj_aplica_la_cantidad_como_delta_con_signo() {
    let svc = service();
    let producto = nuevo_producto("TST-ADJ", 50.0, 10.0);
    let id = producto.id;
    svc.upsert_product(producto).unwrap();

    svc.post_movement(MovementDraft { product_id: id,
                                      kind: MovementKind::Adj,
                                      quantity: -45.0,
                                      reason: Some("merma".into()),
                                      linked_run_id: None })
       .unwrap();

    let doc = svc.read_all().unwrap();
    let p = doc.product(id).unwrap();
    assert_eq!(p.current_stock, 5.0);
    assert_eq!(p.status, StockStatus::Bajo);
}

#[test]
fn out_puede_dejar_el_stock_negativo() {
    let svc = service();
    let producto = nuevo_producto("TST-NEG", 10.0, 5.0);
    let id = producto.id;
    svc.upsert_product(producto).unwrap();

    svc.post_movement(MovementDraft { product_id: id,
                                      kind: MovementKind::Out,
                                      quantity: 25.0,
                                      reason: None,
                                      linked_run_id: None })
       .unwrap();

    let p = svc.read_all().unwrap().product(id).cloned().unwrap();
    assert_eq!(p.current_stock, -15.0);
    assert_eq!(p.status, StockStatus::Faltante);
}

#[test]
fn movimiento_sobre_producto_inexistente_no_toca_el_documento() {
    let svc = service();
    let antes = svc.read_all().unwrap();

    let err = svc.post_movement(MovementDraft { product_id: Uuid::new_v4(),
                                                kind: MovementKind::In,
                                                quantity: 1.0,
                                                reason: None,
                                                linked_run_id: None })
                 .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "Product", .. }));

    let despues = svc.read_all().unwrap();
    assert_eq!(antes, despues);
}

#[test]
fn auditabilidad_stock_igual_a_suma_de_efectos() {
    let svc = service();
    let producto = nuevo_producto("TST-AUD", 0.0, 10.0);
    let id = producto.id;
    svc.upsert_product(producto).unwrap();

    let movs = [(MovementKind::In, 100.0), (MovementKind::Out, 30.0), (MovementKind::Adj, -12.5), (MovementKind::In, 4.0)];
    for (kind, qty) in movs {
        svc.post_movement(MovementDraft { product_id: id,
                                          kind,
                                          quantity: qty,
                                          reason: None,
                                          linked_run_id: None })
           .unwrap();
    }

    let doc = svc.read_all().unwrap();
    let suma: f64 = doc.stock_movements
                       .iter()
                       .filter(|m| m.product_id == id)
                       .map(|m| m.kind.signed_effect(m.quantity))
                       .sum();
    assert_eq!(doc.product(id).unwrap().current_stock, suma);
}

#[test]
fn corrida_recalcula_los_campos_derivados() {
    let svc = service();
    let doc = svc.read_all().unwrap();
    let outcome = svc.post_run(corrida_base(doc.processes[0].id)).unwrap();

    let run = &outcome.run;
    assert_eq!(run.run_time_min, 450.0);
    assert_eq!(run.good_count, 440.0);
    assert_eq!(run.availability, 0.9375);
    assert!((run.quality - 440.0 / 450.0).abs() < 1e-12);
    assert!((run.oee - run.availability * run.performance * run.quality).abs() < 1e-12);
    assert!(run.oee >= 0.0 && run.oee <= 1.0);

    // la corrida quedó persistida
    let doc = svc.read_all().unwrap();
    assert!(doc.oee_runs.iter().any(|r| r.id == run.id));
}

#[test]
fn corrida_sin_receta_no_genera_movimientos() {
    let svc = service();
    let doc = svc.read_all().unwrap();
    let movimientos_antes = doc.stock_movements.len();

    let outcome = svc.post_run(corrida_base(doc.processes[0].id)).unwrap();
    assert!(outcome.consumptions.is_empty());
    assert!(outcome.shortages.is_empty());
    assert_eq!(svc.read_all().unwrap().stock_movements.len(), movimientos_antes);
}

#[test]
fn corrida_con_receta_reporta_faltantes_y_debita_igual() {
    let svc = service();
    let doc = svc.read_all().unwrap();
    let process_id = doc.processes[0].id;

    let producto_a = nuevo_producto("TST-A", 5.0, 10.0);
    let producto_b = nuevo_producto("TST-B", 100.0, 10.0);
    let (a, b) = (producto_a.id, producto_b.id);
    svc.upsert_product(producto_a).unwrap();
    svc.upsert_product(producto_b).unwrap();

    let receta = Recipe { id: Uuid::new_v4(),
                          name: "Receta de prueba".into(),
                          process_id,
                          notes: None };
    let receta_id = receta.id;
    svc.upsert_recipe(receta).unwrap();
    svc.set_recipe_items(receta_id,
                         vec![RecipeItem { id: Uuid::new_v4(),
                                           recipe_id: receta_id,
                                           product_id: a,
                                           qty_per_unit: 10.0 },
                              RecipeItem { id: Uuid::new_v4(),
                                           recipe_id: receta_id,
                                           product_id: b,
                                           qty_per_unit: 2.0 }])
       .unwrap();

    let mut draft = corrida_base(process_id);
    draft.recipe_id = Some(receta_id);
    draft.produced_units = Some(1.0);
    let outcome = svc.post_run(draft).unwrap();

    assert_eq!(outcome.consumptions.len(), 2);
    assert_eq!(outcome.shortages.len(), 1);
    let faltante = &outcome.shortages[0];
    assert_eq!(faltante.product_id, a);
    assert_eq!(faltante.needed, 10.0);
    assert_eq!(faltante.available, 5.0);

    // el débito se aplica aunque haya faltante: el stock queda negativo
    let doc = svc.read_all().unwrap();
    assert_eq!(doc.product(a).unwrap().current_stock, -5.0);
    assert_eq!(doc.product(a).unwrap().status, StockStatus::Faltante);
    assert_eq!(doc.product(b).unwrap().current_stock, 98.0);

    // movimientos OUT ligados a la corrida y con el motivo estándar
    let ligados: Vec<_> = doc.stock_movements
                             .iter()
                             .filter(|m| m.linked_run_id == Some(outcome.run.id))
                             .collect();
    assert_eq!(ligados.len(), 2);
    for m in ligados {
        assert_eq!(m.kind, MovementKind::Out);
        assert_eq!(m.reason.as_deref(), Some(CONSUMPTION_REASON));
    }
}

#[test]
fn los_faltantes_se_comparan_contra_el_snapshot_previo() {
    // Dos líneas de la misma receta consumen el mismo producto: ninguna debe
    // ver el débito de la otra al evaluar faltante.
    let svc = service();
    let doc = svc.read_all().unwrap();
    let process_id = doc.processes[0].id;

    let producto = nuevo_producto("TST-SNAP", 10.0, 2.0);
    let pid = producto.id;
    svc.upsert_product(producto).unwrap();

    let receta = Recipe { id: Uuid::new_v4(),
                          name: "Doble línea".into(),
                          process_id,
                          notes: None };
    let receta_id = receta.id;
    svc.upsert_recipe(receta).unwrap();
    svc.set_recipe_items(receta_id,
                         vec![RecipeItem { id: Uuid::new_v4(),
                                           recipe_id: receta_id,
                                           product_id: pid,
                                           qty_per_unit: 6.0 },
                              RecipeItem { id: Uuid::new_v4(),
                                           recipe_id: receta_id,
                                           product_id: pid,
                                           qty_per_unit: 6.0 }])
       .unwrap();

    let mut draft = corrida_base(process_id);
    draft.recipe_id = Some(receta_id);
    draft.produced_units = Some(1.0);
    let outcome = svc.post_run(draft).unwrap();

    // 6 <= 10 en ambas líneas contra el snapshot intacto: sin faltantes,
    // pero el stock final refleja los dos débitos.
    assert!(outcome.shortages.is_empty());
    assert_eq!(outcome.consumptions.len(), 2);
    assert_eq!(svc.read_all().unwrap().product(pid).unwrap().current_stock, -2.0);
}

#[test]
fn corrida_con_producto_inexistente_falla_completa() {
    let svc = service();
    let doc = svc.read_all().unwrap();
    let process_id = doc.processes[0].id;

    let receta = Recipe { id: Uuid::new_v4(),
                          name: "Receta rota".into(),
                          process_id,
                          notes: None };
    let receta_id = receta.id;
    svc.upsert_recipe(receta).unwrap();
    svc.set_recipe_items(receta_id,
                         vec![RecipeItem { id: Uuid::new_v4(),
                                           recipe_id: receta_id,
                                           product_id: Uuid::new_v4(),
                                           qty_per_unit: 1.0 }])
       .unwrap();

    let antes = svc.read_all().unwrap();
    let mut draft = corrida_base(process_id);
    draft.recipe_id = Some(receta_id);
    draft.produced_units = Some(3.0);
    let err = svc.post_run(draft).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "Product", .. }));

    // ni corrida ni movimientos: el documento quedó como estaba
    assert_eq!(svc.read_all().unwrap(), antes);
}

#[test]
fn corrida_con_proceso_inexistente_falla() {
    let svc = service();
    svc.read_all().unwrap();
    let err = svc.post_run(corrida_base(Uuid::new_v4())).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "Process", .. }));
}

#[test]
fn delete_recipe_elimina_en_cascada() {
    let svc = service();
    let doc = svc.read_all().unwrap();
    let receta_id = doc.recipes[0].id;
    assert!(!doc.items_of_recipe(receta_id).is_empty());

    svc.delete_recipe(receta_id).unwrap();
    let doc = svc.read_all().unwrap();
    assert!(doc.recipes.is_empty());
    assert!(doc.recipe_items.is_empty());

    let err = svc.delete_recipe(receta_id).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "Recipe", .. }));
}

#[test]
fn set_recipe_items_reemplaza_el_conjunto_completo() {
    let svc = service();
    let doc = svc.read_all().unwrap();
    let receta_id = doc.recipes[0].id;
    let producto = doc.products[0].id;

    svc.set_recipe_items(receta_id,
                         vec![RecipeItem { id: Uuid::new_v4(),
                                           recipe_id: Uuid::new_v4(), // lo corrige el servicio
                                           product_id: producto,
                                           qty_per_unit: 3.0 }])
       .unwrap();

    let doc = svc.read_all().unwrap();
    let items = doc.items_of_recipe(receta_id);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].qty_per_unit, 3.0);
    assert_eq!(items[0].recipe_id, receta_id);
}

#[test]
fn export_import_round_trip_identico() {
    let svc = service();
    let original = svc.read_all().unwrap();
    let json = svc.export_json().unwrap();

    let destino = service();
    let importado = destino.import_json(&json).unwrap();
    assert_eq!(importado, original);
    assert_eq!(destino.read_all().unwrap(), original);
    assert_eq!(importado.schema_version, original.schema_version);
}

#[test]
fn import_malformado_es_parse_error() {
    let svc = service();
    let err = svc.import_json("{esto no es json").unwrap_err();
    assert!(matches!(err, StoreError::Parse(_)));
}

#[test]
fn import_v0_backfillea_status_via_migracion() {
    let svc = service();
    let json = r#"{
        "products": [
            {"id":"6f1c1bd4-6a54-4f3a-9b6e-0a4f6f3f0a01","sku":"V0-001","name":"Sin status","unit":"kg","currentStock":0,"reorderPoint":5},
            {"id":"6f1c1bd4-6a54-4f3a-9b6e-0a4f6f3f0a02","sku":"V0-002","name":"Bajo","unit":"u","currentStock":3,"reorderPoint":5}
        ]
    }"#;
    let doc = svc.import_json(json).unwrap();
    assert_eq!(doc.schema_version, CURRENT_SCHEMA_VERSION);
    assert_eq!(doc.products[0].status, StockStatus::Faltante);
    assert_eq!(doc.products[1].status, StockStatus::Bajo);
    // el resto de las colecciones ausentes quedan vacías
    assert!(doc.oee_runs.is_empty());
    assert!(doc.recipes.is_empty());
}

#[test]
fn import_reemplaza_destructivamente() {
    let svc = service();
    svc.read_all().unwrap(); // siembra
    let doc = svc.import_json(r#"{"schemaVersion":1}"#).unwrap();
    assert!(doc.products.is_empty());
    assert!(svc.read_all().unwrap().products.is_empty());
}

#[test]
fn write_all_reemplaza_el_documento_completo() {
    let svc = service();
    let mut doc = svc.read_all().unwrap();
    doc.products.retain(|p| p.sku == "MP-001");
    svc.write_all(&doc).unwrap();

    let leido = svc.read_all().unwrap();
    assert_eq!(leido.products.len(), 1);
    assert_eq!(leido.products[0].sku, "MP-001");
}

#[test]
fn tareas_y_bitacora_de_mantenimiento() {
    use planta_domain::{MaintenanceLog, TaskStatus};

    let svc = service();
    let doc = svc.read_all().unwrap();
    let mut tarea = doc.maintenance_tasks[0].clone();
    assert_eq!(tarea.status, TaskStatus::Pendiente);

    tarea.status = TaskStatus::EnProceso;
    svc.upsert_task(tarea.clone()).unwrap();
    assert_eq!(svc.read_all().unwrap().maintenance_tasks[0].status, TaskStatus::EnProceso);

    svc.add_maintenance_log(MaintenanceLog { id: Uuid::new_v4(),
                                             task_id: tarea.id,
                                             log_date: fecha(),
                                             notes: Some("cambio de quemador".into()),
                                             duration_min: Some(45.0),
                                             cost_real: None })
       .unwrap();
    assert_eq!(svc.read_all().unwrap().maintenance_logs.len(), 1);

    // la bitácora valida la tarea referenciada
    let err = svc.add_maintenance_log(MaintenanceLog { id: Uuid::new_v4(),
                                                       task_id: Uuid::new_v4(),
                                                       log_date: fecha(),
                                                       notes: None,
                                                       duration_min: None,
                                                       cost_real: None })
                 .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "MaintenanceTask", .. }));
}

#[test]
fn replace_con_revision_vieja_es_conflicto() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let svc = PlantaService::new(store.clone());
    let doc = svc.read_all().unwrap();

    let vieja = store.load().unwrap().unwrap().revision;
    // otra escritura avanza la revisión
    svc.upsert_process(doc.processes[0].clone()).unwrap();

    // una escritura con la revisión leída antes debe rechazarse
    assert_eq!(store.replace(&doc, vieja).unwrap(), PersistResult::Conflict);
}
