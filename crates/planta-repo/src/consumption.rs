// Archivo: consumption.rs
// Propósito: motor de consumo por receta. Registra una corrida OEE y, si la
// corrida referencia una receta con unidades producidas, concilia el consumo
// de inventario en dos fases: snapshot (detección de faltantes contra el
// stock previo, sin debitar) y aplicación (débitos OUT vía el libro de
// stock). Los faltantes son informativos: nunca bloquean la corrida.
use crate::errors::{Result, StoreError};
use crate::ledger::{self, MovementDraft};
use chrono::NaiveDate;
use planta_domain::{Document, MovementKind, OeeInput, OeeRun};
use uuid::Uuid;

/// Motivo estándar de los débitos generados por una corrida.
pub const CONSUMPTION_REASON: &str = "consumo por receta";

/// Contadores crudos de una corrida, tal como los entrega la capa de captura.
/// Los campos derivados (tiempos, ratios, OEE) se recalculan aquí.
#[derive(Debug, Clone)]
pub struct RunDraft {
    pub process_id: Uuid,
    pub date: NaiveDate,
    pub planned_time_min: f64,
    pub downtime_min: f64,
    pub total_count: f64,
    pub reject_count: f64,
    pub ideal_cycle_time_sec: f64,
    pub recipe_id: Option<Uuid>,
    pub produced_units: Option<f64>,
    pub notes: Option<String>,
}

/// Intento de consumo de un producto: cantidad nominal requerida.
#[derive(Debug, Clone, PartialEq)]
pub struct Consumption {
    pub product_id: Uuid,
    pub quantity: f64,
}

/// Faltante detectado en la fase de snapshot: lo requerido supera lo
/// disponible antes de aplicar débito alguno.
#[derive(Debug, Clone, PartialEq)]
pub struct Shortage {
    pub product_id: Uuid,
    pub needed: f64,
    pub available: f64,
}

/// Resultado de registrar una corrida: la corrida persistida más el reporte
/// de consumos y faltantes para la capa que llama.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub run: OeeRun,
    pub consumptions: Vec<Consumption>,
    pub shortages: Vec<Shortage>,
}

/// Registra una corrida sobre el documento.
///
/// Orden del algoritmo (importa):
/// 1. Se resuelven las referencias (proceso, receta, productos). Cualquier
///    referencia inexistente hace fallar la operación completa con
///    `NotFound`, sin corrida registrada ni movimientos aplicados.
/// 2. Fase snapshot: para cada línea de la receta se calcula
///    `needed = qty_per_unit × produced_units` y se lee el stock previo al
///    débito. Todas las comparaciones de faltante usan ese único snapshot:
///    ningún débito de la misma corrida es visible dentro de la fase.
/// 3. Fase de aplicación: un movimiento OUT por cada intento de consumo,
///    ligado a la corrida, se haya marcado faltante o no. El stock puede
///    quedar negativo; la corrida nunca se rechaza por inventario.
///
/// Si la corrida no trae receta o `produced_units` no es positivo, las fases
/// 2 y 3 se omiten por completo.
pub fn post_run(doc: &mut Document, draft: RunDraft) -> Result<RunOutcome> {
    if doc.processes.iter().all(|p| p.id != draft.process_id) {
        return Err(StoreError::NotFound { entity: "Process",
                                          id: draft.process_id });
    }

    let derived = OeeInput { planned_time_min: draft.planned_time_min,
                             downtime_min: draft.downtime_min,
                             total_count: draft.total_count,
                             reject_count: draft.reject_count,
                             ideal_cycle_time_sec: draft.ideal_cycle_time_sec }.compute();

    let run = OeeRun { id: Uuid::new_v4(),
                       process_id: draft.process_id,
                       date: draft.date,
                       planned_time_min: draft.planned_time_min,
                       downtime_min: draft.downtime_min,
                       run_time_min: derived.run_time_min,
                       total_count: draft.total_count,
                       reject_count: draft.reject_count,
                       good_count: derived.good_count,
                       ideal_cycle_time_sec: draft.ideal_cycle_time_sec,
                       availability: derived.availability,
                       performance: derived.performance,
                       quality: derived.quality,
                       oee: derived.oee,
                       recipe_id: draft.recipe_id,
                       produced_units: draft.produced_units,
                       notes: draft.notes };

    let produced_units = draft.produced_units.unwrap_or(0.0);
    let recipe_id = match draft.recipe_id {
        Some(id) if produced_units > 0.0 => Some(id),
        _ => None,
    };

    let mut consumptions = Vec::new();
    let mut shortages = Vec::new();

    if let Some(recipe_id) = recipe_id {
        if doc.recipe(recipe_id).is_none() {
            return Err(StoreError::NotFound { entity: "Recipe", id: recipe_id });
        }

        // Fase snapshot: el documento aún no tiene ningún débito de esta
        // corrida, así que cada lectura de stock es el baseline intacto.
        for item in doc.items_of_recipe(recipe_id) {
            let product = doc.product(item.product_id)
                             .ok_or(StoreError::NotFound { entity: "Product",
                                                           id: item.product_id })?;
            let needed = item.qty_per_unit * produced_units;
            let available = product.current_stock;
            consumptions.push(Consumption { product_id: item.product_id,
                                            quantity: needed });
            if needed > available {
                shortages.push(Shortage { product_id: item.product_id,
                                          needed,
                                          available });
            }
        }
    }

    doc.oee_runs.push(run.clone());

    // Fase de aplicación: débitos para todos los intentos, con o sin
    // faltante. Los productos ya fueron resueltos en la fase snapshot.
    for c in &consumptions {
        ledger::post_movement(doc,
                              MovementDraft { product_id: c.product_id,
                                              kind: MovementKind::Out,
                                              quantity: c.quantity,
                                              reason: Some(CONSUMPTION_REASON.to_string()),
                                              linked_run_id: Some(run.id) })?;
    }

    if !shortages.is_empty() {
        log::warn!("corrida {} registrada con {} faltante(s)", run.id, shortages.len());
    }

    Ok(RunOutcome { run, consumptions, shortages })
}
