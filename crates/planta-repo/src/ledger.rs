// Archivo: ledger.rs
// Propósito: libro de stock de solo-agregado. Cada movimiento es un registro
// inmutable; las correcciones son movimientos nuevos. Tras aplicar el efecto
// sobre el producto se recalcula su `status`.
use crate::errors::{Result, StoreError};
use chrono::Utc;
use planta_domain::{Document, MovementKind, StockMovement};
use uuid::Uuid;

/// Datos de entrada para registrar un movimiento de stock.
#[derive(Debug, Clone)]
pub struct MovementDraft {
    pub product_id: Uuid,
    pub kind: MovementKind,
    pub quantity: f64,
    pub reason: Option<String>,
    pub linked_run_id: Option<Uuid>,
}

/// Registra un movimiento sobre el documento: genera id y timestamp, agrega
/// el registro al historial y aplica el efecto con signo sobre el producto.
///
/// Falla con `NotFound` si `product_id` no resuelve, sin tocar el documento.
pub fn post_movement(doc: &mut Document, draft: MovementDraft) -> Result<StockMovement> {
    let product = doc.product_mut(draft.product_id)
                     .ok_or(StoreError::NotFound { entity: "Product",
                                                   id: draft.product_id })?;

    let movement = StockMovement { id: Uuid::new_v4(),
                                   product_id: draft.product_id,
                                   kind: draft.kind,
                                   quantity: draft.quantity,
                                   reason: draft.reason,
                                   linked_run_id: draft.linked_run_id,
                                   created_at: Utc::now() };

    product.current_stock += draft.kind.signed_effect(draft.quantity);
    product.rederive_status();
    doc.stock_movements.push(movement.clone());
    Ok(movement)
}
