// stock.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tipo de movimiento del libro de stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    In,
    Out,
    Adj,
}

impl MovementKind {
    /// Efecto con signo de un movimiento sobre el stock del producto.
    ///
    /// `In` suma, `Out` resta y `Adj` aplica la cantidad como delta con signo
    /// (el llamador puede pasar una cantidad negativa).
    pub fn signed_effect(self, quantity: f64) -> f64 {
        match self {
            MovementKind::In => quantity,
            MovementKind::Out => -quantity,
            MovementKind::Adj => quantity,
        }
    }
}

/// Registro inmutable del libro de stock.
///
/// Los movimientos nunca se editan ni se borran: una corrección es un
/// movimiento nuevo. Para cualquier producto vale
/// `stock_actual == stock_base + Σ efecto(movimientos)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub kind: MovementKind,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_run_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
