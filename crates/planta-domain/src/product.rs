// product.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unidad de medida de un producto de inventario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "kg")]
    Kg,
    #[serde(rename = "L")]
    L,
    #[serde(rename = "u")]
    U,
}

/// Estado derivado de un producto respecto a su punto de reorden.
///
/// Siempre es una función del stock actual; nunca se fija a mano. Después de
/// cualquier operación que toque `current_stock` debe recalcularse con
/// [`StockStatus::derive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    Faltante,
    Bajo,
    EnStock,
}

impl StockStatus {
    /// Deriva el estado a partir del stock actual y el punto de reorden.
    ///
    /// - `current_stock <= 0` → `Faltante`
    /// - `0 < current_stock <= reorder_point` → `Bajo`
    /// - en otro caso → `EnStock`
    pub fn derive(current_stock: f64, reorder_point: f64) -> Self {
        if current_stock <= 0.0 {
            StockStatus::Faltante
        } else if current_stock <= reorder_point {
            StockStatus::Bajo
        } else {
            StockStatus::EnStock
        }
    }
}

/// Producto de inventario (materia prima o insumo).
///
/// `status` es un campo derivado: se sobreescribe tras cada movimiento de
/// stock. El SKU es la clave humana; el `id` es la clave de referencia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub unit: Unit,
    pub current_stock: f64,
    pub reorder_point: f64,
    #[serde(default = "default_status")]
    pub status: StockStatus,
}

// Los documentos con schemaVersion 0 no traían `status`; la migración 0→1 lo
// recalcula para todos los productos, así que el valor inicial es provisional.
fn default_status() -> StockStatus {
    StockStatus::EnStock
}

impl Product {
    /// Recalcula `status` en función del stock actual.
    pub fn rederive_status(&mut self) {
        self.status = StockStatus::derive(self.current_stock, self.reorder_point);
    }
}
