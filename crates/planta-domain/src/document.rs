// document.rs
use crate::{Equipment, MaintenanceLog, MaintenanceTask, OeeRun, Process, Product, Recipe, RecipeItem, StockMovement};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Agregado raíz: el documento único que persiste todo el estado de la
/// planta, versionado por `schema_version`.
///
/// Los nombres de campo serializados (camelCase) son el contrato externo de
/// import/export. Las colecciones ausentes en un documento importado se
/// deserializan como vacías; un `schemaVersion` ausente se trata como 0 y lo
/// resuelve el motor de migraciones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub schema_version: u32,
    #[serde(default)]
    pub processes: Vec<Process>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub stock_movements: Vec<StockMovement>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub recipe_items: Vec<RecipeItem>,
    #[serde(default)]
    pub oee_runs: Vec<OeeRun>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub maintenance_tasks: Vec<MaintenanceTask>,
    #[serde(default)]
    pub maintenance_logs: Vec<MaintenanceLog>,
}

impl Document {
    pub fn product(&self, id: Uuid) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn product_mut(&mut self, id: Uuid) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    pub fn recipe(&self, id: Uuid) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Líneas de una receta, en el orden de inserción del documento.
    pub fn items_of_recipe(&self, recipe_id: Uuid) -> Vec<&RecipeItem> {
        self.recipe_items.iter().filter(|i| i.recipe_id == recipe_id).collect()
    }
}
