// recipe.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Receta (lista de materiales) asociada a un proceso.
///
/// Es la única entidad del documento que admite borrado; al eliminarla se
/// eliminan en cascada sus [`RecipeItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub process_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Línea de receta: cantidad de producto requerida por unidad producida.
///
/// `qty_per_unit >= 0` se espera pero no se valida aquí; la validación de
/// entradas es responsabilidad de la capa que llama.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeItem {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub product_id: Uuid,
    pub qty_per_unit: f64,
}
