// process.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Proceso productivo de la planta (p.ej. "Horneado", "Envasado").
///
/// Referenciado por recetas y corridas OEE. El nombre no es único pero se
/// trata como referencia estable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
}
