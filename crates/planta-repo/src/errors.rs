// Archivo: errors.rs
// Propósito: definir los errores del repositorio y el alias Result<T> usado
// por las APIs del crate.
use thiserror::Error;
use uuid::Uuid;

/// Errores del repositorio de planta.
///
/// - `NotFound`: referencia a una entidad inexistente durante una operación.
/// - `Conflict`: la revisión esperada ya no es la revisión almacenada.
/// - `Parse`: payload de importación malformado.
/// - `Storage`: fallo del medio de almacenamiento subyacente.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Referencia no resuelta. Nunca se ignora ni se autocorrige: la
    /// operación completa falla y el documento queda sin modificar.
    #[error("No encontrado: {entity} con id={id}")]
    NotFound { entity: &'static str, id: Uuid },
    /// Conflicto optimista de revisión al escribir el documento.
    #[error("Conflicto de revisión: {0}")]
    Conflict(String),
    /// Entrada de importación que no deserializa al documento.
    #[error("Documento malformado: {0}")]
    Parse(String),
    /// Error del almacenamiento (archivo, mutex envenenado, etc.).
    #[error("Error de almacenamiento: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Parse(e.to_string())
    }
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, StoreError>;
