// Archivo: migration.rs
// Propósito: llevar un documento cargado a la versión de esquema vigente.
// Corre en cada carga y en cada importación; nunca en escrituras normales
// (toda escritura ya lleva la versión vigente).
use planta_domain::Document;

/// Versión de esquema vigente del documento.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Aplica secuencialmente los pasos de migración hasta la versión vigente.
///
/// Un `schemaVersion` ausente deserializa como 0. Idempotente: un documento
/// ya vigente se devuelve sin cambios.
pub fn migrate(mut doc: Document) -> Document {
    while doc.schema_version < CURRENT_SCHEMA_VERSION {
        match doc.schema_version {
            // 0→1: `status` pasó a ser campo derivado persistido; se
            // recalcula para todos los productos.
            0 => {
                for product in &mut doc.products {
                    product.rederive_status();
                }
            }
            _ => {}
        }
        doc.schema_version += 1;
    }
    doc
}
