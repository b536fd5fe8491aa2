// Archivo: store.rs
// Propósito: definir el trait `DocumentStore`, el puerto de almacenamiento
// que deben implementar las persistencias (archivo, in-memory, etc.). El
// medio persiste un único blob opaco: el documento completo bajo una clave.
use crate::errors::Result;
use planta_domain::Document;

/// Documento almacenado junto con su revisión.
///
/// La revisión crece monotónicamente con cada reemplazo y es la base del
/// control optimista: quien escribe presenta la revisión que leyó.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub document: Document,
    pub revision: u64,
}

/// Resultado de un reemplazo del documento.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistResult {
    /// Escritura aceptada; `new_revision` es la revisión resultante.
    Ok { new_revision: u64 },
    /// La revisión esperada no coincide con la almacenada.
    Conflict,
}

/// Contrato mínimo del almacenamiento de documentos.
///
/// El store no expone almacenamiento por entidad: nunca se persiste un
/// documento parcial. `replace` sustituye el documento completo y aplica el
/// check de revisión; un store recién creado acepta `expected_revision == 0`.
pub trait DocumentStore: Send + Sync {
    /// Lee el documento almacenado y su revisión, o `None` si aún no existe.
    fn load(&self) -> Result<Option<StoredDocument>>;

    /// Reemplaza el documento completo si `expected_revision` sigue siendo la
    /// revisión almacenada. Devuelve `PersistResult::Conflict` en caso
    /// contrario, sin modificar nada.
    fn replace(&self, document: &Document, expected_revision: u64) -> Result<PersistResult>;
}
