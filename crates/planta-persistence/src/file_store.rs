// Archivo: file_store.rs
// Propósito: implementar `DocumentStore` sobre un archivo JSON. El medio es
// un blob opaco bajo una clave (la ruta del archivo); no hay almacenamiento
// por entidad. La escritura es atómica: archivo temporal + rename.
use planta_domain::Document;
use planta_repo::{DocumentStore, PersistResult, Result, StoreError, StoredDocument};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Variable de entorno con la ruta del archivo de datos.
pub const ENV_DB_PATH: &str = "PLANTA_DB_PATH";

const DEFAULT_DB_PATH: &str = "planta-ops.json";

/// Envoltura persistida: documento más revisión, en un solo blob.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    revision: u64,
    document: Document,
}

/// Store de documentos respaldado por un archivo JSON.
pub struct FileDocumentStore {
    path: PathBuf,
}

/// Construye el store leyendo `PLANTA_DB_PATH` (cargando `.env` si existe);
/// sin la variable usa `planta-ops.json` en el directorio de trabajo.
pub fn new_from_env() -> FileDocumentStore {
    dotenvy::dotenv().ok();
    let path = std::env::var(ENV_DB_PATH).unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    FileDocumentStore::new(path)
}

impl FileDocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_envelope(&self) -> Result<Option<Envelope>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Storage(format!("leyendo {}: {}", self.path.display(), e))),
        };
        let envelope = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Storage(format!("blob corrupto en {}: {}", self.path.display(), e)))?;
        Ok(Some(envelope))
    }

    fn write_envelope(&self, envelope: &Envelope) -> Result<()> {
        let raw = serde_json::to_string_pretty(envelope)
            .map_err(|e| StoreError::Storage(format!("serializando el documento: {}", e)))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).map_err(|e| StoreError::Storage(format!("escribiendo {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| StoreError::Storage(format!("renombrando {}: {}", self.path.display(), e)))?;
        log::debug!("documento persistido en {} (revisión {})", self.path.display(), envelope.revision);
        Ok(())
    }
}

impl DocumentStore for FileDocumentStore {
    fn load(&self) -> Result<Option<StoredDocument>> {
        Ok(self.read_envelope()?.map(|e| StoredDocument { document: e.document,
                                                          revision: e.revision }))
    }

    fn replace(&self, document: &Document, expected_revision: u64) -> Result<PersistResult> {
        let current = self.read_envelope()?.map(|e| e.revision).unwrap_or(0);
        if expected_revision != current {
            log::warn!("conflicto de revisión en {}: esperada {}, almacenada {}",
                       self.path.display(),
                       expected_revision,
                       current);
            return Ok(PersistResult::Conflict);
        }
        let new_revision = current + 1;
        self.write_envelope(&Envelope { revision: new_revision,
                                        document: document.clone() })?;
        Ok(PersistResult::Ok { new_revision })
    }
}
