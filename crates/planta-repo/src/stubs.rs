// Archivo: stubs.rs
// Propósito: implementación en memoria del puerto de almacenamiento, para
// pruebas y wiring rápido. No es durable.
use crate::errors::{Result, StoreError};
use crate::store::{DocumentStore, PersistResult, StoredDocument};
use planta_domain::Document;
use std::sync::{Mutex, MutexGuard};

/// Store de documentos en memoria: un único slot protegido por mutex.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    state: Mutex<Option<StoredDocument>>,
}

impl InMemoryDocumentStore {
    /// Crea un store vacío (sin documento, revisión implícita 0).
    pub fn new() -> Self {
        Self { state: Mutex::new(None) }
    }

    /// Helper para mapear `Mutex::lock()` en un `Result` con
    /// `StoreError::Storage`.
    fn lock(&self) -> Result<MutexGuard<'_, Option<StoredDocument>>> {
        self.state
            .lock()
            .map_err(|e| StoreError::Storage(format!("mutex poisoned: {:?}", e)))
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn load(&self) -> Result<Option<StoredDocument>> {
        Ok(self.lock()?.clone())
    }

    fn replace(&self, document: &Document, expected_revision: u64) -> Result<PersistResult> {
        let mut state = self.lock()?;
        let current = state.as_ref().map(|s| s.revision).unwrap_or(0);
        if expected_revision != current {
            return Ok(PersistResult::Conflict);
        }
        let new_revision = current + 1;
        *state = Some(StoredDocument { document: document.clone(),
                                       revision: new_revision });
        Ok(PersistResult::Ok { new_revision })
    }
}
