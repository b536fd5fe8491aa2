//! Crate `planta-repo` — repositorio de datos de la planta.
//!
//! Este crate define el puerto de almacenamiento `DocumentStore` (un blob
//! opaco: el documento completo bajo una clave, con revisión), una
//! implementación en memoria útil para pruebas (`InMemoryDocumentStore`),
//! el motor de migraciones de esquema, el libro de stock de solo-agregado,
//! el motor de consumo por receta y el servicio orquestador `PlantaService`.
//!
//! Diseño resumido:
//! - Un único escritor lógico: cada operación es un ciclo síncrono completo
//!   leer-modificar-escribir sobre una copia de trabajo del documento.
//! - Locking optimista: las escrituras presentan la revisión leída y el
//!   store rechaza escrituras contra una revisión vieja (`Conflict`).
//! - Los faltantes de receta se detectan contra un snapshot previo a todo
//!   débito y son informativos: nunca bloquean la corrida.
//!
//! Ejemplo rápido:
//! ```rust
//! use planta_repo::{InMemoryDocumentStore, PlantaService};
//! use std::sync::Arc;
//! let store = Arc::new(InMemoryDocumentStore::new());
//! let service = PlantaService::new(store);
//! let doc = service.read_all().unwrap();
//! assert!(!doc.products.is_empty());
//! ```
pub mod consumption;
pub mod errors;
pub mod ledger;
pub mod migration;
pub mod seed;
pub mod service;
pub mod store;
pub mod stubs;

pub use consumption::{Consumption, RunDraft, RunOutcome, Shortage, CONSUMPTION_REASON};
pub use errors::{Result, StoreError};
pub use ledger::MovementDraft;
pub use migration::{migrate, CURRENT_SCHEMA_VERSION};
pub use seed::demo_document;
pub use service::PlantaService;
pub use store::{DocumentStore, PersistResult, StoredDocument};
pub use stubs::InMemoryDocumentStore;
