// Archivo: service.rs
// Propósito: implementar `PlantaService`, la capa orquestadora que expone
// las operaciones de alto nivel sobre el documento. Cada operación es un
// ciclo completo leer-modificar-escribir: se carga el documento (sembrando y
// migrando si hace falta), se muta una copia de trabajo y se confirma con la
// revisión leída. Esta capa es la única API que la UI debe invocar.
use crate::consumption::{self, RunDraft, RunOutcome};
use crate::errors::{Result, StoreError};
use crate::ledger::{self, MovementDraft};
use crate::migration;
use crate::seed;
use crate::store::{DocumentStore, PersistResult};
use planta_domain::{Document, Equipment, MaintenanceLog, MaintenanceTask, Process, Product, Recipe, RecipeItem,
                    StockMovement};
use std::sync::Arc;
use uuid::Uuid;

/// Servicio de alto nivel sobre el documento de planta.
///
/// Inyecta el puerto de almacenamiento para poder probarse contra el store
/// en memoria y respaldarse después con cualquier medio durable.
pub struct PlantaService<S>
    where S: DocumentStore
{
    store: Arc<S>,
}

impl<S> PlantaService<S> where S: DocumentStore
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Carga el documento vigente junto con su revisión. Si el store está
    /// vacío siembra el dataset de demostración; si el documento viene con
    /// esquema atrasado lo migra en memoria.
    fn load_current(&self) -> Result<(Document, u64)> {
        match self.store.load()? {
            Some(stored) => Ok((migration::migrate(stored.document), stored.revision)),
            None => {
                log::info!("store vacío: sembrando documento de demostración");
                let doc = seed::demo_document();
                let revision = self.commit(&doc, 0)?;
                Ok((doc, revision))
            }
        }
    }

    /// Confirma la copia de trabajo contra la revisión leída. Un reemplazo
    /// rechazado se traduce a `StoreError::Conflict`.
    fn commit(&self, doc: &Document, expected_revision: u64) -> Result<u64> {
        match self.store.replace(doc, expected_revision)? {
            PersistResult::Ok { new_revision } => Ok(new_revision),
            PersistResult::Conflict => {
                Err(StoreError::Conflict(format!("la revisión {} ya no es la almacenada", expected_revision)))
            }
        }
    }

    /// Estado completo actual, ya migrado. Siembra en el primer acceso.
    pub fn read_all(&self) -> Result<Document> {
        self.load_current().map(|(doc, _)| doc)
    }

    /// Reemplaza el documento persistido completo. No existe escritura
    /// parcial.
    pub fn write_all(&self, doc: &Document) -> Result<()> {
        let (_, revision) = self.load_current()?;
        self.commit(doc, revision)?;
        Ok(())
    }

    fn upsert_by_id<T, F>(collection: &mut Vec<T>, value: T, same: F)
        where F: Fn(&T, &T) -> bool
    {
        match collection.iter_mut().find(|existing| same(existing, &value)) {
            Some(slot) => *slot = value,
            None => collection.push(value),
        }
    }

    /// Alta o modificación de un proceso.
    pub fn upsert_process(&self, process: Process) -> Result<()> {
        let (mut doc, revision) = self.load_current()?;
        Self::upsert_by_id(&mut doc.processes, process, |a, b| a.id == b.id);
        self.commit(&doc, revision)?;
        Ok(())
    }

    /// Alta o modificación de un producto. El `status` se rederiva siempre:
    /// un cambio de punto de reorden también lo afecta.
    pub fn upsert_product(&self, mut product: Product) -> Result<()> {
        let (mut doc, revision) = self.load_current()?;
        product.rederive_status();
        Self::upsert_by_id(&mut doc.products, product, |a, b| a.id == b.id);
        self.commit(&doc, revision)?;
        Ok(())
    }

    /// Registra un movimiento de stock (libro de solo-agregado) y devuelve
    /// el registro creado.
    pub fn post_movement(&self, draft: MovementDraft) -> Result<StockMovement> {
        let (mut doc, revision) = self.load_current()?;
        let movement = ledger::post_movement(&mut doc, draft)?;
        self.commit(&doc, revision)?;
        Ok(movement)
    }

    /// Alta o modificación de una receta.
    pub fn upsert_recipe(&self, recipe: Recipe) -> Result<()> {
        let (mut doc, revision) = self.load_current()?;
        Self::upsert_by_id(&mut doc.recipes, recipe, |a, b| a.id == b.id);
        self.commit(&doc, revision)?;
        Ok(())
    }

    /// Reemplaza el conjunto completo de líneas de una receta.
    pub fn set_recipe_items(&self, recipe_id: Uuid, items: Vec<RecipeItem>) -> Result<()> {
        let (mut doc, revision) = self.load_current()?;
        if doc.recipe(recipe_id).is_none() {
            return Err(StoreError::NotFound { entity: "Recipe", id: recipe_id });
        }
        doc.recipe_items.retain(|i| i.recipe_id != recipe_id);
        doc.recipe_items.extend(items.into_iter().map(|mut item| {
                                    item.recipe_id = recipe_id;
                                    item
                                }));
        self.commit(&doc, revision)?;
        Ok(())
    }

    /// Elimina una receta y, en cascada, sus líneas. Única entidad del
    /// documento que admite borrado.
    pub fn delete_recipe(&self, recipe_id: Uuid) -> Result<()> {
        let (mut doc, revision) = self.load_current()?;
        if doc.recipe(recipe_id).is_none() {
            return Err(StoreError::NotFound { entity: "Recipe", id: recipe_id });
        }
        doc.recipes.retain(|r| r.id != recipe_id);
        doc.recipe_items.retain(|i| i.recipe_id != recipe_id);
        self.commit(&doc, revision)?;
        Ok(())
    }

    /// Registra una corrida OEE, con consumo por receta si corresponde.
    /// Los campos derivados de la corrida se recalculan aquí; los faltantes
    /// devueltos son informativos y nunca bloquean la escritura.
    pub fn post_run(&self, draft: RunDraft) -> Result<RunOutcome> {
        let (mut doc, revision) = self.load_current()?;
        let outcome = consumption::post_run(&mut doc, draft)?;
        self.commit(&doc, revision)?;
        Ok(outcome)
    }

    /// Alta o modificación de un equipo.
    pub fn upsert_equipment(&self, equipment: Equipment) -> Result<()> {
        let (mut doc, revision) = self.load_current()?;
        Self::upsert_by_id(&mut doc.equipment, equipment, |a, b| a.id == b.id);
        self.commit(&doc, revision)?;
        Ok(())
    }

    /// Alta o modificación de una tarea de mantenimiento.
    pub fn upsert_task(&self, task: MaintenanceTask) -> Result<()> {
        let (mut doc, revision) = self.load_current()?;
        Self::upsert_by_id(&mut doc.maintenance_tasks, task, |a, b| a.id == b.id);
        self.commit(&doc, revision)?;
        Ok(())
    }

    /// Agrega una entrada a la bitácora de una tarea. Solo-agregado.
    pub fn add_maintenance_log(&self, log_entry: MaintenanceLog) -> Result<()> {
        let (mut doc, revision) = self.load_current()?;
        if doc.maintenance_tasks.iter().all(|t| t.id != log_entry.task_id) {
            return Err(StoreError::NotFound { entity: "MaintenanceTask",
                                              id: log_entry.task_id });
        }
        doc.maintenance_logs.push(log_entry);
        self.commit(&doc, revision)?;
        Ok(())
    }

    /// Serializa el documento vigente (post-migración) a JSON legible.
    pub fn export_json(&self) -> Result<String> {
        let (doc, _) = self.load_current()?;
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Importa un documento: parsea, migra y reemplaza destructivamente el
    /// estado persistido. Sin merge ni importación parcial.
    pub fn import_json(&self, text: &str) -> Result<Document> {
        let incoming: Document = serde_json::from_str(text)?;
        let incoming = migration::migrate(incoming);
        let revision = match self.store.load()? {
            Some(stored) => stored.revision,
            None => 0,
        };
        self.commit(&incoming, revision)?;
        log::info!("documento importado: reemplazo completo del estado");
        Ok(incoming)
    }
}
