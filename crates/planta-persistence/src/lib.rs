//! Persistencia durable para el puerto `DocumentStore`.
//! Este crate expone `FileDocumentStore`: el documento completo se guarda
//! como un único blob JSON (documento + revisión) en un archivo, con
//! reemplazo atómico. Es el respaldo durable detrás del mismo puerto que
//! implementa el store en memoria de `planta-repo`.

mod file_store;

pub use file_store::{new_from_env, FileDocumentStore, ENV_DB_PATH};
