// maintenance.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Criticidad de un equipo para la operación de la planta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Criticality {
    Alta,
    Media,
    Baja,
}

/// Equipo de planta sujeto a mantenimiento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub area: String,
    pub criticality: Criticality,
}

/// Tipo de intervención de mantenimiento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceKind {
    Preventivo,
    Correctivo,
}

/// Estado de una tarea de mantenimiento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pendiente,
    EnProceso,
    Completado,
}

/// Tarea de mantenimiento programada sobre un equipo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTask {
    pub id: Uuid,
    pub equipment_id: Uuid,
    #[serde(rename = "type")]
    pub kind: MaintenanceKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub scheduled_date: NaiveDate,
    pub status: TaskStatus,
}

/// Bitácora de una tarea de mantenimiento. Solo se agrega, nunca se edita.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLog {
    pub id: Uuid,
    pub task_id: Uuid,
    pub log_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_real: Option<f64>,
}
