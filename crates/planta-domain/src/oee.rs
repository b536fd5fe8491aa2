// oee.rs
//
// Cálculo OEE (Overall Equipment Effectiveness): funciones puras y
// deterministas, sin efectos secundarios. Todos los ratios se recortan al
// rango [0, 1]; las divisiones por cero se resuelven devolviendo 0.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Recorta un ratio al rango [0, 1].
pub fn clamp(x: f64) -> f64 {
    x.max(0.0).min(1.0)
}

/// Tiempo efectivo de corrida en minutos: `max(0, planeado - max(0, paro))`.
pub fn run_time(planned_min: f64, downtime_min: f64) -> f64 {
    (planned_min - downtime_min.max(0.0)).max(0.0)
}

/// Disponibilidad: fracción del tiempo planeado efectivamente corrida.
/// Un tiempo planeado no positivo fuerza 0 en vez de dividir por cero.
pub fn availability(run_time_min: f64, planned_min: f64) -> f64 {
    if planned_min <= 0.0 {
        return 0.0;
    }
    clamp(run_time_min / planned_min)
}

/// Rendimiento: fracción del máximo teórico alcanzada durante la corrida.
/// Tiempo de corrida o ciclo ideal no positivos fuerzan 0.
pub fn performance(ideal_cycle_sec: f64, total_count: f64, run_time_min: f64) -> f64 {
    let run_time_sec = run_time_min * 60.0;
    if run_time_sec <= 0.0 || ideal_cycle_sec <= 0.0 {
        return 0.0;
    }
    clamp((ideal_cycle_sec * total_count) / run_time_sec)
}

/// Unidades buenas: `max(0, total - max(0, rechazo))`. Nunca negativo, incluso
/// con `rechazo > total`.
pub fn good_count(total_count: f64, reject_count: f64) -> f64 {
    (total_count - reject_count.max(0.0)).max(0.0)
}

/// Calidad: fracción de unidades no defectuosas. Total no positivo fuerza 0.
pub fn quality(total_count: f64, reject_count: f64) -> f64 {
    if total_count <= 0.0 {
        return 0.0;
    }
    clamp(good_count(total_count, reject_count) / total_count)
}

/// OEE = Disponibilidad × Rendimiento × Calidad, recortado a [0, 1].
pub fn oee(a: f64, p: f64, q: f64) -> f64 {
    clamp(a * p * q)
}

/// Contadores crudos de una corrida, tal como los captura la capa de entrada.
///
/// [`OeeInput::compute`] deriva todos los campos calculados de una sola vez;
/// el servicio lo usa para garantizar los invariantes [0, 1] sin depender de
/// lo que haya calculado el llamador.
#[derive(Debug, Clone, Copy)]
pub struct OeeInput {
    pub planned_time_min: f64,
    pub downtime_min: f64,
    pub total_count: f64,
    pub reject_count: f64,
    pub ideal_cycle_time_sec: f64,
}

/// Campos derivados de una corrida OEE.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OeeDerived {
    pub run_time_min: f64,
    pub good_count: f64,
    pub availability: f64,
    pub performance: f64,
    pub quality: f64,
    pub oee: f64,
}

impl OeeInput {
    pub fn compute(&self) -> OeeDerived {
        let run_time_min = run_time(self.planned_time_min, self.downtime_min);
        let a = availability(run_time_min, self.planned_time_min);
        let p = performance(self.ideal_cycle_time_sec, self.total_count, run_time_min);
        let q = quality(self.total_count, self.reject_count);
        OeeDerived { run_time_min,
                     good_count: good_count(self.total_count, self.reject_count),
                     availability: a,
                     performance: p,
                     quality: q,
                     oee: oee(a, p, q) }
    }
}

/// Corrida de producción con sus métricas OEE. Inmutable una vez registrada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OeeRun {
    pub id: Uuid,
    pub process_id: Uuid,
    pub date: NaiveDate,
    pub planned_time_min: f64,
    pub downtime_min: f64,
    pub run_time_min: f64,
    pub total_count: f64,
    pub reject_count: f64,
    pub good_count: f64,
    pub ideal_cycle_time_sec: f64,
    pub availability: f64,
    pub performance: f64,
    pub quality: f64,
    pub oee: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub produced_units: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
