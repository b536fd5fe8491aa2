use chrono::{NaiveDate, Utc};
use planta_domain::MovementKind;
use planta_repo::{MovementDraft, PlantaService, RunDraft};
use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;
use uuid::Uuid;

mod report;

/// Pequeño menú interactivo para operar la planta usando el servicio sobre
/// el store de archivo proporcionado por `planta-persistence`.
///
/// Opciones soportadas:
/// 1) Ver inventario
/// 2) Registrar movimiento de stock
/// 3) Registrar corrida OEE (con consumo por receta)
/// 4) Exportar documento JSON
/// 5) Exportar reportes CSV (inventario y corridas)
/// 6) Importar documento JSON desde archivo
/// 7) Salir
fn main() -> Result<(), Box<dyn Error>> {
    let store = Arc::new(planta_persistence::new_from_env());
    let service = PlantaService::new(store);

    loop {
        println!("\n== Planta Ops ==");
        println!("1) Ver inventario");
        println!("2) Registrar movimiento de stock");
        println!("3) Registrar corrida OEE");
        println!("4) Exportar documento JSON");
        println!("5) Exportar reportes CSV");
        println!("6) Importar documento JSON desde archivo");
        println!("7) Salir");
        print!("Elige una opción: ");
        io::stdout().flush().ok();

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;
        match choice.trim() {
            "1" => match service.read_all() {
                Ok(doc) => {
                    println!("\nSKU     | NOMBRE               | STOCK      | REORDEN    | ESTADO");
                    println!("-----------------------------------------------------------------");
                    for p in &doc.products {
                        println!("{:<7} | {:<20} | {:>10.2} | {:>10.2} | {:?}",
                                 p.sku, p.name, p.current_stock, p.reorder_point, p.status);
                    }
                }
                Err(e) => eprintln!("Error leyendo el documento: {}", e),
            },
            "2" => {
                let product_id = match parse_uuid(&prompt("Id de producto (UUID): ")?) {
                    Some(id) => id,
                    None => continue,
                };
                let kind = match prompt("Tipo (IN/OUT/ADJ): ")?.trim().to_uppercase().as_str() {
                    "IN" => MovementKind::In,
                    "OUT" => MovementKind::Out,
                    "ADJ" => MovementKind::Adj,
                    other => {
                        eprintln!("Tipo desconocido: {}", other);
                        continue;
                    }
                };
                let quantity = match parse_f64(&prompt("Cantidad: ")?) {
                    Some(q) => q,
                    None => continue,
                };
                let reason = opt_string(prompt("Motivo (enter para omitir): ")?);
                match service.post_movement(MovementDraft { product_id,
                                                            kind,
                                                            quantity,
                                                            reason,
                                                            linked_run_id: None }) {
                    Ok(m) => println!("Movimiento registrado: {}", m.id),
                    Err(e) => eprintln!("Error registrando movimiento: {}", e),
                }
            }
            "3" => {
                if let Err(e) = registrar_corrida(&service) {
                    eprintln!("Error registrando corrida: {}", e);
                }
            }
            "4" => match service.export_json() {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Error exportando: {}", e),
            },
            "5" => match service.read_all() {
                Ok(doc) => {
                    println!("-- inventario.csv --");
                    println!("{}", report::to_csv(&report::products_rows(&doc))?);
                    println!("-- corridas.csv --");
                    println!("{}", report::to_csv(&report::oee_runs_rows(&doc))?);
                }
                Err(e) => eprintln!("Error leyendo el documento: {}", e),
            },
            "6" => {
                let path = prompt("Ruta del archivo JSON: ")?;
                match std::fs::read_to_string(path.trim()) {
                    Ok(text) => match service.import_json(&text) {
                        Ok(doc) => println!("Importado: {} productos, {} corridas",
                                            doc.products.len(),
                                            doc.oee_runs.len()),
                        Err(e) => eprintln!("Error importando: {}", e),
                    },
                    Err(e) => eprintln!("No se pudo leer el archivo: {}", e),
                }
            }
            "7" => break,
            other => eprintln!("Opción desconocida: {}", other),
        }
    }

    Ok(())
}

fn registrar_corrida<S>(service: &PlantaService<S>) -> Result<(), Box<dyn Error>>
    where S: planta_repo::DocumentStore
{
    let doc = service.read_all()?;
    println!("Procesos disponibles:");
    for p in &doc.processes {
        println!("  {} — {}", p.id, p.name);
    }
    let process_id = match parse_uuid(&prompt("Id de proceso (UUID): ")?) {
        Some(id) => id,
        None => return Ok(()),
    };

    let date = match NaiveDate::parse_from_str(prompt("Fecha (YYYY-MM-DD, enter para hoy): ")?.trim(), "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => Utc::now().date_naive(),
    };
    let planned_time_min = parse_f64(&prompt("Tiempo planeado (min): ")?).unwrap_or(0.0);
    let downtime_min = parse_f64(&prompt("Paros (min): ")?).unwrap_or(0.0);
    let total_count = parse_f64(&prompt("Unidades totales: ")?).unwrap_or(0.0);
    let reject_count = parse_f64(&prompt("Unidades rechazadas: ")?).unwrap_or(0.0);
    let ideal_cycle_time_sec = parse_f64(&prompt("Ciclo ideal (seg/unidad): ")?).unwrap_or(0.0);

    let recipe_id = parse_uuid(&prompt("Id de receta (enter para omitir): ")?);
    let produced_units = parse_f64(&prompt("Unidades producidas (enter para omitir): ")?);

    let outcome = service.post_run(RunDraft { process_id,
                                              date,
                                              planned_time_min,
                                              downtime_min,
                                              total_count,
                                              reject_count,
                                              ideal_cycle_time_sec,
                                              recipe_id,
                                              produced_units,
                                              notes: None })?;

    let run = &outcome.run;
    println!("Corrida {} registrada. A={:.4} P={:.4} Q={:.4} OEE={:.4}",
             run.id, run.availability, run.performance, run.quality, run.oee);
    for c in &outcome.consumptions {
        println!("  consumo: producto {} cantidad {:.3}", c.product_id, c.quantity);
    }
    for f in &outcome.shortages {
        println!("  FALTANTE: producto {} requerido {:.3}, disponible {:.3}", f.product_id, f.needed, f.available);
    }
    Ok(())
}

fn prompt(msg: &str) -> Result<String, Box<dyn Error>> {
    print!("{}", msg);
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

fn parse_uuid(raw: &str) -> Option<Uuid> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match Uuid::parse_str(raw) {
        Ok(id) => Some(id),
        Err(e) => {
            eprintln!("UUID inválido: {}", e);
            None
        }
    }
}

fn parse_f64(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) => Some(v),
        Err(e) => {
            eprintln!("Número inválido: {}", e);
            None
        }
    }
}

fn opt_string(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
