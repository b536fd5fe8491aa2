// Archivo: report.rs
// Propósito: exportador tabular (CSV) para reportes. Es un colaborador
// externo al núcleo: consume snapshots de solo lectura del documento y no
// carga ningún invariante de dominio. Formato: encabezado con los nombres de
// campo de la primera fila, todos los valores entre comillas (comillas
// internas duplicadas), separados por coma y unidos por salto de línea.
use csv::{QuoteStyle, WriterBuilder};
use indexmap::IndexMap;
use planta_domain::Document;

/// Fila de reporte: pares campo → valor en orden de inserción.
pub type Row = IndexMap<String, String>;

/// Serializa filas a CSV. Devuelve cadena vacía si no hay filas.
pub fn to_csv(rows: &[Row]) -> Result<String, Box<dyn std::error::Error>> {
    let Some(first) = rows.first() else {
        return Ok(String::new());
    };
    let headers: Vec<&String> = first.keys().collect();

    let mut writer = WriterBuilder::new().quote_style(QuoteStyle::Always)
                                         .from_writer(Vec::new());
    writer.write_record(&headers)?;
    for row in rows {
        let record: Vec<&str> = headers.iter()
                                       .map(|h| row.get(*h).map(String::as_str).unwrap_or(""))
                                       .collect();
        writer.write_record(&record)?;
    }
    Ok(String::from_utf8(writer.into_inner()?)?)
}

fn enum_label<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_value(value).ok()
                               .and_then(|v| v.as_str().map(str::to_string))
                               .unwrap_or_default()
}

/// Snapshot tabular del inventario.
pub fn products_rows(doc: &Document) -> Vec<Row> {
    doc.products
       .iter()
       .map(|p| {
           IndexMap::from([("sku".to_string(), p.sku.clone()),
                           ("name".to_string(), p.name.clone()),
                           ("unit".to_string(), enum_label(&p.unit)),
                           ("currentStock".to_string(), p.current_stock.to_string()),
                           ("reorderPoint".to_string(), p.reorder_point.to_string()),
                           ("status".to_string(), enum_label(&p.status))])
       })
       .collect()
}

/// Snapshot tabular de las corridas OEE.
pub fn oee_runs_rows(doc: &Document) -> Vec<Row> {
    doc.oee_runs
       .iter()
       .map(|r| {
           let process = doc.processes
                            .iter()
                            .find(|p| p.id == r.process_id)
                            .map(|p| p.name.clone())
                            .unwrap_or_else(|| r.process_id.to_string());
           IndexMap::from([("date".to_string(), r.date.to_string()),
                           ("process".to_string(), process),
                           ("plannedTimeMin".to_string(), r.planned_time_min.to_string()),
                           ("runTimeMin".to_string(), r.run_time_min.to_string()),
                           ("totalCount".to_string(), r.total_count.to_string()),
                           ("goodCount".to_string(), r.good_count.to_string()),
                           ("availability".to_string(), format!("{:.4}", r.availability)),
                           ("performance".to_string(), format!("{:.4}", r.performance)),
                           ("quality".to_string(), format!("{:.4}", r.quality)),
                           ("oee".to_string(), format!("{:.4}", r.oee))])
       })
       .collect()
}
