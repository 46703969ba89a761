//! Cadena de demostración que usa el binario: una línea de texto entra,
//! un reporte JSON sale.

use rail_adapters::steps::{add_int, dump_errors, flag_odd_or_even, logger, parse_int, require_flagged, PreviousDelta};
use rail_core::{Chain, Outcome, OutcomeReport, Step};
use serde_json::Value;

use crate::errors::CoreError;

/// `logger → dump_errors → parse_int → add_int(addend) → delta → paridad →
/// processed`.
///
/// Cada llamada crea su propio `PreviousDelta`: la cadena devuelta no debe
/// compartirse entre streams concurrentes.
pub fn demo_chain(addend: i64) -> Chain<Value> {
    Chain::<Value>::builder().step(logger())
                             .step(dump_errors())
                             .step(parse_int())
                             .maybe((addend != 0).then(|| add_int(addend)))
                             .step(Step::handler(PreviousDelta::new()))
                             .step(flag_odd_or_even())
                             .step(require_flagged())
                             .build()
}

/// Decodifica una línea cruda de stdin (sin `\n` / `\r\n` final). Los bytes
/// que no son UTF-8 válido se reemplazan por U+FFFD: la línea sigue por la
/// cadena y falla en `parse_int` en vez de cortar la lectura.
pub fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

pub fn line_input(line: impl Into<String>) -> Outcome<Value> {
    Outcome::new(Value::String(line.into()))
}

pub fn render(report: &OutcomeReport<'_, Value>) -> Result<String, CoreError> {
    Ok(serde_json::to_string(report)?)
}
