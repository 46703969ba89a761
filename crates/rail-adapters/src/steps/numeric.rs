//! Steps numéricos sobre payloads dinámicos (`serde_json::Value`).
//!
//! Los payloads llegan sin tipo fijo (p. ej. líneas de texto), así que cada
//! step decide si el valor es un entero antes de operar.

use log::debug;
use rail_core::{BoxError, Outcome, RailError, Step, Tracker};
use serde_json::Value;

use crate::errors::AdapterError;

pub const IS_ODD: &str = "is-odd";
pub const IS_EVEN: &str = "is-even";
pub const PROCESSED: &str = "processed";

fn not_an_integer(value: &Value) -> BoxError {
    Box::new(AdapterError::NotAnInteger(value.to_string()))
}

/// Convierte un string numérico en entero; los enteros pasan tal cual.
pub fn parse_int() -> Step<Value> {
    Step::try_map(|value: &Value| {
        match value {
            Value::Number(n) if n.is_i64() => Ok(value.clone()),
            Value::String(s) => s.trim()
                                 .parse::<i64>()
                                 .map(Value::from)
                                 .map_err(|_| not_an_integer(value)),
            other => Err(not_an_integer(other)),
        }
    })
}

/// Verifica que el payload sea entero y calcula `payload + addend` sin
/// reemplazarlo; falla con `not-an-integer` en caso contrario.
fn add_if_int(addend: i64) -> Step<Value> {
    Step::check(move |value: &Value| match value.as_i64() {
        Some(n) => {
            debug!("{n} + {addend} = {}", n.saturating_add(addend));
            Ok(())
        }
        None => Err(not_an_integer(value)),
    })
}

/// Suma `addend` al payload entero y lo reemplaza por el resultado.
pub fn add_int(addend: i64) -> Step<Value> {
    Step::try_map(move |value: &Value| {
        let n = value.as_i64().ok_or_else(|| not_an_integer(value))?;
        match n.checked_add(addend) {
            Some(sum) => Ok(Value::from(sum)),
            None => Err(Box::new(AdapterError::Overflow { value: n, addend }) as BoxError),
        }
    })
}

pub fn add_one_if_int() -> Step<Value> {
    add_if_int(1)
}

pub fn add_two_if_int() -> Step<Value> {
    add_if_int(2)
}

/// Registra `is-odd` / `is-even` según la paridad del payload entero.
pub fn flag_odd_or_even() -> Step<Value> {
    Step::handle(|t: &mut Tracker<Value>| {
        let flag = match t.last().value().and_then(Value::as_i64) {
            Some(n) if n % 2 == 0 => IS_EVEN,
            Some(_) => IS_ODD,
            None => return,
        };
        t.last_mut().add_message(flag);
    })
}

/// Supervisor final: marca `processed` si hubo un flag de paridad, o
/// registra `not-processed` en caso contrario.
pub fn require_flagged() -> Step<Value> {
    Step::supervise(|mut outcome: Outcome<Value>| {
        let flagged = outcome.messages().iter().any(|m| m == IS_ODD || m == IS_EVEN);
        if flagged {
            outcome.add_message(PROCESSED);
        } else {
            outcome.add_failure(RailError::step(AdapterError::NotProcessed));
        }
        outcome
    })
}
