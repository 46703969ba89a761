//! Fallos de dominio de los steps de ejemplo.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error("not {expected}")] Unexpected { expected: String },
    #[error("not-an-integer: {0}")] NotAnInteger(String),
    #[error("not-processed")] NotProcessed,
    #[error("overflow: {value} + {addend}")] Overflow { value: i64, addend: i64 },
}
