//! rail-adapters: steps de ejemplo construidos sobre el contrato público de
//! `rail-core`.
//!
//! Este crate provee:
//! - Steps básicos (`passthrough`, `noop`, `require_exactly`).
//! - Steps numéricos sobre payloads `serde_json::Value` (`parse_int`,
//!   `add_int`, `add_one_if_int`, `add_two_if_int`, `flag_odd_or_even`,
//!   `require_flagged`).
//! - Middlewares supervisores (`logger`, `dump_errors`).
//! - `PreviousDelta`: step con estado que compara cada input con el anterior.
//!
//! Nota: el core no sabe nada de enteros ni de mensajes de paridad; todo eso
//! vive aquí y llega al core sólo como `Step`s.

pub mod errors;
pub mod steps;

pub use errors::AdapterError;
