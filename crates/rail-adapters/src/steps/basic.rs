//! Steps triviales: útiles para armar cadenas de prueba.

use std::fmt::Display;

use rail_core::{Outcome, RailError, Step, Tracker};

use crate::errors::AdapterError;

/// Supervisor que devuelve el outcome tal cual.
pub fn passthrough<T: 'static>() -> Step<T> {
    Step::supervise(|outcome: Outcome<T>| outcome)
}

/// Handler explícito que no hace nada.
pub fn noop<T: 'static>() -> Step<T> {
    Step::handle(|_: &mut Tracker<T>| {})
}

/// Falla con `not {expected}` salvo que el payload sea exactamente
/// `expected`. No modifica el payload.
pub fn require_exactly<T>(expected: T) -> Step<T>
    where T: PartialEq + Display + Send + Sync + 'static
{
    Step::check(move |value: &T| {
        if *value == expected {
            Ok(())
        } else {
            Err(AdapterError::Unexpected { expected: expected.to_string() }.into())
        }
    })
}

/// `true` si `failure` es el centinela de `require_exactly`.
pub fn is_unexpected(failure: &RailError) -> bool {
    matches!(failure.downcast_ref::<AdapterError>(), Some(AdapterError::Unexpected { .. }))
}
