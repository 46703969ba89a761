//! Middleware supervisores: envuelven el resto de la cadena y siempre se
//! ejecutan, haya o no fallos.

use std::fmt::Debug;

use log::{debug, info};
use rail_core::{handler_fn, BoxedHandler, Step, Tracker};

pub const LOGGED: &str = "logged";

/// Ejecuta el resto de la cadena y luego registra el resultado en el log
/// junto con el mensaje `logged`.
pub fn logger<T>() -> Step<T>
    where T: Debug + 'static
{
    Step::middleware(|next: BoxedHandler<T>| {
        handler_fn(move |t: &mut Tracker<T>| {
            next.handle(t);
            let last = t.last();
            info!("chain finished: value={:?} messages={} failures={}",
                  last.value(),
                  last.messages().len(),
                  last.failures().len());
            t.last_mut().add_message(LOGGED);
        })
    })
}

/// Vuelca cada fallo registrado al log de debug una vez que el resto de la
/// cadena terminó. No modifica el outcome.
pub fn dump_errors<T: 'static>() -> Step<T> {
    Step::middleware(|next: BoxedHandler<T>| {
        handler_fn(move |t: &mut Tracker<T>| {
            next.handle(t);
            for (i, failure) in t.last().failures().iter().enumerate() {
                debug!("failure #{i}: {failure}");
            }
        })
    })
}
