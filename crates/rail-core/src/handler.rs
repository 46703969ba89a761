//! Unidad de ejecución uniforme de la cadena.
//!
//! Todo step adaptado termina siendo un `Handler`: recibe el tracker de la
//! invocación y decide si ejecuta lógica de usuario y si invoca al
//! siguiente handler (capturado al construir la cadena).

use std::sync::Arc;

use crate::tracker::Tracker;

pub trait Handler<T>: Send + Sync {
    fn handle(&self, tracker: &mut Tracker<T>);
}

/// Handler compartido; la cadena enlazada es un grafo de `Arc`s inmutable.
pub type BoxedHandler<T> = Arc<dyn Handler<T>>;

impl<T, F> Handler<T> for F where F: Fn(&mut Tracker<T>) + Send + Sync
{
    #[inline]
    fn handle(&self, tracker: &mut Tracker<T>) {
        self(tracker)
    }
}

/// Convierte una closure en `BoxedHandler`.
pub fn handler_fn<T, F>(f: F) -> BoxedHandler<T>
    where T: 'static,
          F: Fn(&mut Tracker<T>) + Send + Sync + 'static
{
    Arc::new(f)
}

/// Handler terminal: no hace nada.
#[derive(Debug, Clone, Copy, Default)]
pub struct Noop;

impl<T> Handler<T> for Noop {
    #[inline]
    fn handle(&self, _tracker: &mut Tracker<T>) {}
}
