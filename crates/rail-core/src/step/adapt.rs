//! Adaptador: convierte cada `Step` en un `Handler` enlazado con el
//! siguiente.
//!
//! Regla de cortocircuito: si el último outcome del tracker tiene al menos
//! un fallo, la lógica de usuario de un step no supervisor se salta y se
//! invoca directamente `next` con el tracker intacto.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use log::{trace, warn};

use super::Step;
use crate::errors::RailError;
use crate::handler::{handler_fn, BoxedHandler, Handler};
use crate::outcome::Outcome;
use crate::trace::TraceEventKind;
use crate::tracker::Tracker;

/// Adapta `step` (en la posición `index` de la declaración) enlazándolo con
/// `next`.
pub(crate) fn adapt<T: 'static>(step: Step<T>, index: usize, next: BoxedHandler<T>) -> BoxedHandler<T> {
    let shape = step.shape();
    match step {
        Step::Supervise(f) => handler_fn(move |t: &mut Tracker<T>| {
            t.record(index, shape, TraceEventKind::Ran);
            let current = t.take();
            let restore = LedgerRestore::new(t, &current);
            let produced = f(current);
            restore.finish(produced);
            next.handle(t);
        }),
        Step::Middleware(f) => {
            let wrapped = f(next);
            handler_fn(move |t: &mut Tracker<T>| {
                t.record(index, shape, TraceEventKind::Ran);
                wrapped.handle(t);
            })
        }
        Step::Handle(f) => guarded(index, shape, next, move |t: &mut Tracker<T>, next: &dyn Handler<T>| {
            f(t);
            next.handle(t);
        }),
        Step::Handler(h) => guarded(index, shape, next, move |t: &mut Tracker<T>, next: &dyn Handler<T>| {
            h.handle(t);
            next.handle(t);
        }),
        Step::Lazy(f) => guarded(index, shape, next, move |t: &mut Tracker<T>, next: &dyn Handler<T>| {
            let produced = f();
            produced.handle(t);
            next.handle(t);
        }),
        Step::Manual(f) => guarded(index, shape, next, move |t: &mut Tracker<T>, next: &dyn Handler<T>| f(t, next)),
        Step::TryMap(f) => guarded(index, shape, next, move |t: &mut Tracker<T>, next: &dyn Handler<T>| {
            match t.last().value().map(|v| f(v)) {
                Some(Ok(value)) => {
                    t.last_mut().set_value(value);
                }
                Some(Err(err)) => {
                    t.last_mut().add_failure(err);
                }
                None => {
                    t.last_mut().add_failure(RailError::MissingValue { shape });
                }
            }
            next.handle(t);
        }),
        Step::Check(f) => guarded(index, shape, next, move |t: &mut Tracker<T>, next: &dyn Handler<T>| {
            match t.last().value().map(|v| f(v)) {
                Some(Ok(())) => {}
                Some(Err(err)) => {
                    t.last_mut().add_failure(err);
                }
                None => {
                    t.last_mut().add_failure(RailError::MissingValue { shape });
                }
            }
            next.handle(t);
        }),
        // `f` consume el payload: si entra en pánico bajo `recover` el
        // outcome queda sin valor (los ledgers no se tocan).
        Step::Map(f) => guarded(index, shape, next, move |t: &mut Tracker<T>, next: &dyn Handler<T>| {
            match t.last_mut().take_value() {
                Some(value) => {
                    t.last_mut().set_value(f(value));
                }
                None => {
                    t.last_mut().add_failure(RailError::MissingValue { shape });
                }
            }
            next.handle(t);
        }),
        Step::Inspect(f) => guarded(index, shape, next, move |t: &mut Tracker<T>, next: &dyn Handler<T>| {
            match t.last().value() {
                Some(value) => f(value),
                None => {
                    t.last_mut().add_failure(RailError::MissingValue { shape });
                }
            }
            next.handle(t);
        }),
        Step::Supervised(inner) => handler_fn(move |t: &mut Tracker<T>| {
            t.record(index, shape, TraceEventKind::Ran);
            run_guarded(&inner, t, index, shape);
            next.handle(t);
        }),
        Step::Recover => handler_fn(move |t: &mut Tracker<T>| {
            t.record(index, shape, TraceEventKind::Ran);
            run_guarded(next.as_ref(), t, index, shape);
        }),
        Step::Invalid(invalid_shape) => handler_fn(move |t: &mut Tracker<T>| {
            warn!("step #{index} has an invalid shape: {invalid_shape}");
            t.record(index, shape, TraceEventKind::Invalid);
            t.last_mut()
             .add_message(format!("invalid step #{index}: {invalid_shape}"))
             .add_failure(RailError::InvalidStep { shape: invalid_shape.clone() });
            next.handle(t);
        }),
    }
}

/// Envuelve la lógica de un step no supervisor con la regla de
/// cortocircuito.
fn guarded<T, F>(index: usize, shape: &'static str, next: BoxedHandler<T>, body: F) -> BoxedHandler<T>
    where T: 'static,
          F: Fn(&mut Tracker<T>, &dyn Handler<T>) + Send + Sync + 'static
{
    handler_fn(move |t: &mut Tracker<T>| {
        let failures = t.last().failures().len();
        if failures > 0 {
            trace!("step #{index} ({shape}) skipped: {failures} failure(s) recorded");
            t.record(index, shape, TraceEventKind::Skipped { failures });
            next.handle(t);
            return;
        }
        t.record(index, shape, TraceEventKind::Ran);
        body(t, next.as_ref());
    })
}

/// Invoca `handler` bajo `catch_unwind`; una terminación abrupta se
/// registra como `RailError::Panicked` en el tracker y como evento
/// `Panicked` del step `index` en la traza.
fn run_guarded<T>(handler: &dyn Handler<T>, t: &mut Tracker<T>, index: usize, shape: &'static str) {
    let result = panic::catch_unwind(AssertUnwindSafe(|| handler.handle(t)));
    if let Err(payload) = result {
        let message = panic_message(payload.as_ref());
        warn!("step #{index} ({shape}) recovered from panic: {message}");
        t.record(index, shape, TraceEventKind::Panicked { message: message.clone() });
        t.last_mut().add_failure(RailError::Panicked(message));
    }
}

/// Guarda los ledgers del outcome que un supervisor consume. Si el
/// supervisor termina abruptamente, al soltarse los devuelve al tracker;
/// el payload, ya movido a la lógica de usuario, se pierde.
struct LedgerRestore<'a, T> {
    tracker: &'a mut Tracker<T>,
    snapshot: Option<(Vec<String>, Vec<RailError>)>,
}

impl<'a, T> LedgerRestore<'a, T> {
    fn new(tracker: &'a mut Tracker<T>, current: &Outcome<T>) -> Self {
        Self { tracker,
               snapshot: Some((current.messages().to_vec(), current.failures().to_vec())) }
    }

    /// El supervisor terminó: escribe su outcome y descarta la copia.
    fn finish(mut self, produced: Outcome<T>) {
        self.snapshot = None;
        self.tracker.write(produced);
    }
}

impl<T> Drop for LedgerRestore<'_, T> {
    fn drop(&mut self) {
        if let Some((messages, failures)) = self.snapshot.take() {
            self.tracker.last_mut().restore_ledgers(messages, failures);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Enlaza `steps` de derecha a izquierda partiendo de `terminal`.
///
/// Devuelve la cabeza de la cadena y la cantidad de steps adaptados; las
/// entradas `None` se saltan (pasan de largo).
pub(crate) fn link<T: 'static>(steps: Vec<Option<Step<T>>>, terminal: BoxedHandler<T>) -> (BoxedHandler<T>, usize) {
    let mut head = terminal;
    let mut adapted = 0;
    for (index, step) in steps.into_iter().enumerate().rev() {
        if let Some(step) = step {
            head = adapt(step, index, head);
            adapted += 1;
        }
    }
    (head, adapted)
}
