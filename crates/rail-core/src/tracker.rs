//! Tracker: el "último Outcome escrito" de una invocación.
//!
//! Cada invocación de una cadena posee exactamente un `Tracker`; no se
//! comparte entre invocaciones concurrentes. Los handlers leen siempre el
//! valor actual del tracker (no un parámetro potencialmente obsoleto), de
//! modo que las mutaciones de un step son visibles para todos los
//! siguientes, incluso a través de formas que no reciben el `Outcome`
//! explícitamente.

use crate::outcome::Outcome;
use crate::trace::{RunTrace, TraceEventKind};

#[derive(Debug)]
pub struct Tracker<T> {
    last: Outcome<T>,
    trace: RunTrace,
}

impl<T> Tracker<T> {
    pub fn new(initial: Outcome<T>) -> Self {
        Self { last: initial,
               trace: RunTrace::new() }
    }

    /// Último outcome escrito.
    #[inline]
    pub fn last(&self) -> &Outcome<T> {
        &self.last
    }

    #[inline]
    pub fn last_mut(&mut self) -> &mut Outcome<T> {
        &mut self.last
    }

    /// Reemplaza el último outcome y devuelve el anterior.
    pub fn write(&mut self, outcome: Outcome<T>) -> Outcome<T> {
        std::mem::replace(&mut self.last, outcome)
    }

    /// Extrae el último outcome dejando uno vacío en su lugar.
    ///
    /// Útil para steps que consumen el outcome y escriben uno nuevo.
    pub fn take(&mut self) -> Outcome<T> {
        std::mem::take(&mut self.last)
    }

    #[inline]
    pub fn has_failed(&self) -> bool {
        self.last.has_failed()
    }

    pub fn trace(&self) -> &RunTrace {
        &self.trace
    }

    pub(crate) fn record(&mut self, step_index: usize, shape: &str, kind: TraceEventKind) {
        self.trace.record(step_index, shape, kind);
    }

    pub fn into_last(self) -> Outcome<T> {
        self.last
    }

    pub fn into_parts(self) -> (Outcome<T>, RunTrace) {
        (self.last, self.trace)
    }
}
