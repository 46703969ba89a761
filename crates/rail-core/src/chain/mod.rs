//! Cadena: steps adaptados y enlazados en orden de declaración.
//!
//! La construcción pliega de derecha a izquierda partiendo de un handler
//! terminal `Noop`: cada step adaptado recibe "todo lo construido hasta
//! ahora" como `next`. El resultado es la cabeza de la cadena, y el primer
//! step declarado es el primero en ejecutarse.
//!
//! ```ignore
//! let chain = Chain::new(vec![Step::map(|v: i32| v + 1), Step::check(is_even)]);
//! let out = chain.run(Outcome::new(1));
//! ```

mod builder;

pub use builder::ChainBuilder;

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::errors::RailError;
use crate::handler::{BoxedHandler, Handler, Noop};
use crate::outcome::Outcome;
use crate::step::adapt::link;
use crate::step::Step;
use crate::trace::RunTrace;
use crate::tracker::Tracker;

enum Head<T> {
    /// Lista de steps vacía: cada invocación registra `NoProcessor`.
    NoProcessor,
    Linked(BoxedHandler<T>),
}

impl<T> Clone for Head<T> {
    fn clone(&self) -> Self {
        match self {
            Head::NoProcessor => Head::NoProcessor,
            Head::Linked(h) => Head::Linked(Arc::clone(h)),
        }
    }
}

/// Cadena inmutable; clonarla comparte el grafo de handlers.
pub struct Chain<T> {
    head: Head<T>,
    len: usize,
}

impl<T> Clone for Chain<T> {
    fn clone(&self) -> Self {
        Self { head: self.head.clone(),
               len: self.len }
    }
}

impl<T> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").field("len", &self.len).finish()
    }
}

impl<T: 'static> Chain<T> {
    /// Adapta y enlaza `steps`.
    ///
    /// Acepta tanto `Step<T>` como `Option<Step<T>>`; las entradas `None`
    /// se saltan. Una lista vacía no es un error de construcción: la cadena
    /// resultante registra `RailError::NoProcessor` en cada invocación sin
    /// ejecutar nada.
    pub fn new<I, S>(steps: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<Option<Step<T>>>
    {
        let steps: Vec<Option<Step<T>>> = steps.into_iter().map(Into::into).collect();
        if steps.is_empty() {
            debug!("chain built without steps");
            return Self { head: Head::NoProcessor,
                          len: 0 };
        }
        let declared = steps.len();
        let (head, len) = link(steps, Arc::new(Noop));
        debug!("chain built: {len} step(s) adapted out of {declared} declared");
        Self { head: Head::Linked(head),
               len }
    }

    pub fn builder() -> ChainBuilder<T> {
        ChainBuilder::new()
    }
}

impl<T> Chain<T> {
    /// Cantidad de steps adaptados (sin contar las entradas `None`).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Ejecuta la cadena sobre `input` y devuelve el outcome final.
    pub fn run(&self, input: Outcome<T>) -> Outcome<T> {
        self.run_traced(input).0
    }

    /// Igual que `run`, devolviendo además la traza de la invocación.
    pub fn run_traced(&self, input: Outcome<T>) -> (Outcome<T>, RunTrace) {
        let mut tracker = Tracker::new(input);
        debug!("chain run {} started ({} step(s))", tracker.trace().run_id, self.len);
        self.handle(&mut tracker);
        tracker.into_parts()
    }
}

impl<T> Handler<T> for Chain<T> {
    fn handle(&self, tracker: &mut Tracker<T>) {
        match &self.head {
            Head::NoProcessor => {
                tracker.last_mut().add_failure(RailError::NoProcessor);
            }
            Head::Linked(head) => head.handle(tracker),
        }
    }
}

impl<T: 'static> FromIterator<Step<T>> for Chain<T> {
    fn from_iter<I: IntoIterator<Item = Step<T>>>(iter: I) -> Self {
        Chain::new(iter)
    }
}
