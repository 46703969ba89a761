//! rail-core: cadenas "railway-oriented" de steps heterogéneos.
//!
//! Un `Outcome` recorre una `Chain` de steps en orden de declaración. Una vez
//! registrado un fallo, los steps no supervisores se saltan; los
//! supervisores (logging, recuperación, limpieza) se ejecutan siempre.
//!
//! Módulos:
//! - `outcome`: el valor que viaja (payload + mensajes + fallos).
//! - `step`: las formas de step aceptadas y su adaptación a `Handler`.
//! - `chain`: construcción y ejecución de la cadena.
//! - `tracker`: el "último outcome escrito" de una invocación.
//! - `stream`: aplicación de una cadena a un canal de inputs.
//! - `trace`: traza serializable por invocación.
pub mod chain;
pub mod errors;
pub mod handler;
pub mod outcome;
pub mod step;
pub mod stream;
pub mod trace;
pub mod tracker;

pub use chain::{Chain, ChainBuilder};
pub use errors::{BoxError, RailError};
pub use handler::{handler_fn, BoxedHandler, Handler, Noop};
pub use outcome::{Outcome, OutcomeReport};
pub use step::Step;
pub use stream::{pipe, pipe_async, pipe_with_capacity};
pub use trace::{RunTrace, TraceEvent, TraceEventKind};
pub use tracker::Tracker;
