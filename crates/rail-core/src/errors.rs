//! Fallos registrados por el motor y por los steps de usuario.
//!
//! `RailError` es el único tipo que vive en el ledger `failures` de un
//! `Outcome`. Es `Clone` para que un `Outcome` pueda duplicarse sin perder
//! información; los errores de usuario se comparten mediante `Arc`.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Error dinámico que devuelven los steps con forma de valor.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Error, Clone)]
pub enum RailError {
    #[error("no processor in chain")] NoProcessor,
    #[error("invalid step: {shape}")] InvalidStep { shape: String },
    #[error("step '{shape}' found no payload")] MissingValue { shape: &'static str },
    #[error("step panicked: {0}")] Panicked(String),
    #[error(transparent)] Step(Arc<dyn StdError + Send + Sync + 'static>),
}

impl RailError {
    /// Envuelve cualquier error de usuario.
    pub fn step<E>(err: E) -> Self
        where E: StdError + Send + Sync + 'static
    {
        RailError::Step(Arc::new(err))
    }

    /// Fallo de usuario a partir de un texto plano.
    pub fn msg(text: impl Into<String>) -> Self {
        RailError::Step(Arc::new(Message(text.into())))
    }

    /// Intenta recuperar el error concreto de un fallo de usuario.
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        match self {
            RailError::Step(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// `true` si el fallo lo produjo un step de usuario (y no el motor).
    pub fn is_user(&self) -> bool {
        matches!(self, RailError::Step(_))
    }
}

impl From<BoxError> for RailError {
    fn from(err: BoxError) -> Self {
        RailError::Step(Arc::from(err))
    }
}

/// Error mínimo usado por `RailError::msg`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Message(String);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for Message {}
