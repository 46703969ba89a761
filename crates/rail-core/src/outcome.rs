//! `Outcome`: el valor que viaja por la cadena.
//!
//! Contiene el payload actual y dos ledgers independientes y append-only:
//! `messages` (eventos de diagnóstico / dominio) y `failures`. Un ledger de
//! fallos no vacío es la señal de cortocircuito para los steps no
//! supervisores. Registrar un fallo nunca toca `messages` ni el payload.

use serde::Serialize;

use crate::errors::RailError;

#[derive(Debug, Clone)]
pub struct Outcome<T> {
    value: Option<T>,
    messages: Vec<String>,
    failures: Vec<RailError>,
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Outcome<T> {
    /// Crea un outcome con payload inicial y ledgers vacíos.
    pub fn new(value: T) -> Self {
        Self { value: Some(value),
               messages: Vec::new(),
               failures: Vec::new() }
    }

    /// Outcome sin payload.
    pub fn empty() -> Self {
        Self { value: None,
               messages: Vec::new(),
               failures: Vec::new() }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    /// Reemplaza el payload; devuelve el anterior si existía.
    pub fn set_value(&mut self, value: T) -> Option<T> {
        self.value.replace(value)
    }

    pub fn take_value(&mut self) -> Option<T> {
        self.value.take()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Añade un fallo al final del ledger.
    pub fn add_failure(&mut self, failure: impl Into<RailError>) -> &mut Self {
        self.failures.push(failure.into());
        self
    }

    /// Añade un mensaje al final del ledger de mensajes.
    pub fn add_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.messages.push(message.into());
        self
    }

    pub fn with_value(mut self, value: T) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_failure(mut self, failure: impl Into<RailError>) -> Self {
        self.add_failure(failure);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.add_message(message);
        self
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn failures(&self) -> &[RailError] {
        &self.failures
    }

    pub fn has_failed(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// Vacía el ledger de fallos y devuelve lo que contenía.
    ///
    /// Pensado para steps supervisores que implementan recuperación; los
    /// mensajes no se tocan.
    pub fn clear_failures(&mut self) -> Vec<RailError> {
        std::mem::take(&mut self.failures)
    }

    /// Devuelve los ledgers a un estado anterior; lo usa el adaptador cuando
    /// un supervisor que consumió el outcome termina abruptamente.
    pub(crate) fn restore_ledgers(&mut self, messages: Vec<String>, failures: Vec<RailError>) {
        self.messages = messages;
        self.failures = failures;
    }

    /// Instantánea serializable del outcome (los fallos como texto).
    pub fn report(&self) -> OutcomeReport<'_, T> {
        OutcomeReport { value: self.value.as_ref(),
                        messages: &self.messages,
                        failures: self.failures.iter().map(ToString::to_string).collect() }
    }
}

impl<T> From<T> for Outcome<T> {
    fn from(value: T) -> Self {
        Outcome::new(value)
    }
}

/// Vista serializable de un `Outcome`.
#[derive(Debug, Serialize)]
pub struct OutcomeReport<'a, T> {
    pub value: Option<&'a T>,
    pub messages: &'a [String],
    pub failures: Vec<String>,
}
