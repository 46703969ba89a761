//! railflow
//!
//! Librería de la aplicación sobre el motor `rail-core`:
//! - `config`: configuración desde el entorno (.env).
//! - `errors`: errores de la capa de aplicación.
//! - `logging`: inicialización de tracing-subscriber.
//! - `pipeline`: cadena de demostración usada por el binario.
//!
//! Re-exporta `rail_core` y `rail_adapters` para los clientes.

pub mod config;
pub mod errors;
pub mod logging;
pub mod pipeline;

pub use rail_adapters;
pub use rail_core;

#[cfg(test)]
mod tests {
    use super::errors::CoreError;

    #[test]
    fn core_error_tests() {
        let i = CoreError::Internal("fallo".into()).to_string();
        assert_eq!(i, "Error interno: fallo");
    }
}
