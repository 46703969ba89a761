use tracing_subscriber::EnvFilter;

use crate::errors::CoreError;

/// Inicializa el logging estructurado con tracing-subscriber.
///
/// `RUST_LOG` tiene prioridad; si no está definido se usa `log_level`. Los
/// registros del facade `log` (emitidos por los crates del motor) se
/// reenvían al mismo subscriber. La salida va a stderr: stdout queda para
/// los reportes.
pub fn init(log_level: &str) -> Result<(), CoreError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt().with_env_filter(env_filter)
                             .with_target(false)
                             .with_writer(std::io::stderr)
                             .try_init()
                             .map_err(|e| CoreError::Internal(format!("logging ya inicializado: {e}")))
}
