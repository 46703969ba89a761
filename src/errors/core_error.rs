use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error interno: {0}")]
    Internal(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error de serialización: {0}")]
    Serialize(#[from] serde_json::Error),
}
