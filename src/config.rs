//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable vía
//! `config()`, evaluada una sola vez por proceso.
use once_cell::sync::OnceCell;
use std::env;
use std::str::FromStr;

use crate::errors::CoreError;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Nivel de log por defecto (`RUST_LOG` tiene prioridad).
    pub log_level: String,
    /// Capacidad del canal de salida del stream; con 0 el worker espera a que
    /// el consumidor acepte cada resultado antes de tomar el siguiente input.
    pub channel_capacity: usize,
    /// Cantidad que suma la cadena de demostración.
    pub addend: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { log_level: DEFAULT_LOG_LEVEL.to_string(),
               channel_capacity: 0,
               addend: 1 }
    }
}

impl AppConfig {
    /// Lee `RAILFLOW_LOG`, `RAILFLOW_CHANNEL_CAPACITY` y `RAILFLOW_ADDEND`.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env`, con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        let defaults = Self::default();
        Ok(Self { log_level: lookup("RAILFLOW_LOG").filter(|v| !v.trim().is_empty())
                                                   .unwrap_or(defaults.log_level),
                  channel_capacity: parse_var(&lookup, "RAILFLOW_CHANNEL_CAPACITY")?.unwrap_or(defaults.channel_capacity),
                  addend: parse_var(&lookup, "RAILFLOW_ADDEND")?.unwrap_or(defaults.addend) })
    }
}

fn parse_var<F, V>(lookup: &F, key: &str) -> Result<Option<V>, CoreError>
    where F: Fn(&str) -> Option<String>,
          V: FromStr,
          V::Err: std::fmt::Display
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim()
                        .parse()
                        .map(Some)
                        .map_err(|e| CoreError::Config(format!("{key}={raw:?}: {e}"))),
    }
}

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// Instancia global perezosa de configuración. Carga `.env` si existe.
pub fn config() -> Result<&'static AppConfig, CoreError> {
    CONFIG.get_or_try_init(|| {
              let _ = dotenvy::dotenv();
              AppConfig::from_env()
          })
}
