//! Step con estado: compara cada payload entero con el anterior.
//!
//! El estado es de un único escritor. Una instancia no debe compartirse
//! entre cadenas ni entre streams concurrentes: las invocaciones
//! intercaladas mezclarían los "anteriores".

use std::sync::Mutex;

use log::warn;
use rail_core::{Handler, Tracker};
use serde_json::Value;

#[derive(Debug, Default)]
pub struct PreviousDelta {
    previous: Mutex<Option<i64>>,
}

impl PreviousDelta {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Handler<Value> for PreviousDelta {
    fn handle(&self, tracker: &mut Tracker<Value>) {
        let Some(current) = tracker.last().value().and_then(Value::as_i64) else {
            return;
        };
        let mut previous = match self.previous.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("previous-delta state was poisoned; continuing with last known value");
                poisoned.into_inner()
            }
        };
        let message = match previous.replace(current) {
            Some(prev) => format!("delta {:+}", current - prev),
            None => "delta first".to_string(),
        };
        tracker.last_mut().add_message(message);
    }
}
