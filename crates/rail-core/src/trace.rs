//! Traza por invocación de la cadena.
//!
//! Cada `Tracker` lleva un `RunTrace` append-only: un evento por step
//! adaptado que se ejecutó, se saltó por cortocircuito, era inválido o
//! terminó abruptamente dentro de un `supervised`. Es metadato puro: nunca
//! participa en las decisiones de control de flujo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceEventKind {
    /// La lógica de usuario del step se ejecutó.
    Ran,
    /// Step no supervisor saltado: había `failures` fallos registrados.
    Skipped { failures: usize },
    /// Step de forma no reconocida.
    Invalid,
    /// Terminación abrupta capturada por un combinador supervisado.
    Panicked { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    pub seq: u64, // orden de append dentro de la invocación
    pub step_index: usize,
    pub shape: String,
    pub kind: TraceEventKind,
    pub ts: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTrace {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub events: Vec<TraceEvent>,
}

impl Default for RunTrace {
    fn default() -> Self {
        Self::new()
    }
}

impl RunTrace {
    pub fn new() -> Self {
        Self { run_id: Uuid::new_v4(),
               started_at: Utc::now(),
               events: Vec::new() }
    }

    pub fn record(&mut self, step_index: usize, shape: &str, kind: TraceEventKind) {
        let seq = self.events.len() as u64;
        self.events.push(TraceEvent { seq,
                                      step_index,
                                      shape: shape.to_string(),
                                      kind,
                                      ts: Utc::now() });
    }

    /// Índices de los steps cuya lógica se ejecutó, en orden.
    pub fn ran_steps(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter(|e| e.kind == TraceEventKind::Ran)
            .map(|e| e.step_index)
            .collect()
    }

    pub fn skipped_steps(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, TraceEventKind::Skipped { .. }))
            .map(|e| e.step_index)
            .collect()
    }

    /// Variante compacta de la secuencia de eventos.
    pub fn variants(&self) -> Vec<&'static str> {
        self.events
            .iter()
            .map(|e| match e.kind {
                TraceEventKind::Ran => "R",
                TraceEventKind::Skipped { .. } => "S",
                TraceEventKind::Invalid => "I",
                TraceEventKind::Panicked { .. } => "P",
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_assigns_sequential_seq() {
        let mut trace = RunTrace::new();
        trace.record(0, "map", TraceEventKind::Ran);
        trace.record(1, "check", TraceEventKind::Skipped { failures: 1 });
        trace.record(2, "invalid", TraceEventKind::Invalid);

        let seqs: Vec<u64> = trace.events.iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert_eq!(trace.ran_steps(), vec![0]);
        assert_eq!(trace.skipped_steps(), vec![1]);
        assert_eq!(trace.variants(), vec!["R", "S", "I"]);
    }

    #[test]
    fn trace_roundtrips_through_json() {
        let mut trace = RunTrace::new();
        trace.record(3, "supervised", TraceEventKind::Panicked { message: "attempt to divide by zero".into() });
        let text = serde_json::to_string(&trace).expect("serialize");
        let back: RunTrace = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back.run_id, trace.run_id);
        assert_eq!(back.events[0].kind, trace.events[0].kind);
    }
}
