//! Envoltorio de streaming: aplica una cadena a cada outcome que llega por un
//! canal, con un único worker.
//!
//! Contrato:
//! - Un solo worker procesa los inputs de a uno, en orden de llegada; el
//!   orden de salida es el de entrada.
//! - El canal de salida se cierra exactamente una vez (al soltar el
//!   `Sender`), sólo después de que el de entrada se cerró y se drenó.
//! - Backpressure implícita: el worker bloquea al escribir hasta que el
//!   consumidor acepta (canal de rendezvous por defecto).
//! - No hay timeout ni cancelación; si el consumidor se desconecta el worker
//!   termina sin procesar el resto.

use std::sync::mpsc::{self, Receiver};
use std::thread;

use log::{debug, trace};

use crate::chain::Chain;
use crate::outcome::Outcome;

/// Aplica `chain` a cada outcome de `input` en un hilo dedicado.
///
/// La salida usa un canal de capacidad cero: cada resultado se entrega
/// directamente al consumidor.
pub fn pipe<T>(chain: Chain<T>, input: Receiver<Outcome<T>>) -> Receiver<Outcome<T>>
    where T: Send + 'static
{
    pipe_with_capacity(chain, input, 0)
}

/// Como `pipe`, con un buffer de salida de `capacity` elementos.
pub fn pipe_with_capacity<T>(chain: Chain<T>, input: Receiver<Outcome<T>>, capacity: usize) -> Receiver<Outcome<T>>
    where T: Send + 'static
{
    let (tx, rx) = mpsc::sync_channel(capacity);
    thread::spawn(move || {
        let mut processed: u64 = 0;
        for item in input {
            let out = chain.run(item);
            if tx.send(out).is_err() {
                debug!("stream consumer disconnected after {processed} item(s)");
                return;
            }
            processed += 1;
            trace!("stream item #{processed} delivered");
        }
        debug!("stream input drained: {processed} item(s) processed, closing output");
        // `tx` se suelta aquí: la salida se cierra una única vez.
    });
    rx
}

/// Variante sobre canales de tokio: una única tarea procesa los inputs en
/// orden y cierra la salida cuando la entrada se agota.
///
/// La salida guarda hasta `capacity.max(1)` resultados. El worker reserva
/// un lugar antes de tomar cada input, así que con `capacity` 0 o 1 nunca
/// procesa un input mientras el consumidor no haya aceptado el anterior,
/// igual que el canal de rendezvous de `pipe`.
///
/// Debe llamarse dentro de un runtime de tokio.
pub fn pipe_async<T>(chain: Chain<T>,
                     mut input: tokio::sync::mpsc::Receiver<Outcome<T>>,
                     capacity: usize)
                     -> tokio::sync::mpsc::Receiver<Outcome<T>>
    where T: Send + 'static
{
    let (tx, rx) = tokio::sync::mpsc::channel(capacity.max(1));
    tokio::spawn(async move {
        let mut processed: u64 = 0;
        loop {
            let Ok(permit) = tx.reserve().await else {
                debug!("async stream consumer disconnected after {processed} item(s)");
                return;
            };
            let Some(item) = input.recv().await else {
                break;
            };
            permit.send(chain.run(item));
            processed += 1;
            trace!("async stream item #{processed} delivered");
        }
        debug!("async stream input drained: {processed} item(s) processed, closing output");
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RailError;
    use crate::step::Step;

    #[test]
    fn output_preserves_input_order_and_closes() {
        let chain = Chain::new(vec![Step::map(|v: u32| v * 2)]);
        let (tx, rx) = mpsc::channel();
        let out = pipe(chain, rx);

        for i in 0..50u32 {
            tx.send(Outcome::new(i)).expect("send input");
        }
        drop(tx);

        let values: Vec<u32> = out.iter().map(|o| *o.value().expect("value")).collect();
        assert_eq!(values, (0..50u32).map(|i| i * 2).collect::<Vec<_>>());
        // cerrado: no hay más elementos
        assert!(out.recv().is_err());
    }

    #[test]
    fn output_stays_open_until_input_closes() {
        let chain = Chain::new(vec![Step::map(|v: u32| v + 1)]);
        let (tx, rx) = mpsc::channel();
        let out = pipe(chain, rx);

        tx.send(Outcome::new(1)).expect("send");
        assert_eq!(out.recv().expect("first").value(), Some(&2));
        assert!(matches!(out.try_recv(), Err(mpsc::TryRecvError::Empty)));

        tx.send(Outcome::new(10)).expect("send");
        drop(tx);
        assert_eq!(out.recv().expect("second").value(), Some(&11));
        assert!(out.recv().is_err());
    }

    #[test]
    fn failures_flow_through_the_stream() {
        let chain = Chain::new(vec![Step::check(|v: &i64| {
                                        if *v < 0 {
                                            Err("negative".into())
                                        } else {
                                            Ok(())
                                        }
                                    })]);
        let (tx, rx) = mpsc::channel();
        let out = pipe_with_capacity(chain, rx, 4);
        tx.send(Outcome::new(-1)).expect("send");
        tx.send(Outcome::new(1)).expect("send");
        drop(tx);
        let results: Vec<Outcome<i64>> = out.iter().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].has_failed());
        assert!(results[1].is_ok());
    }

    #[test]
    fn empty_chain_stream_reports_no_processor() {
        let chain: Chain<u8> = Chain::new(Vec::<Step<u8>>::new());
        let (tx, rx) = mpsc::channel();
        let out = pipe(chain, rx);
        tx.send(Outcome::new(1)).expect("send");
        drop(tx);
        let first = out.recv().expect("one output");
        assert!(matches!(first.failures()[0], RailError::NoProcessor));
    }
}
