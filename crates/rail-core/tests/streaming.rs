//! Streaming sobre canales síncronos y de tokio.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use rail_adapters::steps::{flag_odd_or_even, parse_int, require_flagged, PreviousDelta};
use rail_core::{pipe, pipe_async, Chain, Outcome, Step};
use serde_json::{json, Value};

#[test]
fn stateful_step_sees_inputs_in_arrival_order() {
    let chain = Chain::new(vec![parse_int(), Step::handler(PreviousDelta::new())]);
    let (tx, rx) = mpsc::channel();
    let out = pipe(chain, rx);

    let producer = thread::spawn(move || {
                       for raw in ["5", "8", "2"] {
                           tx.send(Outcome::new(json!(raw))).expect("send");
                       }
                   });

    let messages: Vec<String> = out.iter().flat_map(|o| o.messages().to_vec()).collect();
    producer.join().expect("producer");
    assert_eq!(messages, vec!["delta first", "delta +3", "delta -6"]);
}

#[tokio::test]
async fn async_pipe_preserves_order_and_closes() {
    let chain: Chain<Value> = Chain::new(vec![parse_int(), flag_odd_or_even(), require_flagged()]);
    let (tx, rx) = tokio::sync::mpsc::channel(4);
    let mut out = pipe_async(chain, rx, 2);

    tokio::spawn(async move {
        for raw in ["1", "2", "three"] {
            tx.send(Outcome::new(json!(raw))).await.expect("send");
        }
    });

    let mut results = Vec::new();
    while let Some(item) = out.recv().await {
        results.push(item);
    }
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].messages(), &["is-odd".to_string(), "processed".to_string()]);
    assert_eq!(results[1].messages(), &["is-even".to_string(), "processed".to_string()]);
    assert_eq!(results[2].failures().len(), 2);
}

#[test]
fn async_pipe_inside_block_on() {
    let values = tokio_test::block_on(async {
        let chain = Chain::new(vec![Step::map(|v: u64| v + 1)]);
        let (tx, rx) = tokio::sync::mpsc::channel(1);
        let mut out = pipe_async(chain, rx, 1);
        tokio::spawn(async move {
            for v in 0..5u64 {
                tx.send(Outcome::new(v)).await.expect("send");
            }
        });
        let mut values = Vec::new();
        while let Some(o) = out.recv().await {
            values.push(*o.value().expect("value"));
        }
        values
    });
    assert_eq!(values, vec![1, 2, 3, 4, 5]);
}

async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn async_pipe_with_zero_capacity_waits_for_consumer() {
    let ran = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ran);
    let chain = Chain::new(vec![Step::inspect(move |_: &u32| {
                                    counter.fetch_add(1, Ordering::SeqCst);
                                })]);
    let (tx, rx) = tokio::sync::mpsc::channel(8);
    for i in 0..5u32 {
        tx.send(Outcome::new(i)).await.expect("send");
    }
    drop(tx);

    let mut out = pipe_async(chain, rx, 0);
    settle().await;
    assert_eq!(ran.load(Ordering::SeqCst), 1);

    assert_eq!(out.recv().await.expect("first").value(), Some(&0));
    settle().await;
    assert_eq!(ran.load(Ordering::SeqCst), 2);

    let mut rest = Vec::new();
    while let Some(o) = out.recv().await {
        rest.push(*o.value().expect("value"));
    }
    assert_eq!(rest, vec![1, 2, 3, 4]);
    assert_eq!(ran.load(Ordering::SeqCst), 5);
}
