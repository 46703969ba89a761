//! La cadena de demostración aplicada como stream, igual que el binario.

use railflow::config::AppConfig;
use railflow::pipeline::{demo_chain, line_input, render};
use railflow::rail_core::{pipe, pipe_async};
use serde_json::{json, Value};

#[test]
fn sync_stream_reports_each_line_in_order() {
    let (tx, rx) = std::sync::mpsc::channel();
    let out = pipe(demo_chain(1), rx);
    for line in ["1", "x", "10"] {
        tx.send(line_input(line)).expect("send");
    }
    drop(tx);

    let reports: Vec<Value> = out.iter()
                                 .map(|o| render(&o.report()).expect("render"))
                                 .map(|s| serde_json::from_str(&s).expect("json"))
                                 .collect();
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0]["value"], json!(2));
    assert_eq!(reports[1]["failures"], json!(["not-an-integer: \"x\"", "not-processed"]));
    assert_eq!(reports[1]["messages"], json!(["logged"]));
    assert_eq!(reports[2]["messages"], json!(["delta +9", "is-odd", "processed", "logged"]));
}

#[test]
fn async_stream_uses_configured_addend() {
    let cfg = AppConfig::from_lookup(|key| (key == "RAILFLOW_ADDEND").then(|| "2".to_string())).expect("config");
    let values = tokio_test::block_on(async move {
        let (tx, rx) = tokio::sync::mpsc::channel(1);
        let mut out = pipe_async(demo_chain(cfg.addend), rx, cfg.channel_capacity);
        tokio::spawn(async move {
            for line in ["3", "4"] {
                tx.send(line_input(line)).await.expect("send");
            }
        });
        let mut values = Vec::new();
        while let Some(o) = out.recv().await {
            values.push(o.value().cloned());
        }
        values
    });
    assert_eq!(values, vec![Some(json!(5)), Some(json!(6))]);
}
