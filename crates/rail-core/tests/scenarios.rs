//! Escenarios de punta a punta con los steps de `rail-adapters`.

use rail_adapters::steps::{add_one_if_int, add_two_if_int, flag_odd_or_even, is_unexpected, noop, passthrough,
                           require_exactly, require_flagged, IS_ODD, PROCESSED};
use rail_adapters::AdapterError;
use rail_core::{Chain, Outcome};
use serde_json::{json, Value};

#[test]
fn exact_match_chain_rejects_other_payloads() {
    let chain = Chain::new(vec![passthrough(), require_exactly("2nd".to_string()), noop()]);

    let out = chain.run(Outcome::new("1st".to_string()));
    assert_eq!(out.failures().len(), 1);
    assert!(is_unexpected(&out.failures()[0]));
    assert_eq!(out.failures()[0].to_string(), "not 2nd");
    assert_eq!(out.value().map(String::as_str), Some("1st"));

    let out = chain.run(Outcome::new("2nd".to_string()));
    assert!(out.is_ok());
    assert_eq!(out.value().map(String::as_str), Some("2nd"));
}

fn parity_chain() -> Chain<Value> {
    Chain::new(vec![add_one_if_int(), add_two_if_int(), flag_odd_or_even(), require_flagged()])
}

#[test]
fn integer_input_is_flagged_and_processed() {
    let out = parity_chain().run(Outcome::new(json!(1)));
    assert!(out.is_ok(), "unexpected failures: {:?}", out.failures());
    assert!(out.messages().iter().any(|m| m == IS_ODD));
    assert!(out.messages().iter().any(|m| m == PROCESSED));
}

#[test]
fn non_integer_input_fails_twice() {
    let out = parity_chain().run(Outcome::new(json!("1")));
    let kinds: Vec<AdapterError> = out.failures()
                                      .iter()
                                      .filter_map(|f| f.downcast_ref::<AdapterError>().cloned())
                                      .collect();
    assert_eq!(kinds, vec![AdapterError::NotAnInteger("\"1\"".into()), AdapterError::NotProcessed]);
    assert!(out.messages().is_empty());
    assert_eq!(out.value(), Some(&json!("1")));
}

#[test]
fn traced_run_shows_skipped_parity_flag() {
    let (_, trace) = parity_chain().run_traced(Outcome::new(json!("x")));
    assert_eq!(trace.variants(), vec!["R", "S", "S", "R"]);
    assert_eq!(trace.skipped_steps(), vec![1, 2]);
}
