// Host-side tests for the loader message sequence.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod loader {
    include!("../src/loader.rs");
}

use loader::*;

const MESSAGES: [&str; 3] = ["one", "two", "three"];
const SEQ: LoaderSequence = LoaderSequence::new(&MESSAGES, 1500);

#[test]
fn steps_through_messages_then_hides() {
    assert_eq!(SEQ.step(0), LoaderStep::Show("one"));
    assert_eq!(SEQ.step(1), LoaderStep::Show("two"));
    assert_eq!(SEQ.step(2), LoaderStep::Show("three"));
    assert_eq!(SEQ.step(3), LoaderStep::Hide);
    assert_eq!(SEQ.step(100), LoaderStep::Hide);
    assert_eq!(SEQ.total_ms(), 4500);
    assert_eq!(SEQ.step_ms(), 1500);
}

#[test]
fn elapsed_time_maps_to_step() {
    assert_eq!(SEQ.at_elapsed(0.0), LoaderStep::Show("one"));
    assert_eq!(SEQ.at_elapsed(1499.9), LoaderStep::Show("one"));
    assert_eq!(SEQ.at_elapsed(1500.0), LoaderStep::Show("two"));
    assert_eq!(SEQ.at_elapsed(4499.0), LoaderStep::Show("three"));
    assert_eq!(SEQ.at_elapsed(4500.0), LoaderStep::Hide);
}

#[test]
fn bad_clock_values_show_first_message() {
    assert_eq!(SEQ.at_elapsed(-20.0), LoaderStep::Show("one"));
    assert_eq!(SEQ.at_elapsed(f64::NAN), LoaderStep::Show("one"));
    let stuck = LoaderSequence::new(&MESSAGES, 0);
    assert_eq!(stuck.at_elapsed(10_000.0), LoaderStep::Show("one"));
}

#[test]
fn empty_sequence_hides_immediately() {
    let empty = LoaderSequence::new(&[], 1500);
    assert_eq!(empty.step(0), LoaderStep::Hide);
    assert_eq!(empty.total_ms(), 0);
}
