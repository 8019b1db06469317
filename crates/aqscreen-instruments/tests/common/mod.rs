#![allow(dead_code)]

use aqscreen_instruments::scoring::{AnswerSet, ItemId};

/// Answer set where bit `i` of `mask` is the answer to item `i + 1`.
pub fn answers_from_mask(mask: u16) -> AnswerSet {
    ItemId::ALL
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, ((mask >> i) & 1) as u8))
        .collect()
}

/// The first `ones` items answered 1, the rest 0.
pub fn answers_with_total(ones: usize) -> AnswerSet {
    ItemId::ALL
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, u8::from(i < ones)))
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
