use aqscreen_instruments::scoring::{SignalKind, ValidationError};
use aqscreen_instruments::signals::{
    normalize_signal, normalize_signals, parse_analyzer_report, SecondarySignal,
    SecondarySignals, UNPARSED_REASON,
};

#[test]
fn scores_map_linearly_onto_unit_interval() {
    let n = normalize_signal(SignalKind::Physical, &SecondarySignal::new(65.0, "fidgeting")).unwrap();
    assert_eq!(n.kind, SignalKind::Physical);
    assert_eq!(n.probability, 0.65);
    assert_eq!(n.raw_score, 65.0);
    assert!(!n.was_clamped());
}

#[test]
fn out_of_range_scores_are_clamped_not_rejected() {
    let high = normalize_signal(SignalKind::Speech, &SecondarySignal::new(250.0, "")).unwrap();
    assert_eq!(high.probability, 1.0);
    assert_eq!(high.raw_score, 250.0);
    assert!(high.was_clamped());

    let low = normalize_signal(SignalKind::Speech, &SecondarySignal::new(-3.0, "")).unwrap();
    assert_eq!(low.probability, 0.0);
    assert!(low.was_clamped());
}

#[test]
fn infinite_score_names_the_signal() {
    let signals = SecondarySignals::both(
        SecondarySignal::new(f64::INFINITY, "broken analyzer"),
        SecondarySignal::new(10.0, "ok"),
    );
    let err = normalize_signals(&signals).unwrap_err();
    assert_eq!(
        err,
        ValidationError::NonNumericScore {
            signal: SignalKind::Physical
        }
    );
    assert_eq!(err.to_string(), "physical score is not a finite number");
}

#[test]
fn absent_signals_stay_absent() {
    let normalized = normalize_signals(&SecondarySignals::none()).unwrap();
    assert!(normalized.is_empty());

    let only_speech = SecondarySignals {
        physical: None,
        speech: Some(SecondarySignal::new(0.0, "silent")),
    };
    let normalized = normalize_signals(&only_speech).unwrap();
    assert!(normalized.physical.is_none());
    assert_eq!(normalized.speech.unwrap().probability, 0.0);
}

#[test]
fn parses_two_signal_report() {
    let report = "\
Physical Score: 65
Physical Reason: Avoids direct eye contact, frequent hand fidgeting.
Speech Score: 40
Speech Reason: Speech is slightly monotonous but responsive.";

    let signals = parse_analyzer_report(report);
    let physical = signals.physical.unwrap();
    assert_eq!(physical.score, 65.0);
    assert_eq!(
        physical.reason,
        "Avoids direct eye contact, frequent hand fidgeting."
    );
    let speech = signals.speech.unwrap();
    assert_eq!(speech.score, 40.0);
    assert_eq!(speech.reason, "Speech is slightly monotonous but responsive.");
}

#[test]
fn legacy_single_score_report_fills_physical() {
    let report = "**Score**: 72 (elevated)\n**Reason**: Limited eye contact throughout.";
    let signals = parse_analyzer_report(report);

    let physical = signals.physical.unwrap();
    assert_eq!(physical.score, 72.0);
    assert_eq!(physical.reason, "Limited eye contact throughout.");
    assert!(signals.speech.is_none());
}

#[test]
fn score_tokens_keep_only_the_leading_number() {
    let signals = parse_analyzer_report("score: 72/100");
    assert_eq!(signals.physical.unwrap().score, 72.0);

    let signals = parse_analyzer_report("Speech Score: 37.5 points");
    assert_eq!(signals.speech.unwrap().score, 37.5);
}

#[test]
fn score_without_reason_gets_placeholder() {
    let signals = parse_analyzer_report("Speech Score: 12");
    assert_eq!(signals.speech.unwrap().reason, UNPARSED_REASON);
}

#[test]
fn unusable_report_yields_no_signals() {
    assert!(parse_analyzer_report("").is_empty());
    assert!(parse_analyzer_report("The video could not be processed.").is_empty());
    assert!(parse_analyzer_report("Score: unknown\nReason: blurry").is_empty());
}

#[test]
fn secondary_block_deserializes_with_optional_members() {
    let json = r#"{"speech": {"score": 55}}"#;
    let signals: SecondarySignals = serde_json::from_str(json).unwrap();
    assert!(signals.physical.is_none());
    let speech = signals.get(SignalKind::Speech).unwrap();
    assert_eq!(speech.score, 55.0);
    assert_eq!(speech.reason, "");
}
