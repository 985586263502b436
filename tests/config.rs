// JSON configuration tests; need the default `serde_json` feature.
#![cfg(feature = "serde_json")]

use ladder_game::{LadderConfig, LadderError, RepairPolicy};

#[test]
fn partial_json_falls_back_to_defaults() {
    let cfg = LadderConfig::from_json(r#"{ "participants": ["ann", "bo", "cy"], "seed": 12 }"#)
        .unwrap();
    assert_eq!(cfg.participants, vec!["ann", "bo", "cy"]);
    assert_eq!(cfg.seed, Some(12));
    assert_eq!(cfg.slot_count, 10);
    assert_eq!(cfg.repair, RepairPolicy::Conforming);
    assert_eq!(cfg.canvas_id, "ladderCanvas");
}

#[test]
fn repair_policy_uses_snake_case() {
    let cfg = LadderConfig::from_json(r#"{ "repair": "last_slot", "slot_count": 1 }"#).unwrap();
    assert_eq!(cfg.repair, RepairPolicy::LastSlot);
    assert_eq!(cfg.slot_count, 1);
}

#[test]
fn empty_document_is_the_default_config() {
    assert_eq!(LadderConfig::from_json("{}").unwrap(), LadderConfig::default());
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = LadderConfig::from_json("{ participants: }").unwrap_err();
    assert!(matches!(err, LadderError::Config(_)));
}

#[test]
fn json_is_validated() {
    let err = LadderConfig::from_json(r#"{ "participants": [] }"#).unwrap_err();
    assert_eq!(err, LadderError::NoParticipants);
    let err = LadderConfig::from_json(r#"{ "rung_probability": -0.1 }"#).unwrap_err();
    assert_eq!(err, LadderError::InvalidProbability(-0.1));
}
