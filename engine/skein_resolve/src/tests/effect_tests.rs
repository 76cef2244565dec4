//! Effect and section resolution.

use super::fixtures::fixture;

#[test]
fn effect_with_a_quoted_string_operand() {
    let fx = fixture();
    let mut session = fx.session();
    let effect = session.resolve_effect("broadcast \"hello world\"");
    assert!(effect.is_some());
    assert!(session.diagnostics().is_empty());
}

#[test]
fn effect_with_an_interpolated_operand() {
    let fx = fixture();
    let mut session = fx.session();
    let effect = session.resolve_effect("broadcast \"count: %a random number%\"");
    assert!(effect.is_some());
}

#[test]
fn optional_pattern_parts_match_present_and_absent() {
    let fx = fixture();
    let mut session = fx.session();
    assert!(session.resolve_effect("halt").is_some());
    assert!(session.resolve_effect("HALT NOW").is_some());
    assert!(session.resolve_effect("halt later").is_none());
}

#[test]
fn unknown_effect_reports_and_returns_no_match() {
    let fx = fixture();
    let mut session = fx.session();
    assert!(session.resolve_effect("dance wildly").is_none());
    assert!(session
        .diagnostics()
        .entries()
        .iter()
        .any(|d| d.message.contains("can't understand the effect")));
}

#[test]
fn successful_effect_is_tried_first_afterwards() {
    let fx = fixture();
    let mut session = fx.session();
    // First resolution tries the broadcast candidate (which reports a
    // failed attempt) before halt matches.
    assert!(session.resolve_effect("halt").is_some());
    let _ = session.take_diagnostics();
    assert!(session.resolve_effect("halt").is_some());
    assert!(session.diagnostics().is_empty());
}

#[test]
fn section_headers_resolve_with_their_own_category() {
    let fx = fixture();
    let mut session = fx.session();
    assert!(session.resolve_section("repeat 3 times").is_some());
    assert!(session.resolve_section("repeat forever").is_none());
    // A section line is not an effect.
    assert!(session.resolve_effect("repeat 3 times").is_none());
}
