//! Assembling scripts by hand with reserved and patched slots.

use marquee_bytecode::{Opcode, Script, disassemble, encoding};
use marquee_foundation::{EntityRef, ErrorKind};

// =============================================================================
// Back-patching
// =============================================================================

#[test]
fn forward_references_are_patched_in_place() {
    // if x then exit repeat
    let mut script = Script::new();
    let at = script.emit_op(Opcode::IfCode);
    let slots = script.reserve(3);
    script.emit_word(0);
    script.emit_named(Opcode::Eval, "x");
    script.emit_op(Opcode::Stop);
    let then = script.emit_op(Opcode::ExitRepeat);
    script.emit_op(Opcode::Stop);
    let end = script.len();

    assert_eq!(slots, at + 1);
    // unpatched slots read as Stop
    assert_eq!(script.get(slots), Some(Opcode::Stop.word()));

    script.patch(slots, then).unwrap();
    script.patch(slots + 2, end).unwrap();

    assert_eq!(
        disassemble(&script)[0].to_string(),
        format!("0000  IfCode then={then} else=0 end={end} skip=0")
    );
}

#[test]
fn patching_never_moves_later_words() {
    let mut script = Script::new();
    let slot = script.reserve(1);
    let after = script.emit_const(42);
    let before = script.words().to_vec();

    script.patch(slot, 99).unwrap();

    assert_eq!(script.words()[after as usize..], before[after as usize..]);
    assert_eq!(script.len() as usize, before.len());
}

#[test]
fn patch_past_end_is_rejected() {
    let mut script = Script::new();
    script.emit_op(Opcode::Stop);
    let err = script.patch(1, 0).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Internal(_)));
    assert!(err.is_fatal());
}

// =============================================================================
// Payloads
// =============================================================================

#[test]
fn names_of_every_padding_length() {
    for len in 0..=12 {
        let name: String = "abcdefghijkl".chars().take(len).collect();
        let mut script = Script::new();
        script.emit_named(Opcode::VarPush, &name);
        script.emit_op(Opcode::Assign);

        assert_eq!(
            script.len() as usize,
            1 + encoding::name_words(len) + 1,
            "name of {len} bytes"
        );
        let listing = disassemble(&script);
        assert_eq!(listing.len(), 2, "name of {len} bytes");
        assert_eq!(listing[1].opcode(), Some(Opcode::Assign));
    }
}

#[test]
fn entity_payload_is_entity_then_field() {
    let mut script = Script::new();
    script.emit_op(Opcode::TheEntityPush);
    script.emit_entity(EntityRef::new(12, 3));
    assert_eq!(script.words()[1..], [12, 3]);
    assert_eq!(
        disassemble(&script)[0].to_string(),
        "0000  TheEntityPush entity=12 field=3"
    );
}

#[test]
fn bytes_round_trip_preserves_every_word() {
    let mut script = Script::new();
    script.emit_const(-5);
    script.emit_float(0.25);
    script.emit_string("hello world");
    script.emit_symbol("done");

    let bytes = script.to_bytes();
    assert_eq!(bytes.len(), script.words().len() * 4);
    assert_eq!(Script::from_bytes(&bytes).unwrap(), script);
}

#[test]
fn ragged_bytes_are_a_serialization_error() {
    let err = Script::from_bytes(&[0, 0, 0, 1, 2]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Serialization(_)));
}
