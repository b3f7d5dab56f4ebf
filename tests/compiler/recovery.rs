//! Syntax errors, resynchronization and aborts.

use marquee_bytecode::Opcode;
use marquee_compiler::{CollectSink, CompileOptions, FixupKind, Session, Severity, UnitStatus};
use marquee_foundation::{ErrorKind, Terminal, TokenStream};

use crate::support::{Src, Words};

fn put_paren_then_put_one() -> Src {
    Src::new()
        .kw(Terminal::Put)
        .kw(Terminal::RParen)
        .kw(Terminal::Into)
        .id("x")
        .nl()
        .kw(Terminal::Put)
        .int(1)
        .kw(Terminal::Into)
        .id("y")
        .nl()
}

// =============================================================================
// Resynchronization
// =============================================================================

#[test]
fn bad_line_is_skipped_and_next_line_compiles() {
    let unit = put_paren_then_put_one().compile();

    assert_eq!(unit.status, UnitStatus::Flagged { errors: 1 });
    let expected = Words::new()
        .push(1)
        .named(Opcode::VarPush, "y")
        .op(Opcode::Assign)
        .op(Opcode::XPop)
        .build();
    assert_eq!(unit.script.words(), expected.as_slice());
}

#[test]
fn syntax_error_names_the_unexpected_token() {
    let unit = put_paren_then_put_one().compile();

    let diagnostic = &unit.diagnostics[0];
    assert_eq!(diagnostic.severity, Severity::Error);
    assert!(
        diagnostic.message.starts_with("syntax error, unexpected"),
        "{}",
        diagnostic.message
    );
    assert_eq!((diagnostic.line, diagnostic.column), (1, 2));
}

#[test]
fn errors_inside_recovery_are_reported_once() {
    // the second ')' is discarded while the parser is still resynchronizing
    let unit = Src::new()
        .kw(Terminal::Put)
        .kw(Terminal::RParen)
        .kw(Terminal::RParen)
        .kw(Terminal::Into)
        .id("x")
        .nl()
        .kw(Terminal::Put)
        .int(1)
        .nl()
        .compile();

    assert_eq!(unit.error_count(), 1);
    assert_eq!(
        unit.script.words(),
        Words::new().push(1).op(Opcode::PrintTop).build().as_slice()
    );
}

#[test]
fn juxtaposed_literals_recover_at_newline() {
    let unit = Src::new()
        .int(1)
        .int(2)
        .nl()
        .int(3)
        .nl()
        .compile();

    assert_eq!(unit.error_count(), 1);
    let expected = Words::new()
        .push(1)
        .op(Opcode::XPop)
        .push(3)
        .op(Opcode::XPop)
        .build();
    assert_eq!(unit.script.words(), expected.as_slice());
}

#[test]
fn sink_sees_every_diagnostic_in_order() {
    let sink = CollectSink::new();
    let mut session = Session::new(CompileOptions::default()).with_sink(sink.clone());
    let unit = session
        .compile(TokenStream::from(put_paren_then_put_one().tokens()))
        .unwrap();

    assert_eq!(sink.diagnostics(), unit.diagnostics);
}

// =============================================================================
// Unterminated Constructs
// =============================================================================

#[test]
fn unterminated_if_leaves_an_open_fixup() {
    let unit = Src::new().kw(Terminal::If).int(1).compile();

    assert!(!unit.is_clean());
    assert_eq!(unit.unresolved_fixups.len(), 1);
    assert_eq!(unit.unresolved_fixups[0].kind, FixupKind::Conditional);
    assert_eq!(unit.unresolved_fixups[0].at, 0);
    // slots stay zero
    assert_eq!(&unit.script.words()[1..4], &[0, 0, 0]);
    assert!(
        unit.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Warning && d.message.contains("never closed"))
    );
}

// =============================================================================
// Aborts
// =============================================================================

#[test]
fn deep_nesting_exhausts_a_small_stack() {
    let mut src = Src::new().kw(Terminal::Put);
    for _ in 0..64 {
        src = src.kw(Terminal::LParen);
    }
    let options = CompileOptions::default().with_max_stack_depth(16);
    let err = src.int(1).compile_with(options).unwrap_err();

    assert!(matches!(err.kind, ErrorKind::StackExhausted { .. }));
    assert!(err.is_fatal());
    assert!(err.context.is_some());
}

#[test]
fn deep_nesting_fits_the_default_stack() {
    let mut src = Src::new().kw(Terminal::Put);
    for _ in 0..64 {
        src = src.kw(Terminal::LParen);
    }
    src = src.int(1);
    for _ in 0..64 {
        src = src.kw(Terminal::RParen);
    }
    let unit = src.nl().compile();
    assert!(unit.is_clean());
}

#[test]
fn aborted_unit_reports_a_fatal_diagnostic() {
    let sink = CollectSink::new();
    let options = CompileOptions::default().with_max_stack_depth(2);
    let mut session = Session::new(options).with_sink(sink.clone());
    let tokens = Src::new()
        .kw(Terminal::LParen)
        .kw(Terminal::LParen)
        .kw(Terminal::LParen)
        .tokens();

    assert!(session.compile(TokenStream::from(tokens)).is_err());
    let last = sink.diagnostics().pop().unwrap();
    assert_eq!(last.severity, Severity::Fatal);
}
