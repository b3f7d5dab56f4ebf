//! Handlers, macros, factories and methods.

use marquee_bytecode::Opcode;
use marquee_compiler::{CollectSink, CompileOptions, EndMismatchPolicy, Session, Severity};
use marquee_foundation::{Terminal, TokenStream};

use crate::support::{Src, Words};

fn session() -> Session {
    Session::new(CompileOptions::default())
}

#[test]
fn handler_stores_arguments_in_reverse() {
    let tokens = Src::new()
        .kw(Terminal::On)
        .id("add")
        .id("a")
        .kw(Terminal::Comma)
        .id("b")
        .nl()
        .kw(Terminal::Put)
        .id("a")
        .kw(Terminal::Plus)
        .id("b")
        .kw(Terminal::Into)
        .id("c")
        .nl()
        .end("add")
        .nl()
        .tokens();

    let mut session = session();
    let unit = session.compile(TokenStream::from(tokens)).unwrap();

    let expected = Words::new()
        .named(Opcode::VarPush, "b")
        .op(Opcode::Assign)
        .named(Opcode::VarPush, "a")
        .op(Opcode::Assign)
        .named(Opcode::Eval, "a")
        .named(Opcode::Eval, "b")
        .op(Opcode::Add)
        .named(Opcode::VarPush, "c")
        .op(Opcode::Assign)
        .op(Opcode::XPop)
        .push(0)
        .op(Opcode::ProcRet)
        .build();
    assert!(unit.is_clean());
    assert_eq!(unit.script.words(), expected.as_slice());

    let entry = session.registry().lookup("ADD").unwrap();
    assert_eq!(entry.name, "add");
    assert_eq!(entry.unit, unit.id);
    assert_eq!(entry.entry, 0);
    assert_eq!(entry.arg_count, 2);
}

#[test]
fn argument_list_may_continue_on_next_line() {
    let tokens = Src::new()
        .kw(Terminal::On)
        .id("go")
        .id("a")
        .nl()
        .kw(Terminal::Comma)
        .id("b")
        .nl()
        .end("go")
        .nl()
        .tokens();

    let mut session = session();
    let unit = session.compile(TokenStream::from(tokens)).unwrap();
    assert!(unit.is_clean());
    assert_eq!(session.registry().lookup("go").unwrap().arg_count, 2);
}

#[test]
fn macro_runs_to_end_of_unit() {
    let tokens = Src::new()
        .kw(Terminal::Macro)
        .id("tick")
        .id("n")
        .nl()
        .kw(Terminal::Put)
        .id("n")
        .nl()
        .tokens();

    let mut session = session();
    let unit = session.compile(TokenStream::from(tokens)).unwrap();
    assert!(unit.is_clean());

    let entry = session.registry().lookup("tick").unwrap();
    assert_eq!(entry.entry, 0);
    assert_eq!(entry.arg_count, 1);
    assert_eq!(
        &unit.script.words()[unit.script.words().len() - 3..],
        &[Opcode::ConstPush.word(), 0, Opcode::ProcRet.word()]
    );
}

#[test]
fn method_gets_receiver_argument() {
    let tokens = Src::new()
        .kw(Terminal::Factory)
        .id("Bird")
        .nl()
        .kw(Terminal::Method)
        .id("mFly")
        .id("a")
        .kw(Terminal::Comma)
        .id("b")
        .nl()
        .kw(Terminal::Put)
        .id("a")
        .nl()
        .tokens();

    let mut session = session();
    let unit = session.compile(TokenStream::from(tokens)).unwrap();
    assert!(unit.is_clean());
    assert_eq!(session.factory(), Some("Bird"));

    let method = session.registry().lookup_method("bird", "MFLY").unwrap();
    // Factory opcode plus two name words precede the method body
    assert_eq!(method.entry, 3);
    assert_eq!(method.arg_count, 3);
    assert!(session.registry().lookup("mFly").is_none());

    let receiver = Words::new()
        .named(Opcode::VarPush, "me")
        .op(Opcode::Assign)
        .build();
    assert_eq!(&unit.script.words()[9..12], receiver.as_slice());
}

#[test]
fn method_outside_factory_is_global_with_warning() {
    let tokens = Src::new()
        .kw(Terminal::Method)
        .id("mNew")
        .nl()
        .kw(Terminal::Put)
        .int(1)
        .nl()
        .tokens();

    let sink = CollectSink::new();
    let mut session = session().with_sink(sink.clone());
    let unit = session.compile(TokenStream::from(tokens)).unwrap();

    assert!(unit.is_clean());
    assert_eq!(session.registry().lookup("mnew").unwrap().arg_count, 0);
    let reported = sink.diagnostics();
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].severity, Severity::Warning);
}

#[test]
fn handler_end_mismatch_still_registers_when_lenient() {
    let tokens = Src::new()
        .kw(Terminal::On)
        .id("foo")
        .nl()
        .end("bar")
        .nl()
        .tokens();

    let mut session = session();
    let unit = session.compile(TokenStream::from(tokens)).unwrap();
    assert_eq!(unit.error_count(), 1);
    let entry = session.registry().lookup("foo").unwrap();
    assert_eq!((entry.entry, entry.arg_count), (0, 0));
}

#[test]
fn handler_end_mismatch_registers_nothing_under_reject() {
    let tokens = Src::new()
        .kw(Terminal::On)
        .id("foo")
        .nl()
        .end("bar")
        .nl()
        .tokens();

    let options = CompileOptions::default().with_end_mismatch(EndMismatchPolicy::Reject);
    let mut session = Session::new(options);
    assert!(session.compile(TokenStream::from(tokens)).is_err());
    assert!(session.registry().lookup("foo").is_none());
}

#[test]
fn bare_end_closes_a_handler() {
    let tokens = Src::new()
        .kw(Terminal::On)
        .id("foo")
        .nl()
        .end("")
        .nl()
        .tokens();

    let mut session = session();
    let unit = session.compile(TokenStream::from(tokens)).unwrap();
    assert!(unit.is_clean());
    assert!(session.registry().lookup("foo").is_some());
}

// =============================================================================
// Definitions Lost to Recovery
// =============================================================================

fn handler_with_bad_line() -> Src {
    Src::new()
        .kw(Terminal::On)
        .id("foo")
        .nl()
        .kw(Terminal::Put)
        .kw(Terminal::RParen)
        .nl()
}

fn dropped_warnings(diagnostics: &[marquee_compiler::Diagnostic]) -> Vec<u32> {
    diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning && d.message.contains("was dropped"))
        .map(|d| d.line)
        .collect()
}

#[test]
fn next_definition_reports_the_dropped_one() {
    let tokens = handler_with_bad_line()
        .kw(Terminal::Put)
        .int(1)
        .nl()
        .end("foo")
        .nl()
        .kw(Terminal::On)
        .id("bar")
        .nl()
        .end("bar")
        .nl()
        .tokens();

    let sink = CollectSink::new();
    let mut session = session().with_sink(sink.clone());
    let unit = session.compile(TokenStream::from(tokens)).unwrap();

    // the stray `put )` and the orphaned `end foo`
    assert_eq!(unit.error_count(), 2);
    assert_eq!(dropped_warnings(&unit.diagnostics), [1]);
    assert_eq!(sink.diagnostics(), unit.diagnostics);

    assert!(session.registry().lookup("foo").is_none());
    let bar = session.registry().lookup("bar").unwrap();
    assert_eq!(bar.entry, 3);
}

#[test]
fn definition_dropped_at_end_of_unit_is_reported() {
    let mut session = session();
    let unit = session
        .compile(TokenStream::from(handler_with_bad_line().tokens()))
        .unwrap();

    assert_eq!(unit.error_count(), 1);
    assert_eq!(dropped_warnings(&unit.diagnostics), [1]);
    assert!(session.registry().is_empty());
}

#[test]
fn closed_definitions_report_nothing_dropped() {
    let tokens = Src::new()
        .kw(Terminal::On)
        .id("foo")
        .nl()
        .end("foo")
        .nl()
        .kw(Terminal::On)
        .id("bar")
        .nl()
        .end("bar")
        .nl()
        .tokens();

    let unit = session().compile(TokenStream::from(tokens)).unwrap();
    assert!(unit.diagnostics.is_empty());
}
