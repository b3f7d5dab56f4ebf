//! Structured statements and their back-patched slots.

use marquee_bytecode::{Instruction, Opcode, OperandValue, disassemble};
use marquee_compiler::{CompileOptions, EndMismatchPolicy, Severity};
use marquee_foundation::{ErrorKind, Terminal};

use crate::support::{Src, Words};

fn if_x_gt_3_else() -> Src {
    Src::new()
        .kw(Terminal::If)
        .id("x")
        .kw(Terminal::Gt)
        .int(3)
        .kw(Terminal::Then)
        .nl()
        .kw(Terminal::Put)
        .int(1)
        .kw(Terminal::Into)
        .id("y")
        .nl()
        .kw(Terminal::NlElse)
        .nl()
        .kw(Terminal::Put)
        .int(2)
        .kw(Terminal::Into)
        .id("y")
        .nl()
        .end("if")
        .nl()
}

// =============================================================================
// Conditionals
// =============================================================================

#[test]
fn one_line_if_patches_then_and_end() {
    let unit = Src::new()
        .kw(Terminal::If)
        .int(1)
        .kw(Terminal::Equals)
        .int(1)
        .kw(Terminal::Then)
        .kw(Terminal::Exit)
        .kw(Terminal::Repeat)
        .compile();

    let expected = Words::new()
        .op(Opcode::IfCode)
        .word(11)
        .word(0)
        .word(13)
        .word(0)
        .push(1)
        .push(1)
        .op(Opcode::Eq)
        .op(Opcode::Stop)
        .op(Opcode::ExitRepeat)
        .op(Opcode::Stop)
        .build();
    assert!(unit.is_clean());
    assert_eq!(unit.script.words(), expected.as_slice());
}

#[test]
fn block_if_else_layout() {
    let unit = if_x_gt_3_else().compile();

    let expected = Words::new()
        .op(Opcode::IfCode)
        .word(11)
        .word(18)
        .word(25)
        .word(0)
        .named(Opcode::Eval, "x")
        .push(3)
        .op(Opcode::Gt)
        .op(Opcode::Stop)
        .push(1)
        .named(Opcode::VarPush, "y")
        .op(Opcode::Assign)
        .op(Opcode::XPop)
        .op(Opcode::Stop)
        .push(2)
        .named(Opcode::VarPush, "y")
        .op(Opcode::Assign)
        .op(Opcode::XPop)
        .op(Opcode::Stop)
        .build();
    assert!(unit.is_clean());
    assert!(unit.unresolved_fixups.is_empty());
    assert_eq!(unit.script.words(), expected.as_slice());
    assert_eq!(unit.script.len(), 25);
}

#[test]
fn else_if_chain_shares_end() {
    let unit = Src::new()
        .kw(Terminal::If)
        .id("a")
        .kw(Terminal::Then)
        .nl()
        .kw(Terminal::Put)
        .int(1)
        .nl()
        .kw(Terminal::NlElsIf)
        .id("b")
        .kw(Terminal::Then)
        .nl()
        .kw(Terminal::Put)
        .int(2)
        .nl()
        .end("if")
        .nl()
        .compile();

    let listing = disassemble(&unit.script);
    let ifs: Vec<&Instruction> = listing
        .iter()
        .filter(|i| i.opcode() == Some(Opcode::IfCode))
        .collect();
    assert_eq!(ifs.len(), 2);

    let Instruction::Op { operands: outer, .. } = ifs[0] else {
        panic!("expected an opcode line");
    };
    let Instruction::Op {
        offset: inner_at,
        operands: inner,
        ..
    } = ifs[1]
    else {
        panic!("expected an opcode line");
    };

    // outer else -> inner IfCode; both end at the same place
    assert_eq!(outer[1], OperandValue::Offset(*inner_at));
    assert_eq!(outer[2], OperandValue::Offset(25));
    assert_eq!(inner[1], OperandValue::Offset(0));
    assert_eq!(inner[2], OperandValue::Offset(25));
    assert_eq!(inner[3], OperandValue::Word(1));
    assert!(unit.is_clean());
}

#[test]
fn one_line_else_if_with_trailing_else() {
    let unit = Src::new()
        .kw(Terminal::If)
        .id("a")
        .kw(Terminal::Then)
        .kw(Terminal::Put)
        .int(1)
        .kw(Terminal::NlElsIf)
        .id("b")
        .kw(Terminal::Then)
        .kw(Terminal::Put)
        .int(2)
        .kw(Terminal::NlElse)
        .kw(Terminal::Put)
        .int(3)
        .nl()
        .compile();

    let words = unit.script.words();
    assert_eq!(&words[..5], &[Opcode::IfCode.word(), 8, 12, 29, 0]);
    assert_eq!(&words[12..17], &[Opcode::IfCode.word(), 20, 25, 29, 1]);
    assert_eq!(unit.script.len(), 29);
    assert!(unit.is_clean());
}

// =============================================================================
// Loops
// =============================================================================

#[test]
fn repeat_while_layout() {
    let unit = Src::new()
        .kw(Terminal::Repeat)
        .kw(Terminal::While)
        .id("x")
        .kw(Terminal::Lt)
        .int(5)
        .nl()
        .kw(Terminal::Put)
        .id("x")
        .kw(Terminal::Plus)
        .int(1)
        .kw(Terminal::Into)
        .id("x")
        .nl()
        .end("repeat")
        .nl()
        .compile();

    let expected = Words::new()
        .op(Opcode::RepeatWhileCode)
        .word(9)
        .word(19)
        .named(Opcode::Eval, "x")
        .push(5)
        .op(Opcode::Lt)
        .op(Opcode::Stop)
        .named(Opcode::Eval, "x")
        .push(1)
        .op(Opcode::Add)
        .named(Opcode::VarPush, "x")
        .op(Opcode::Assign)
        .op(Opcode::XPop)
        .op(Opcode::Stop)
        .build();
    assert_eq!(unit.script.words(), expected.as_slice());
}

#[test]
fn repeat_with_counts_up() {
    let unit = Src::new()
        .kw(Terminal::Repeat)
        .kw(Terminal::With)
        .id("i")
        .kw(Terminal::Equals)
        .int(1)
        .kw(Terminal::To)
        .int(10)
        .nl()
        .kw(Terminal::Put)
        .id("i")
        .nl()
        .end("repeat")
        .nl()
        .compile();

    let expected = Words::new()
        .op(Opcode::RepeatWithCode)
        .word(7)
        .word(10)
        .word(13)
        .int(1)
        .word(17)
        .name("i")
        .push(1)
        .op(Opcode::Stop)
        .push(10)
        .op(Opcode::Stop)
        .named(Opcode::Eval, "i")
        .op(Opcode::PrintTop)
        .op(Opcode::Stop)
        .build();
    assert_eq!(unit.script.words(), expected.as_slice());
}

#[test]
fn repeat_with_down_steps_backwards() {
    let unit = Src::new()
        .kw(Terminal::Repeat)
        .kw(Terminal::With)
        .id("i")
        .kw(Terminal::Equals)
        .int(10)
        .kw(Terminal::Down)
        .kw(Terminal::To)
        .int(1)
        .nl()
        .kw(Terminal::Put)
        .id("i")
        .nl()
        .end("repeat")
        .nl()
        .compile();

    let listing = disassemble(&unit.script);
    let Instruction::Op { operands, .. } = &listing[0] else {
        panic!("expected RepeatWithCode");
    };
    assert_eq!(operands[3], OperandValue::Int(-1));
    assert_eq!(operands[5], OperandValue::Name("i".to_string()));
    assert!(unit.is_clean());
}

#[test]
fn when_records_event_and_end() {
    let unit = Src::new()
        .kw(Terminal::When)
        .id("mouseDown")
        .kw(Terminal::Then)
        .id("beep")
        .nl()
        .compile();

    let expected = Words::new()
        .op(Opcode::WhenCode)
        .word(9)
        .name("mouseDown")
        .named(Opcode::Eval, "beep")
        .op(Opcode::Stop)
        .op(Opcode::Stop)
        .build();
    assert_eq!(unit.script.words(), expected.as_slice());
}

// =============================================================================
// Nesting
// =============================================================================

#[test]
fn block_if_inside_block_if() {
    let unit = Src::new()
        .kw(Terminal::If)
        .id("a")
        .kw(Terminal::Then)
        .nl()
        .kw(Terminal::If)
        .id("b")
        .kw(Terminal::Then)
        .nl()
        .kw(Terminal::Put)
        .int(1)
        .nl()
        .end("if")
        .nl()
        .kw(Terminal::Put)
        .int(2)
        .nl()
        .end("if")
        .nl()
        .kw(Terminal::Put)
        .int(3)
        .nl()
        .compile();

    let expected = Words::new()
        .op(Opcode::IfCode)
        .word(8)
        .word(0)
        .word(24)
        .word(0)
        .named(Opcode::Eval, "a")
        .op(Opcode::Stop)
        .op(Opcode::IfCode)
        .word(16)
        .word(0)
        .word(20)
        .word(0)
        .named(Opcode::Eval, "b")
        .op(Opcode::Stop)
        .push(1)
        .op(Opcode::PrintTop)
        .op(Opcode::Stop)
        .push(2)
        .op(Opcode::PrintTop)
        .op(Opcode::Stop)
        .push(3)
        .op(Opcode::PrintTop)
        .build();
    assert!(unit.is_clean());
    assert!(unit.unresolved_fixups.is_empty());
    assert_eq!(unit.script.words(), expected.as_slice());
}

#[test]
fn repeat_while_inside_repeat_with() {
    let unit = Src::new()
        .kw(Terminal::Repeat)
        .kw(Terminal::With)
        .id("i")
        .kw(Terminal::Equals)
        .int(1)
        .kw(Terminal::To)
        .int(3)
        .nl()
        .kw(Terminal::Repeat)
        .kw(Terminal::While)
        .id("x")
        .kw(Terminal::Lt)
        .id("i")
        .nl()
        .kw(Terminal::Put)
        .id("x")
        .nl()
        .end("repeat")
        .nl()
        .end("repeat")
        .nl()
        .compile();

    let expected = Words::new()
        .op(Opcode::RepeatWithCode)
        .word(7)
        .word(10)
        .word(13)
        .int(1)
        .word(27)
        .name("i")
        .push(1)
        .op(Opcode::Stop)
        .push(3)
        .op(Opcode::Stop)
        .op(Opcode::RepeatWhileCode)
        .word(22)
        .word(26)
        .named(Opcode::Eval, "x")
        .named(Opcode::Eval, "i")
        .op(Opcode::Lt)
        .op(Opcode::Stop)
        .named(Opcode::Eval, "x")
        .op(Opcode::PrintTop)
        .op(Opcode::Stop)
        .op(Opcode::Stop)
        .build();
    assert!(unit.is_clean());
    assert!(unit.unresolved_fixups.is_empty());
    assert_eq!(unit.script.words(), expected.as_slice());
}

#[test]
fn exit_repeat_inside_counted_loop() {
    let unit = Src::new()
        .kw(Terminal::Repeat)
        .kw(Terminal::With)
        .id("i")
        .kw(Terminal::Equals)
        .int(1)
        .kw(Terminal::To)
        .int(10)
        .nl()
        .kw(Terminal::If)
        .id("i")
        .kw(Terminal::Then)
        .kw(Terminal::Exit)
        .kw(Terminal::Repeat)
        .nl()
        .end("repeat")
        .nl()
        .compile();

    let listing = disassemble(&unit.script);
    assert_eq!(
        listing[0].to_string(),
        "0000  RepeatWithCode init=7 limit=10 body=13 step=1 end=24 var=\"i\""
    );
    assert_eq!(
        listing[5].to_string(),
        "0013  IfCode then=21 else=0 end=23 skip=0"
    );

    let expected = Words::new()
        .op(Opcode::RepeatWithCode)
        .word(7)
        .word(10)
        .word(13)
        .int(1)
        .word(24)
        .name("i")
        .push(1)
        .op(Opcode::Stop)
        .push(10)
        .op(Opcode::Stop)
        .op(Opcode::IfCode)
        .word(21)
        .word(0)
        .word(23)
        .word(0)
        .named(Opcode::Eval, "i")
        .op(Opcode::Stop)
        .op(Opcode::ExitRepeat)
        .op(Opcode::Stop)
        .op(Opcode::Stop)
        .build();
    assert!(unit.is_clean());
    assert_eq!(unit.script.words(), expected.as_slice());
}

// =============================================================================
// Closing Keywords
// =============================================================================

fn if_closed_by_end_repeat() -> Src {
    Src::new()
        .kw(Terminal::If)
        .id("x")
        .kw(Terminal::Then)
        .nl()
        .kw(Terminal::Put)
        .int(1)
        .nl()
        .end("repeat")
        .nl()
}

#[test]
fn mismatched_end_is_reported_and_code_kept() {
    let unit = if_closed_by_end_repeat().compile();

    assert_eq!(unit.error_count(), 1);
    let diagnostic = &unit.diagnostics[0];
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(
        diagnostic.message,
        "end mismatch: expected 'end if' but got 'end repeat'"
    );
    assert_eq!(diagnostic.line, 3);
    // the construct is still fully patched
    assert_eq!(&unit.script.words()[..5], &[Opcode::IfCode.word(), 8, 0, 12, 0]);
}

#[test]
fn mismatched_end_aborts_under_reject() {
    let options = CompileOptions::default().with_end_mismatch(EndMismatchPolicy::Reject);
    let err = if_closed_by_end_repeat().compile_with(options).unwrap_err();
    match err.kind {
        ErrorKind::EndMismatch {
            expected, found, ..
        } => {
            assert_eq!(expected, "if");
            assert_eq!(found, "repeat");
        }
        other => panic!("expected EndMismatch, got {other:?}"),
    }
}

#[test]
fn end_keyword_is_case_insensitive() {
    let unit = Src::new()
        .kw(Terminal::If)
        .id("x")
        .kw(Terminal::Then)
        .nl()
        .kw(Terminal::Put)
        .int(1)
        .nl()
        .end("IF")
        .nl()
        .compile();
    assert!(unit.is_clean());
}
