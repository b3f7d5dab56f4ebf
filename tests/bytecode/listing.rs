//! Disassembly of compiler output and of arbitrary words.

use marquee_bytecode::{Instruction, Opcode, Script, disassemble};
use marquee_compiler::{CompilationUnit, CompileOptions, Session};
use marquee_foundation::{Span, Terminal, Token, TokenStream};
use proptest::prelude::*;

fn compile(kinds: &[(Terminal, &str)]) -> CompilationUnit {
    let tokens: Vec<Token> = kinds
        .iter()
        .enumerate()
        .map(|(i, (kind, text))| {
            let span = Span::new(i, i + 1, 1, 1);
            match kind {
                Terminal::Int => Token::int(text.parse().unwrap(), span),
                Terminal::Id | Terminal::EndClause => Token::text(*kind, *text, span),
                _ => Token::keyword(*kind, span),
            }
        })
        .collect();
    Session::new(CompileOptions::default())
        .compile(TokenStream::from(tokens))
        .unwrap()
}

/// Every word of a clean unit belongs to exactly one listed instruction.
fn assert_fully_decoded(unit: &CompilationUnit) {
    let listing = disassemble(&unit.script);
    assert!(
        listing
            .iter()
            .all(|line| matches!(line, Instruction::Op { .. })),
        "{listing:#?}"
    );
    let mut offsets: Vec<u32> = listing.iter().map(Instruction::offset).collect();
    offsets.push(unit.script.len());
    assert_eq!(offsets[0], 0);
    assert!(offsets.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn compiled_loops_decode_without_data_words() {
    use Terminal::*;
    let unit = compile(&[
        (Repeat, ""),
        (With, ""),
        (Id, "i"),
        (Equals, ""),
        (Int, "1"),
        (To, ""),
        (Int, "10"),
        (Newline, ""),
        (If, ""),
        (Id, "i"),
        (Gt, ""),
        (Int, "5"),
        (Then, ""),
        (Exit, ""),
        (Repeat, ""),
        (Newline, ""),
        (EndClause, "repeat"),
        (Newline, ""),
    ]);
    assert!(unit.is_clean());
    assert_fully_decoded(&unit);

    let structured: Vec<Opcode> = disassemble(&unit.script)
        .iter()
        .filter_map(Instruction::opcode)
        .filter(|op| op.is_structured())
        .collect();
    assert_eq!(structured, [Opcode::RepeatWithCode, Opcode::IfCode]);
}

#[test]
fn compiled_handler_decodes_without_data_words() {
    use Terminal::*;
    let unit = compile(&[
        (On, ""),
        (Id, "mouseUp"),
        (Id, "clickCount"),
        (Newline, ""),
        (Put, ""),
        (Id, "clickCount"),
        (Star, ""),
        (Int, "2"),
        (Into, ""),
        (Id, "total"),
        (Newline, ""),
        (EndClause, "mouseUp"),
        (Newline, ""),
    ]);
    assert!(unit.is_clean());
    assert_fully_decoded(&unit);

    let listing = disassemble(&unit.script);
    assert_eq!(
        listing.last().and_then(Instruction::opcode),
        Some(Opcode::ProcRet)
    );
    assert_eq!(listing[0].to_string(), "0000  VarPush \"clickCount\"");
}

proptest! {
    #[test]
    fn arbitrary_words_always_disassemble(words in prop::collection::vec(any::<u32>(), 0..64)) {
        let script = Script::from(words.clone());
        let listing = disassemble(&script);
        let mut last = None;
        for line in &listing {
            let offset = line.offset();
            prop_assert!((offset as usize) < words.len());
            if let Some(previous) = last {
                prop_assert!(offset > previous);
            }
            last = Some(offset);
            let _ = line.to_string();
        }
    }

    #[test]
    fn listing_starts_at_zero(words in prop::collection::vec(any::<u32>(), 1..64)) {
        let listing = disassemble(&Script::from(words));
        prop_assert_eq!(listing.first().map(Instruction::offset), Some(0));
    }
}
