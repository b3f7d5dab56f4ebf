//! Statements, commands and structured control flow.
//!
//! Structured constructs reserve their placeholder slots when the opening
//! keyword reduces and patch them when the whole construct reduces, at
//! which point every part's start offset is on the value stack.

use marquee_bytecode::Opcode;
use marquee_bytecode::encoding::encode_int;
use marquee_foundation::Result;
use marquee_grammar::Rule;

use super::{Compiler, Rhs, unhandled};
use crate::value::{Fixup, FixupKind, SemanticValue};

/// `ConstPush` argument telling `Goto`/`Play` which operands are stacked.
const FRAME_ONLY: i32 = 1;
const MOVIE_ONLY: i32 = 2;
const FRAME_AND_MOVIE: i32 = 3;

/// Slot numbers within each construct's reserved words.
mod slot {
    pub const THEN: u32 = 1;
    pub const ELSE: u32 = 2;
    pub const END: u32 = 3;

    pub const BODY: u32 = 1;
    pub const LOOP_END: u32 = 2;

    pub const INIT: u32 = 1;
    pub const LIMIT: u32 = 2;
    pub const COUNTED_BODY: u32 = 3;
    pub const STEP: u32 = 4;
    pub const COUNTED_END: u32 = 5;

    pub const WHEN_END: u32 = 1;
}

impl Compiler<'_> {
    pub(super) fn statement(&mut self, rule: Rule, mut rhs: Rhs) -> Result<SemanticValue> {
        match rule {
            // === Assignment ===
            Rule::PutInto => {
                let start = rhs.code(1)?;
                let name = rhs.text(3)?;
                self.script.emit_named(Opcode::VarPush, &name);
                self.emit(Opcode::Assign);
                Ok(SemanticValue::Code(start))
            }
            Rule::PutAfter | Rule::PutBefore => {
                let start = rhs.code(1)?;
                self.emit(if rule == Rule::PutAfter {
                    Opcode::After
                } else {
                    Opcode::Before
                });
                Ok(SemanticValue::Code(start))
            }
            Rule::SetIdEq | Rule::SetIdTo => {
                let name = rhs.text(1)?;
                let start = rhs.code(3)?;
                self.script.emit_named(Opcode::VarPush, &name);
                self.emit(Opcode::Assign);
                Ok(SemanticValue::Code(start))
            }
            Rule::SetTheEq | Rule::SetTheTo => {
                let entity = rhs.entity(1)?;
                let start = rhs.code(3)?;
                self.script.emit_const(0);
                self.emit(Opcode::TheEntityAssign);
                self.script.emit_entity(entity);
                Ok(SemanticValue::Code(start))
            }
            Rule::SetTheOfEq | Rule::SetTheOfTo => {
                let entity = rhs.entity(1)?;
                let start = rhs.code(2)?;
                self.emit(Opcode::Swap);
                self.emit(Opcode::TheEntityAssign);
                self.script.emit_entity(entity);
                Ok(SemanticValue::Code(start))
            }
            Rule::LineAsgn => {
                self.emit(Opcode::XPop);
                Ok(SemanticValue::None)
            }

            // === Statements ===
            Rule::OneLinerExpr => {
                let start = rhs.code(0)?;
                self.emit(Opcode::XPop);
                Ok(SemanticValue::Code(start))
            }
            Rule::OneLinerFunc | Rule::StmtOneLiner | Rule::StmtIf => rhs.take(0),

            // === Blocks ===
            Rule::Begin | Rule::StmtListEmpty => Ok(SemanticValue::Code(self.here())),
            Rule::End => {
                self.emit(Opcode::Stop);
                Ok(SemanticValue::Code(self.here()))
            }
            Rule::StmtListNewline | Rule::StmtListStmt => rhs.take(0),
            Rule::CondExpr => {
                let start = rhs.code(0)?;
                self.emit(Opcode::Stop);
                Ok(SemanticValue::Code(start))
            }
            Rule::CondParen => rhs.take(1),

            // === Conditionals ===
            Rule::IfOpen | Rule::ElseIfOpen => {
                let fixup = self.open_fixup(FixupKind::Conditional, Opcode::IfCode);
                self.script.emit_word(u32::from(rule == Rule::ElseIfOpen));
                Ok(SemanticValue::Fixup(fixup))
            }
            Rule::IfBlock => {
                let fixup = rhs.fixup(0)?;
                let then = rhs.code(4)?;
                let end = rhs.code(5)?;
                let closer = rhs.end_word(6)?;
                self.check_end(&closer, "if", rhs.span(6))?;
                self.patch_conditional(fixup, then, 0, end)?;
                Ok(SemanticValue::None)
            }
            Rule::IfBlockElse => {
                let fixup = rhs.fixup(0)?;
                let then = rhs.code(4)?;
                let otherwise = rhs.code(7)?;
                let end = rhs.code(8)?;
                let closer = rhs.end_word(9)?;
                self.check_end(&closer, "if", rhs.span(9))?;
                self.patch_conditional(fixup, then, otherwise, end)?;
                Ok(SemanticValue::None)
            }
            Rule::IfBlockElseIf => {
                let fixup = rhs.fixup(0)?;
                let then = rhs.code(4)?;
                let otherwise = rhs.code(6)?;
                let chain = rhs.chain(7)?;
                let end = rhs.code(8)?;
                let closer = rhs.end_word(9)?;
                self.check_end(&closer, "if", rhs.span(9))?;
                self.patch_conditional(fixup, then, otherwise, end)?;
                self.patch_chain(&chain, 0, end)?;
                Ok(SemanticValue::None)
            }
            Rule::IfOneLiner => {
                let fixup = rhs.fixup(0)?;
                let then = rhs.code(3)?;
                let end = rhs.code(5)?;
                self.patch_conditional(fixup, then, 0, end)?;
                Ok(SemanticValue::None)
            }
            Rule::IfOneLinerElse => {
                let fixup = rhs.fixup(0)?;
                let then = rhs.code(3)?;
                let otherwise = rhs.code(7)?;
                let end = rhs.code(9)?;
                self.patch_conditional(fixup, then, otherwise, end)?;
                Ok(SemanticValue::None)
            }
            Rule::IfOneLinerElseIf => {
                let fixup = rhs.fixup(0)?;
                let then = rhs.code(3)?;
                let otherwise = rhs.code(5)?;
                let chain = rhs.chain(6)?;
                let trailing = rhs.optional_code(8)?.unwrap_or(0);
                let end = rhs.code(9)?;
                self.patch_conditional(fixup, then, otherwise, end)?;
                self.patch_chain(&chain, trailing, end)?;
                Ok(SemanticValue::None)
            }
            Rule::ElseOneLinerEmpty => Ok(SemanticValue::None),
            Rule::ElseOneLiner => Ok(SemanticValue::Code(rhs.code(1)?)),
            Rule::ElseIfChain | Rule::ElseIfOneLinerChain => {
                let mut chain = rhs.chain(0)?;
                chain.extend(rhs.chain(1)?);
                Ok(SemanticValue::Chain(chain))
            }
            Rule::ElseIfFirst | Rule::ElseIfOneLinerFirst | Rule::ElseIfFromOneLiner => {
                rhs.take(0)
            }
            Rule::ElseIfOneLinerClause | Rule::ElseIfBlockClause => {
                let fixup = rhs.fixup(0)?;
                let then = rhs.code(3)?;
                self.patch(fixup, slot::THEN, then)?;
                Ok(SemanticValue::Chain(vec![fixup]))
            }

            // === Loops ===
            Rule::RepeatWhileOpen => Ok(SemanticValue::Fixup(
                self.open_fixup(FixupKind::WhileLoop, Opcode::RepeatWhileCode),
            )),
            Rule::RepeatWhileLoop => {
                let fixup = rhs.fixup(0)?;
                let body = rhs.code(2)?;
                let end = rhs.code(3)?;
                let closer = rhs.end_word(4)?;
                self.check_end(&closer, "repeat", rhs.span(4))?;
                self.patch(fixup, slot::BODY, body)?;
                self.patch(fixup, slot::LOOP_END, end)?;
                self.close_fixup(fixup);
                Ok(SemanticValue::None)
            }
            Rule::RepeatWithOpen => {
                let name = rhs.text(2)?;
                let fixup = self.open_fixup(FixupKind::CountedLoop, Opcode::RepeatWithCode);
                self.script.emit_name(&name);
                Ok(SemanticValue::Fixup(fixup))
            }
            Rule::RepeatWithUp | Rule::RepeatWithDown => {
                // `down` shifts every later symbol by one.
                let (shift, step) = if rule == Rule::RepeatWithUp {
                    (0, 1)
                } else {
                    (1, -1)
                };
                let fixup = rhs.fixup(0)?;
                let init = rhs.code(2)?;
                let limit = rhs.code(5 + shift)?;
                let body = rhs.code(7 + shift)?;
                let end = rhs.code(8 + shift)?;
                let closer = rhs.end_word(9 + shift)?;
                self.check_end(&closer, "repeat", rhs.span(9 + shift))?;
                self.patch(fixup, slot::INIT, init)?;
                self.patch(fixup, slot::LIMIT, limit)?;
                self.patch(fixup, slot::COUNTED_BODY, body)?;
                self.patch(fixup, slot::STEP, encode_int(step))?;
                self.patch(fixup, slot::COUNTED_END, end)?;
                self.close_fixup(fixup);
                Ok(SemanticValue::None)
            }

            // === Events ===
            Rule::WhenOpen => {
                let event = rhs.text(1)?;
                let fixup = self.open_fixup(FixupKind::When, Opcode::WhenCode);
                self.script.emit_name(&event);
                Ok(SemanticValue::Fixup(fixup))
            }
            Rule::WhenClause => {
                let fixup = rhs.fixup(0)?;
                let end = rhs.code(2)?;
                self.patch(fixup, slot::WHEN_END, end)?;
                self.emit(Opcode::Stop);
                self.close_fixup(fixup);
                Ok(SemanticValue::None)
            }

            _ => self.command(rule, rhs),
        }
    }

    /// Fills the then, else and end slots of a conditional.
    fn patch_conditional(
        &mut self,
        fixup: Fixup,
        then: u32,
        otherwise: u32,
        end: u32,
    ) -> Result<()> {
        self.patch(fixup, slot::THEN, then)?;
        self.patch(fixup, slot::ELSE, otherwise)?;
        self.patch(fixup, slot::END, end)?;
        self.close_fixup(fixup);
        Ok(())
    }

    /// Links `else if` clauses: each one's else slot points at the next
    /// clause, the last one's at `trailing`, and every end slot at `end`.
    fn patch_chain(&mut self, chain: &[Fixup], trailing: u32, end: u32) -> Result<()> {
        let mut otherwise = trailing;
        for &link in chain.iter().rev() {
            self.patch(link, slot::ELSE, otherwise)?;
            self.patch(link, slot::END, end)?;
            self.close_fixup(link);
            otherwise = link.at;
        }
        Ok(())
    }

    /// Commands: `put`, `exit`, declarations, navigation and built-ins.
    fn command(&mut self, rule: Rule, mut rhs: Rhs) -> Result<SemanticValue> {
        match rule {
            Rule::FuncPut => {
                self.emit(Opcode::PrintTop);
            }
            Rule::FuncGoto | Rule::FuncPlay | Rule::GlobalDecl | Rule::InstanceDecl => {}
            Rule::ExitRepeat => {
                self.emit(Opcode::ExitRepeat);
            }
            Rule::Exit => {
                self.script.emit_const(0);
                self.emit(Opcode::ProcRet);
            }
            Rule::GlobalFirst | Rule::InstanceFirst => {
                let name = rhs.text(0)?;
                self.declare(rule, &name);
            }
            Rule::GlobalNext | Rule::InstanceNext => {
                let name = rhs.text(2)?;
                self.declare(rule, &name);
            }

            // === Built-ins ===
            Rule::BuiltinOneArg | Rule::BuiltinOptionalWithArg => {
                let name = rhs.text(0)?;
                self.emit_builtin(&name, 1);
            }
            Rule::BuiltinOptionalBare => {
                let name = rhs.text(0)?;
                self.emit(Opcode::VoidPush);
                self.emit_builtin(&name, 1);
            }
            Rule::BuiltinArgList => {
                let name = rhs.text(0)?;
                let (count, _) = rhs.args(1)?;
                self.emit_builtin(&name, count);
            }
            Rule::TwoWordBuiltin => {
                let first = rhs.text(0)?;
                let second = rhs.text(1)?;
                let (count, _) = rhs.args(2)?;
                self.emit_builtin(&format!("{first}-{second}"), count);
            }
            Rule::OpenWith => {
                self.emit(Opcode::Open);
            }
            Rule::Open => {
                self.emit(Opcode::VoidPush);
                self.emit(Opcode::Open);
            }

            // === Navigation ===
            Rule::GoLoop => {
                self.emit(Opcode::GotoLoop);
            }
            Rule::GoNext => {
                self.emit(Opcode::GotoNext);
            }
            Rule::GoPrevious => {
                self.emit(Opcode::GotoPrevious);
            }
            Rule::PlayDone => {
                self.emit(Opcode::PlayDone);
            }
            Rule::GoFrame | Rule::GoFrameMovie | Rule::GoMovie => {
                self.navigate(rule, Opcode::Goto);
            }
            Rule::PlayFrame | Rule::PlayFrameMovie | Rule::PlayMovie => {
                self.navigate(rule, Opcode::Play);
            }
            Rule::FrameKeyword | Rule::FrameExpr | Rule::MovieOf | Rule::Movie => {}

            _ => return Err(unhandled(rule)),
        }
        Ok(SemanticValue::None)
    }

    fn declare(&mut self, rule: Rule, name: &str) {
        let op = if matches!(rule, Rule::GlobalFirst | Rule::GlobalNext) {
            Opcode::Global
        } else {
            Opcode::Instance
        };
        self.script.emit_named(op, name);
    }

    fn navigate(&mut self, rule: Rule, op: Opcode) {
        let operands = match rule {
            Rule::GoFrame | Rule::PlayFrame => FRAME_ONLY,
            Rule::GoMovie | Rule::PlayMovie => MOVIE_ONLY,
            _ => FRAME_AND_MOVIE,
        };
        self.script.emit_const(operands);
        self.emit(op);
    }
}
