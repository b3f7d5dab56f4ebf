//! Splitting a script into definition units.
//!
//! `macro` and `method` bodies have no closing keyword and run to the end of
//! their unit, so a script holding several definitions is compiled one
//! definition at a time.

use marquee_foundation::{Terminal, Token};

fn starts_unit(kind: Terminal) -> bool {
    matches!(kind, Terminal::Macro | Terminal::Method | Terminal::Factory)
}

/// Cuts `tokens` before every `macro`, `method` or `factory` keyword that
/// starts a line. Each chunk ends with an `Eof` token; a trailing `Eof` in
/// the input is dropped. An empty input yields no chunks.
#[must_use]
pub fn split_definitions(tokens: Vec<Token>) -> Vec<Vec<Token>> {
    let mut chunks = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut line_start = true;

    for token in tokens {
        if token.is_eof() {
            break;
        }
        if line_start && starts_unit(token.kind) && !current.is_empty() {
            close(&mut chunks, std::mem::take(&mut current));
        }
        line_start = token.kind == Terminal::Newline;
        current.push(token);
    }
    if !current.is_empty() {
        close(&mut chunks, current);
    }
    chunks
}

fn close(chunks: &mut Vec<Vec<Token>>, mut chunk: Vec<Token>) {
    let end = chunk
        .last()
        .map_or_else(marquee_foundation::Span::at_start, |t| t.span.empty_after());
    chunk.push(Token::eof(end));
    chunks.push(chunk);
}
