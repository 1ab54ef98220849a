//! The Tokenizer turns chunk lines from the lexer into token lines.
//!
//! Tokenizing happens in two phases. `collect_labels` first records every
//! label declared anywhere in the source, since label operands are only
//! valid if the label exists somewhere in the file. `tokenize_line` then
//! classifies and validates each chunk against the grammar.
//!
//! Nothing here fails: bad chunks are reported as `Token::BadToken` and
//! tokenizing carries on, so one run reports every problem.
use std::collections::HashSet;
use super::grammar::{self, Operand};
use super::token::{Token, TokenLine, Tuple};

#[derive(Default, Debug)]
pub struct Tokenizer {
    lines:  Vec<TokenLine>,
    labels: HashSet<String>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Tokenizer::default()
    }

    /// Pre-scans and tokenizes every line, returning the token lines.
    pub fn run<S: AsRef<str>>(&mut self, source: &[Vec<S>]) -> &[TokenLine] {
        for chunks in source {
            self.collect_labels(chunks);
        }
        info!("found {} label name(s)", self.labels.len());

        for chunks in source {
            self.tokenize_line(chunks);
        }
        &self.lines
    }

    /// Records the label declared by a line, if any.
    pub fn collect_labels<S: AsRef<str>>(&mut self, chunks: &[S]) {
        if let Some(name) = chunks.first().and_then(|c| c.as_ref().strip_suffix(':')) {
            self.labels.insert(name.to_owned());
        }
    }

    /// Tokenizes one line and appends it to the accumulated token lines.
    pub fn tokenize_line<S: AsRef<str>>(&mut self, chunks: &[S]) -> &TokenLine {
        let mut chunks: Vec<&str> = chunks.iter().map(|c| c.as_ref()).collect();
        let mut line: TokenLine = Vec::with_capacity(chunks.len());

        if let Some(first) = chunks.first().copied() {
            if let Some(name) = first.strip_suffix(':') {
                line.push(label_definition(first, name));
                chunks.remove(0);
            }
        }

        // Empty lines and label-only lines are valid.
        if let Some(mnemonic) = chunks.first().copied() {
            match grammar::expected(mnemonic) {
                Some(expected) => {
                    if grammar::is_directive(mnemonic) && line.is_empty()
                        && mnemonic != ".end" && mnemonic != ".start" {
                        line.push(Token::bad(mnemonic,
                            "Expected label definition or instruction: first element cannot be directive that is not .end."));
                    }

                    if chunks.len() != expected.len() + 1 {
                        for _ in chunks.iter() {
                            line.push(Token::BadToken {
                                message: format!("Incorrect number of parameters. {} should have {}",
                                    mnemonic, expected.len()),
                            });
                        }
                    } else {
                        line.push(directive_or_instruction(mnemonic));
                        for (kind, chunk) in expected.iter().zip(&chunks[1..]) {
                            line.push(self.operand(*kind, chunk));
                        }
                    }
                },
                None => {
                    line.push(Token::bad(mnemonic, "Invalid instruction or directive."));
                    for _ in &chunks[1..] {
                        line.push(Token::bad(mnemonic, "See first error case in line."));
                    }
                },
            }
        }

        for token in line.iter().filter(|t| t.is_bad()) {
            warn!("line {}: {}", self.lines.len() + 1, token.description());
        }

        self.lines.push(line);
        &self.lines[self.lines.len() - 1]
    }

    fn operand(&self, kind: Operand, chunk: &str) -> Token {
        match kind {
            Operand::Register => register(chunk),
            Operand::Label    => self.label(chunk),
            Operand::Integer  => integer(chunk),
            Operand::String   => string(chunk),
            Operand::Tuple    => tuple(chunk),
        }
    }

    fn label(&self, chunk: &str) -> Token {
        if self.labels.contains(chunk) {
            Token::Label { name: chunk.to_owned() }
        } else {
            Token::bad(chunk, "Expected Label: label not yet defined.")
        }
    }

    pub fn token_lines(&self) -> &[TokenLine] {
        &self.lines
    }

    pub fn labels(&self) -> &HashSet<String> {
        &self.labels
    }

    /// Forgets all token lines and label names.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.labels.clear();
    }
}

fn label_definition(chunk: &str, name: &str) -> Token {
    if grammar::is_mnemonic(name) {
        Token::bad(chunk, "Expected Label Definition: cannot be name of directive or instruction.")
    } else if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        Token::bad(chunk, "Expected Label Definition: must start with a letter.")
    } else if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        Token::bad(chunk, "Expected Label Definition: must contain only letters and numbers.")
    } else {
        Token::LabelDefinition { name: name.to_owned(), text: chunk.to_owned() }
    }
}

fn directive_or_instruction(mnemonic: &str) -> Token {
    match grammar::opcode(mnemonic) {
        Some(opcode) => Token::Instruction { opcode, text: mnemonic.to_owned() },
        None         => Token::Directive { text: mnemonic.to_owned() },
    }
}

fn register(chunk: &str) -> Token {
    let mut chars = chunk.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(_), Some(_), None) => {},
        _ => return Token::bad(chunk, "Expected Register: should have length 2."),
    }

    if !chunk.starts_with('r') {
        return Token::bad(chunk, "Expected Register: should start with r.");
    }

    match chunk[1..].chars().next().and_then(|c| c.to_digit(10)) {
        Some(index) => Token::Register { index: index as i64, text: chunk.to_owned() },
        None        => Token::bad(chunk, "Expected Register: should have integer."),
    }
}

fn integer(chunk: &str) -> Token {
    match chunk.strip_prefix('#') {
        Some(rest) => match rest.parse::<i64>() {
            Ok(value) => Token::ImmediateInteger { value, text: chunk.to_owned() },
            Err(_)    => Token::bad(chunk, "Expected Integer: not an integer."),
        },
        None => Token::bad(chunk, "Expected Integer: must have hashtag."),
    }
}

/// Strips one `delim` from both ends, if present and distinct.
fn enclosed(chunk: &str, delim: char) -> Option<&str> {
    chunk.strip_prefix(delim).and_then(|rest| rest.strip_suffix(delim))
}

fn string(chunk: &str) -> Token {
    match enclosed(chunk, '"') {
        Some(value) => Token::ImmediateString { value: value.to_owned(), text: chunk.to_owned() },
        None        => Token::bad(chunk, "Expected String: missing quotation mark."),
    }
}

fn tuple(chunk: &str) -> Token {
    let inner = match enclosed(chunk, '/') {
        Some(inner) => inner,
        None => return Token::bad(chunk, "Expected Tuple: missing backslash."),
    };

    let chars: Vec<char> = inner.chars().collect();
    if chars.len() != 5 {
        return Token::bad(chunk, "Expected Tuple: must have length 5.");
    }

    let mut digits = [0i64; 4];
    for (i, ordinal) in ["first", "second", "third", "fourth"].iter().enumerate() {
        match chars[i].to_digit(10) {
            Some(d) => digits[i] = d as i64,
            None => return Token::bad(chunk,
                &format!("Expected Tuple: {} element must be integer.", ordinal)),
        }
    }

    match chars[4] {
        flag @ 'r' | flag @ 'R' => Token::ImmediateTuple {
            value: Tuple { digits, flag },
            text: chunk.to_owned(),
        },
        _ => Token::bad(chunk, "Expected Tuple: fifth element must be \"r\" or \"R\"."),
    }
}
