//! Tokens produced by the tokenizer and consumed by the emitter.
//!
//! Every chunk of a source line becomes exactly one token. Chunks that
//! fail validation become a `BadToken` carrying the diagnostic, so a
//! single run can report every problem in the file.
use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TokenKind {
    Instruction,
    Directive,
    LabelDefinition,
    Label,
    Register,
    ImmediateInteger,
    ImmediateString,
    ImmediateTuple,
    BadToken,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The payload of a `/dddd[rR]/` operand: four digits and a flag character.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Tuple {
    pub digits: [i64; 4],
    pub flag: char,
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [a, b, c, d] = self.digits;
        write!(f, "({}, {}, {}, {}, {})", a, b, c, d, self.flag)
    }
}

/// A classified chunk. `text` is always the chunk as written in the source.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
    Instruction { opcode: i64, text: String },
    Directive { text: String },
    LabelDefinition { name: String, text: String },
    Label { name: String },
    Register { index: i64, text: String },
    ImmediateInteger { value: i64, text: String },
    ImmediateString { value: String, text: String },
    ImmediateTuple { value: Tuple, text: String },
    BadToken { message: String },
}

pub type TokenLine = Vec<Token>;

impl Token {
    /// Shorthand for building a diagnostic about `chunk`.
    pub fn bad(chunk: &str, message: &str) -> Self {
        Token::BadToken { message: format!("{} - {}", chunk, message) }
    }

    pub fn kind(&self) -> TokenKind {
        use Token::*;
        match self {
            Instruction { .. }      => TokenKind::Instruction,
            Directive { .. }        => TokenKind::Directive,
            LabelDefinition { .. }  => TokenKind::LabelDefinition,
            Label { .. }            => TokenKind::Label,
            Register { .. }         => TokenKind::Register,
            ImmediateInteger { .. } => TokenKind::ImmediateInteger,
            ImmediateString { .. }  => TokenKind::ImmediateString,
            ImmediateTuple { .. }   => TokenKind::ImmediateTuple,
            BadToken { .. }         => TokenKind::BadToken,
        }
    }

    /// The original source text, or the diagnostic for a `BadToken`.
    pub fn description(&self) -> &str {
        use Token::*;
        match self {
            Instruction { text, .. }      |
            Directive { text }            |
            LabelDefinition { text, .. }  |
            Register { text, .. }         |
            ImmediateInteger { text, .. } |
            ImmediateString { text, .. }  |
            ImmediateTuple { text, .. }   => text,
            Label { name }                => name,
            BadToken { message }          => message,
        }
    }

    /// The resolved integer carried by opcodes, registers and literals.
    pub fn value(&self) -> Option<i64> {
        match self {
            Token::Instruction { opcode, .. }     => Some(*opcode),
            Token::Register { index, .. }         => Some(*index),
            Token::ImmediateInteger { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Number of image units this token occupies once assembled.
    pub fn width(&self) -> i64 {
        use Token::*;
        match self {
            Instruction { .. } | Label { .. } |
            ImmediateInteger { .. } | Register { .. } => 1,
            ImmediateString { value, .. }             => 1 + value.chars().count() as i64,
            ImmediateTuple { .. }                     => 5,
            Directive { .. } | LabelDefinition { .. } |
            BadToken { .. }                           => 0,
        }
    }

    pub fn is_bad(&self) -> bool {
        matches!(self, Token::BadToken { .. })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::ImmediateString { value, .. }  => write!(f, "{}: {}", self.kind(), value),
            Token::ImmediateInteger { value, .. } => write!(f, "{}: {}", self.kind(), value),
            Token::ImmediateTuple { value, .. }   => write!(f, "{}: {}", self.kind(), value),
            _ => write!(f, "{}: {}", self.kind(), self.description()),
        }
    }
}

/// Code point of a character as stored in the image.
pub fn code_point(c: char) -> i64 {
    c as u32 as i64
}
