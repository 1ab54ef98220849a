//! Fixed grammar of the instruction set.
//!
//! Directives start with a dot and assemble to nothing themselves; their
//! operands are laid out in the image like any other operand.
//!
//! ```nasm
//! .start main          ; entry point
//! msg: .string "HI"    ; length prefix then code points
//! pat: .tuple /1234r/  ; four digits then the flag
//! n:   .integer #10
//! buf: .allocate #4
//! main: movir #5 r0
//!       outs msg
//!       halt
//! .end
//! ```
use std::collections::HashMap;
use once_cell::sync::Lazy;

/// The shape an operand chunk must have.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Operand {
    Register,
    Label,
    Integer,
    String,
    Tuple,
}

use Operand::*;

/// Instruction mnemonics paired with their opcodes.
const INSTRUCTIONS: [(&str, i64); 58] = [
    ("halt", 0),   ("clrr", 1),   ("clrx", 2),   ("clrm", 3),   ("clrb", 4),
    ("movir", 5),  ("movrr", 6),  ("movrm", 7),  ("movmr", 8),  ("movxr", 9),
    ("movar", 10), ("movb", 11),  ("addir", 12), ("addrr", 13), ("addmr", 14),
    ("addxr", 15), ("subir", 16), ("subrr", 17), ("submr", 18), ("subxr", 19),
    ("mulir", 20), ("mulrr", 21), ("mulmr", 22), ("mulxr", 23), ("divir", 24),
    ("divrr", 25), ("divmr", 26), ("divxr", 27), ("jmp", 28),   ("sojz", 29),
    ("sojnz", 30), ("aojz", 31),  ("aojnz", 32), ("cmpir", 33), ("cmprr", 34),
    ("cmpmr", 35), ("jmpn", 36),  ("jmpz", 37),  ("jmpp", 38),  ("jsr", 39),
    ("ret", 40),   ("push", 41),  ("pop", 42),   ("stackc", 43), ("outci", 44),
    ("outcr", 45), ("outcx", 46), ("outcb", 47), ("readi", 48), ("printi", 49),
    ("readc", 50), ("readln", 51), ("brk", 52),  ("movrx", 53), ("movxx", 54),
    ("outs", 55),  ("nop", 56),   ("jmpne", 57),
];

/// Operand lists for every directive and instruction.
const PARAMETERS: [(&str, &[Operand]); 64] = [
    (".string", &[String]),   (".tuple", &[Tuple]),     (".integer", &[Integer]),
    (".end", &[]),            (".allocate", &[Integer]), (".start", &[Label]),
    ("halt", &[]),            ("clrr", &[Register]),    ("clrx", &[Register]),
    ("clrm", &[Label]),       ("clrb", &[Register, Register]),
    ("movir", &[Integer, Register]),  ("movrr", &[Register, Register]),
    ("movrm", &[Register, Label]),    ("movmr", &[Label, Register]),
    ("movxr", &[Register, Register]), ("movar", &[Label, Register]),
    ("movb", &[Register, Register, Register]),
    ("addir", &[Integer, Register]),  ("addrr", &[Register, Register]),
    ("addmr", &[Label, Register]),    ("addxr", &[Register, Register]),
    ("subir", &[Integer, Register]),  ("subrr", &[Register, Register]),
    ("submr", &[Label, Register]),    ("subxr", &[Register, Register]),
    ("mulir", &[Integer, Register]),  ("mulrr", &[Register, Register]),
    ("mulmr", &[Label, Register]),    ("mulxr", &[Register, Register]),
    ("divir", &[Integer, Register]),  ("divrr", &[Register, Register]),
    ("divmr", &[Label, Register]),    ("divxr", &[Register, Register]),
    ("jmp", &[Label]),
    ("sojz", &[Register, Label]),     ("sojnz", &[Register, Label]),
    ("aojz", &[Register, Label]),     ("aojnz", &[Register, Label]),
    ("cmpir", &[Integer, Register]),  ("cmprr", &[Register, Register]),
    ("cmpmr", &[Label, Register]),
    ("jmpn", &[Label]),       ("jmpz", &[Label]),       ("jmpp", &[Label]),
    ("jsr", &[Label]),        ("ret", &[]),
    ("push", &[Register]),    ("pop", &[Register]),     ("stackc", &[Register]),
    ("outci", &[Integer]),    ("outcr", &[Register]),   ("outcx", &[Register]),
    ("outcb", &[Register, Register]), ("readi", &[Register, Register]),
    ("printi", &[Register]),  ("readc", &[Register]),   ("readln", &[Label, Register]),
    ("brk", &[]),             ("movrx", &[Register, Register]),
    ("movxx", &[Register, Register]), ("outs", &[Label]),
    ("nop", &[]),             ("jmpne", &[Label]),
];

static OPCODES: Lazy<HashMap<&'static str, i64>> =
    Lazy::new(|| INSTRUCTIONS.iter().copied().collect());

static EXPECTED: Lazy<HashMap<&'static str, &'static [Operand]>> =
    Lazy::new(|| PARAMETERS.iter().copied().collect());

/// Returns the opcode of an instruction mnemonic.
pub fn opcode(mnemonic: &str) -> Option<i64> {
    OPCODES.get(mnemonic).copied()
}

/// Returns the expected operands of a directive or instruction.
pub fn expected(mnemonic: &str) -> Option<&'static [Operand]> {
    EXPECTED.get(mnemonic).copied()
}

pub fn is_mnemonic(name: &str) -> bool {
    EXPECTED.contains_key(name)
}

pub fn is_directive(mnemonic: &str) -> bool {
    mnemonic.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_agree() {
        // Every instruction has a grammar entry; the rest are directives.
        for (name, _) in INSTRUCTIONS.iter() {
            assert!(is_mnemonic(name), "{} missing from grammar", name);
            assert!(!is_directive(name));
        }
        for (name, _) in PARAMETERS.iter() {
            assert!(opcode(name).is_some() || is_directive(name), "{}", name);
        }
        assert_eq!(OPCODES.len(), 58);
        assert_eq!(EXPECTED.len(), 64);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(opcode("halt"), Some(0));
        assert_eq!(opcode("movir"), Some(5));
        assert_eq!(opcode("jmpne"), Some(57));
        assert_eq!(opcode(".end"), None);
        assert_eq!(opcode("HALT"), None);

        assert_eq!(expected("movb"), Some(&[Register, Register, Register][..]));
        assert_eq!(expected(".start"), Some(&[Label][..]));
        assert_eq!(expected(".end"), Some(&[][..]));
        assert_eq!(expected("mov"), None);
    }
}
