//! The Assembler module is in charge of taking a
//! source file and producing a flat integer image.
//!
//! The lexer splits lines into chunks, the tokenizer classifies and
//! validates them, and the emitter resolves labels in two passes
//! before serializing the image.

pub mod emitter;
pub mod grammar;
pub mod lexer;
pub mod output;
pub mod token;
pub mod tokenizer;

#[cfg(test)]
mod tests {
    use super::emitter::{Assembler, Options};
    use super::lexer::read_source;
    use super::token::TokenKind;
    use super::tokenizer::Tokenizer;

    const PROGRAM: &str = "
        .start main
msg:    .string \"HI THERE\"  ; greeting
count:  .integer #3
main:   movmr count r1
again:  outs msg
        sojnz r1 again
        halt
        .end
";

    #[test]
    fn test_assemble_program() {
        let source = read_source(Box::new(PROGRAM.as_bytes())).unwrap();
        let chunks: Vec<Vec<String>> = source.iter().map(|l| l.chunks.clone()).collect();

        let mut tokenizer = Tokenizer::new();
        let lines = tokenizer.run(&chunks).to_vec();
        assert_eq!(lines.len(), source.len());

        let mut asm = Assembler::new(Options::default());
        assert_eq!(asm.count_bad_tokens(&lines), 0);
        asm.pass1(&lines);
        asm.pass2(&lines).unwrap();

        let labels = asm.labels();
        assert_eq!(labels["msg"], 0);
        assert_eq!(labels["count"], 9);
        assert_eq!(labels["main"], 10);
        assert_eq!(labels["again"], 13);

        let mut expected = vec![10];                               // .start main
        expected.push(8);                                          // "HI THERE"
        expected.extend("HI THERE".chars().map(|c| c as i64));
        expected.push(3);                                          // .integer #3
        expected.extend(&[8, 9, 1]);                               // movmr count r1
        expected.extend(&[55, 0]);                                 // outs msg
        expected.extend(&[30, 1, 13]);                             // sojnz r1 again
        expected.push(0);                                          // halt
        let last = expected.len() as i64 - 1;
        expected.insert(0, last);

        assert_eq!(asm.binary(), &expected[..]);
    }

    #[test]
    fn test_bad_program_reports_every_error() {
        let input = "
start:  movir #x r0
        mov r1 r2
        jmp nowhere
        push r1 r2
";
        let source = read_source(Box::new(input.as_bytes())).unwrap();
        let chunks: Vec<Vec<String>> = source.iter().map(|l| l.chunks.clone()).collect();

        let mut tokenizer = Tokenizer::new();
        let lines = tokenizer.run(&chunks).to_vec();

        let mut asm = Assembler::new(Options::default());
        // #x, mov + 2 cascades, nowhere, 3 arity errors
        assert_eq!(asm.count_bad_tokens(&lines), 8);

        let symbols = asm.symbol_dump(&lines);
        assert!(symbols.contains("BadToken: #x - Expected Integer: not an integer."));
        assert!(symbols.contains("BadToken: nowhere - Expected Label: label not yet defined."));
        assert_eq!(lines[1][0].kind(), TokenKind::LabelDefinition);

        asm.add_error("line 2: #x - Expected Integer: not an integer.");
        let text: Vec<&str> = source.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(asm.listing(&lines, &text).unwrap(),
            "line 2: #x - Expected Integer: not an integer.\n");
    }
}
