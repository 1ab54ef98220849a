//! This lexer splits source lines into whitespace-delimited chunks.
//!
//! It knows nothing about the grammar: classifying chunks is the
//! tokenizer's job. Comments start with a semicolon and run to the end of
//! the line. A double-quoted run stays in one chunk even if it contains
//! spaces.
use std::io::{BufRead, BufReader, Read};
use once_cell::sync::Lazy;
use regex::Regex;

static CHUNK: Lazy<Regex> = Lazy::new(|| {
    // Alternation order matters: quoted runs win over bare words.
    Regex::new(r#""[^"]*"|;|[^\s;]+"#).unwrap()
});

/// One line of source as read from the input.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SourceLine {
    pub text:   String,
    pub chunks: Vec<String>,
}

/// Reads every line from `reader`, keeping the text for the listing.
pub fn read_source<T: Read + ?Sized>(reader: Box<T>) -> Result<Vec<SourceLine>, String> {
    let mut lines: Vec<SourceLine> = Vec::with_capacity(256);

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        match line {
            Ok(s) => {
                let chunks = split_line(&s);
                debug!("line {}: {:?}", index + 1, chunks);
                lines.push(SourceLine { text: s.trim_end().to_owned(), chunks });
            },
            Err(e) => return Err(format!("error reading line {}: {}", index + 1, e)),
        }
    }

    Ok(lines)
}

/// Splits a single line into chunks, dropping any trailing comment.
pub fn split_line(line: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(4);

    for m in CHUNK.find_iter(line) {
        if m.as_str() == ";" {
            break;
        }
        out.push(m.as_str().to_owned());
    }

    out
}
