//! Text renderings of an assembly run: the binary image, the symbol dump
//! and the listing. These only format state the passes already resolved.
use super::emitter::Assembler;
use super::token::{Token, TokenLine};

/// Width of the address and value column in the listing.
const LISTING_COLUMN: usize = 30;

/// Most units of a string operand shown on its listing line.
const LISTING_STRING_UNITS: usize = 4;

impl Assembler {
    /// One decimal integer per line.
    pub fn binary_dump(&self) -> String {
        self.binary().iter().map(|unit| format!("{}\n", unit)).collect()
    }

    /// One `<kind>: <value>` line per token, in emission order.
    pub fn symbol_dump(&self, lines: &[TokenLine]) -> String {
        lines.iter().flatten().map(|token| format!("{}\n", token)).collect()
    }

    /// Interleaves addresses and assembled values with the source text.
    ///
    /// If any run-level errors were recorded the listing holds only those.
    pub fn listing<S: AsRef<str>>(&self, lines: &[TokenLine], source: &[S]) -> Result<String, String> {
        let mut out = String::new();

        if !self.errors().is_empty() {
            for error in self.errors() {
                out.push_str(error);
                out.push('\n');
            }
            return Ok(out);
        }

        let mut counter: i64 = 0;
        for (index, line) in lines.iter().enumerate() {
            let mut column = format!("{}: ", counter);

            let is_start = line.first().map_or(false, |t| t.description() == ".start");
            if !is_start {
                for token in line {
                    let mut units = self.units(token)?;
                    if let Token::ImmediateString { .. } = token {
                        units.truncate(LISTING_STRING_UNITS);
                    }
                    if units.is_empty() {
                        continue;
                    }
                    for unit in units {
                        column.push_str(&format!("{} ", unit));
                    }
                    counter += token.width();
                }
            }

            let text = source.get(index).map_or("", |s| s.as_ref());
            out.push_str(&format!("{:<width$}{}\n", column, text, width = LISTING_COLUMN));
        }

        out.push_str("\n\nSymbol Table:\n");
        for (label, address) in self.labels() {
            out.push_str(&format!("{} {}\n", label, address));
        }

        Ok(out)
    }
}
