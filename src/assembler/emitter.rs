//! The Emitter lays out token lines in memory and serializes them.
//!
//! Pass 1 binds every label definition to an address. Pass 2 walks the
//! same lines in the same order and appends each token's units to the
//! image, so the Nth unit written in pass 2 is the unit pass 1 counted
//! at address N. The optional header word sits in front of address 0.
use std::collections::BTreeMap;
use super::token::{code_point, Token, TokenLine, Tuple};

/// Where a label definition points.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LabelBinding {
    /// The address of the unit completed just before the definition.
    Reference,
    /// The address of the next unit emitted after the definition.
    NextUnit,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Options {
    /// Prefix the image with its last index once pass 2 completes.
    pub header:  bool,
    pub binding: LabelBinding,
}

impl Default for Options {
    fn default() -> Self {
        Options { header: true, binding: LabelBinding::Reference }
    }
}

pub type LabelTable = BTreeMap<String, i64>;

/// State owned by one assembly run.
#[derive(Default, Debug)]
pub struct Assembler {
    options:    Options,
    binary:     Vec<i64>,
    labels:     LabelTable,
    bad_tokens: usize,
    errors:     Vec<String>,
}

impl Assembler {
    pub fn new(options: Options) -> Self {
        Assembler { options, ..Default::default() }
    }

    /// Binds every label definition to an address.
    pub fn pass1(&mut self, lines: &[TokenLine]) {
        let offset = match self.options.binding {
            LabelBinding::Reference => 0,
            LabelBinding::NextUnit  => 1,
        };

        // One below the first real address.
        let mut counter: i64 = -1;
        for line in lines {
            for token in line {
                if let Token::LabelDefinition { name, .. } = token {
                    debug!("label `{}` bound to {}", name, counter + offset);
                    self.labels.insert(name.clone(), counter + offset);
                } else {
                    counter += token.width();
                }
            }
        }

        info!("pass 1 bound {} label(s), {} unit(s) laid out", self.labels.len(), counter + 1);
    }

    /// Serializes every line into the binary image.
    pub fn pass2(&mut self, lines: &[TokenLine]) -> Result<(), String> {
        for line in lines {
            for token in line {
                let units = self.units(token)?;
                self.binary.extend(units);
            }
        }

        if self.options.header {
            let last = self.binary.len() as i64 - 1;
            self.binary.insert(0, last);
        }

        info!("pass 2 emitted {} unit(s)", self.binary.len());
        Ok(())
    }

    /// The image units a single token assembles to.
    pub fn units(&self, token: &Token) -> Result<Vec<i64>, String> {
        match token {
            Token::Instruction { .. }                |
            Token::Register { .. }                   |
            Token::ImmediateInteger { .. }           => Ok(token.value().into_iter().collect()),
            Token::Label { name }                    => Ok(vec![self.address(name)?]),
            Token::ImmediateString { value, .. }     => Ok(string_units(value)),
            Token::ImmediateTuple { value, .. }      => Ok(tuple_units(value)),
            Token::Directive { .. } | Token::LabelDefinition { .. } => Ok(vec![]),
            Token::BadToken { message } => Err(format!(
                "emitter got bad token `{}` - assembly should stop when the tokenizer reports errors",
                message)),
        }
    }

    /// Looks up the address pass 1 bound to `name`.
    pub fn address(&self, name: &str) -> Result<i64, String> {
        self.labels.get(name).copied().ok_or_else(|| format!(
            "label `{}` has no address - the tokenizer should only accept declared labels", name))
    }

    /// Counts the bad tokens across `lines` and adds them to the running total.
    pub fn count_bad_tokens(&mut self, lines: &[TokenLine]) -> usize {
        let count = lines.iter().flatten().filter(|t| t.is_bad()).count();
        self.bad_tokens += count;
        self.bad_tokens
    }

    pub fn add_error<S: Into<String>>(&mut self, error: S) {
        self.errors.push(error.into());
    }

    pub fn binary(&self) -> &[i64] {
        &self.binary
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn bad_tokens(&self) -> usize {
        self.bad_tokens
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Clears all per-run state. Options are kept.
    pub fn reset(&mut self) {
        self.binary.clear();
        self.labels.clear();
        self.bad_tokens = 0;
        self.errors.clear();
    }
}

fn string_units(value: &str) -> Vec<i64> {
    let mut out = Vec::with_capacity(value.len() + 1);
    out.push(value.chars().count() as i64);
    out.extend(value.chars().map(code_point));
    out
}

fn tuple_units(value: &Tuple) -> Vec<i64> {
    let mut out = value.digits.to_vec();
    out.push(code_point(value.flag));
    out
}
