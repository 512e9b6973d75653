//! Line-oriented readers for the memory image and the instruction list.
//!
//! Both sources are whitespace-delimited. Lines with fewer than two tokens are skipped, anything
//! after the second token is ignored. Numeric and flag errors are fatal.

use std::{fs, num::ParseIntError, ops::Range, path::Path};

use miette::{IntoDiagnostic, NamedSource, Result};

use crate::{
    error,
    flags::{FlagError, Nixbpe},
    memory::{Memory, Word},
};

/// Text of an input file, kept around so diagnostics can point into it.
#[derive(Clone, Debug)]
pub struct Source {
    name: String,
    text: String,
}

impl Source {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Source {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_diagnostic()?;
        Ok(Source::new(path.display().to_string(), text))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn named(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.text.clone())
    }

    /// Byte range of `token` within the source. `token` must be a slice of `self.text`.
    fn span_of(&self, token: &str) -> Range<usize> {
        let start = token.as_ptr() as usize - self.text.as_ptr() as usize;
        start..start + token.len()
    }

    /// Non-empty lines, numbered from 1, split into their first two tokens.
    /// `None` marks a line that should be skipped.
    fn fields(&self) -> impl Iterator<Item = (usize, Option<(&str, &str)>)> + '_ {
        self.text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                let mut words = line.split_whitespace();
                let pair = match (words.next(), words.next()) {
                    (Some(first), Some(second)) => Some((first, second)),
                    _ => None,
                };
                (i + 1, pair)
            })
    }
}

/// Parse an unsigned hexadecimal literal, with optional `0x`/`0X` prefix.
pub fn hex_value(token: &str) -> Result<Word, ParseIntError> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    Word::from_str_radix(digits, 16)
}

fn parse_hex(src: &Source, token: &str) -> Result<Word> {
    hex_value(token).map_err(|e| error::ingest_bad_hex(src.span_of(token), src, e))
}

fn parse_flags(src: &Source, token: &str) -> Result<Nixbpe> {
    token.parse::<Nixbpe>().map_err(|e| {
        let mut span = src.span_of(token);
        if let FlagError::InvalidBit { position, found } = e {
            // Leading bits are ASCII, so char position == byte offset
            span.start += position;
            span.end = span.start + found.len_utf8();
        }
        error::ingest_bad_flags(span, src, e)
    })
}

/// Build the memory image from `address value` lines.
pub fn load_memory(src: &Source) -> Result<Memory> {
    let mut mem = Memory::new();
    for (_, pair) in src.fields() {
        let Some((addr, value)) = pair else {
            continue;
        };
        mem.load(parse_hex(src, addr)?, parse_hex(src, value)?);
    }
    Ok(mem)
}

/// One `flags operand` line of the instruction list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record<'a> {
    /// 1-based line number in the source
    pub line: usize,
    /// Flag token exactly as written
    pub raw_flags: &'a str,
    /// Operand token exactly as written
    pub raw_operand: &'a str,
    pub flags: Nixbpe,
    pub operand: Word,
}

impl<'a> Record<'a> {
    /// Returns `Ok(None)` for a line that is skipped, `Err` for a line that is malformed.
    fn try_parse(src: &'a Source, line: usize, pair: Option<(&'a str, &'a str)>) -> Result<Option<Self>> {
        let Some((raw_flags, raw_operand)) = pair else {
            return Ok(None);
        };
        let flags = parse_flags(src, raw_flags)?;
        let operand = parse_hex(src, raw_operand)?;
        Ok(Some(Record {
            line,
            raw_flags,
            raw_operand,
            flags,
            operand,
        }))
    }
}

/// Lazily parse the instruction list. Skipped lines never appear in the output.
pub fn records(src: &Source) -> impl Iterator<Item = Result<Record<'_>>> + '_ {
    src.fields()
        .filter_map(move |(line, pair)| Record::try_parse(src, line, pair).transpose())
}
