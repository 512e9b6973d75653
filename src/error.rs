use std::{num::ParseIntError, ops::Range};

use miette::{miette, LabeledSpan, Report, Severity};

use crate::{flags::FlagError, ingest::Source};

// Ingestion errors

pub fn ingest_bad_hex(span: Range<usize>, src: &Source, e: ParseIntError) -> Report {
    miette!(
        severity = Severity::Error,
        code = "ingest::bad_hex",
        help = "values are unsigned hexadecimal, optionally prefixed with 0x",
        labels = vec![LabeledSpan::at(span, "incorrect literal")],
        "Encountered an invalid hex literal: {e}",
    )
    .with_source_code(src.named())
}

pub fn ingest_bad_flags(span: Range<usize>, src: &Source, e: FlagError) -> Report {
    let label = match e {
        FlagError::WrongLength { .. } => "expected exactly 6 bits",
        FlagError::InvalidBit { .. } => "not a 0 or 1",
    };
    miette!(
        severity = Severity::Error,
        code = "ingest::flags",
        help = "flags are written as six 0/1 characters in nixbpe order, e.g. 110010",
        labels = vec![LabeledSpan::at(span, label)],
        "{e}",
    )
    .with_source_code(src.named())
}
