use std::cell::RefCell;
use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;

use crate::{ingest::Record, resolve::Resolution};

/// Print a trace line to stderr, only when tracing is enabled.
#[macro_export]
macro_rules! trace {
    ( $fmt:literal $($tt:tt)* ) => {{
        if $crate::output::is_trace() {
            let s = format!($fmt $($tt)*);
            $crate::output::trace_message(&s);
        }
    }};
}

thread_local! {
    static IS_MINIMAL: RefCell<bool> = const { RefCell::new(false) };
    static IS_TRACE: RefCell<bool> = const { RefCell::new(false) };
}

pub fn set_minimal(new_value: bool) -> bool {
    IS_MINIMAL.with(|value| value.replace(new_value))
}

pub fn is_minimal() -> bool {
    IS_MINIMAL.with(|value| *value.borrow())
}

pub fn set_trace(new_value: bool) -> bool {
    IS_TRACE.with(|value| value.replace(new_value))
}

pub fn is_trace() -> bool {
    IS_TRACE.with(|value| *value.borrow())
}

#[derive(Clone, Copy, Debug)]
pub enum MsgColor {
    Green,
    Cyan,
    Red,
}

/// Status line on stderr, e.g. `     Loading target memory.txt`.
/// Suppressed with `--minimal`.
pub fn message(color: MsgColor, left: &str, right: &str) {
    if !is_minimal() {
        print_status(color, left, right);
    }
}

/// Traces are printed even with `--minimal`, they are only shown on request.
pub fn trace_message(right: &str) {
    print_status(MsgColor::Cyan, "Trace", right);
}

fn print_status(color: MsgColor, left: &str, right: &str) {
    let left = match color {
        MsgColor::Green => left.green(),
        MsgColor::Cyan => left.cyan(),
        MsgColor::Red => left.red(),
    };
    eprintln!("{left:>12} {right}");
}

pub fn file_message(color: MsgColor, left: &str, right: &Path) {
    let right = format!("target {}", right.display());
    message(color, left, &right);
}

const RULE_WIDTH: usize = 44;

/// Fixed-width result table, one row per record.
pub struct Table;

impl Table {
    pub fn write_header<W: Write>(out: &mut W) -> io::Result<()> {
        let rule = "-".repeat(RULE_WIDTH);
        writeln!(out, "{rule}")?;
        writeln!(
            out,
            "{:<8} {:<10} {:<14} {:<8}",
            "nixbpe", "Address", "Mode", "Output"
        )?;
        writeln!(out, "{rule}")
    }

    pub fn write_row<W: Write>(out: &mut W, record: &Record, res: &Resolution) -> io::Result<()> {
        writeln!(
            out,
            "{:<8} {:<10} {:<14} {:04X}",
            record.raw_flags, record.raw_operand, res.mode, res.value
        )
    }
}

/// Human-readable account of how a record was resolved.
pub fn describe(record: &Record, res: &Resolution) -> String {
    let mut s = format!(
        "line {}: {} {} -> {}",
        record.line, record.flags, record.raw_operand, res.mode
    );
    if let Some(target) = res.target {
        s.push_str(&format!(" TA={target:04X}"));
    }
    if let Some(pointer) = res.pointer {
        s.push_str(&format!(" ptr={pointer:04X}"));
    }
    s.push_str(&format!(" value={:04X}", res.value));
    s
}
