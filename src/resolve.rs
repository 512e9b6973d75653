use std::fmt;

use crate::{
    flags::Nixbpe,
    memory::{Memory, Word},
};

/// Register values an LDA is resolved against. Supplied by the caller.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Registers {
    /// Program counter
    pub pc: Word,
    /// Base register
    pub base: Word,
    /// Index register
    pub x: Word,
}

impl Registers {
    pub fn new(pc: Word, base: Word, x: Word) -> Self {
        Registers { pc, base, x }
    }
}

/// Addressing mode selected from the `nixbpe` bits.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Immediate,
    Indirect,
    Extended,
    PcRelative,
    BaseRelative,
    Direct,
}

impl Mode {
    /// First matching row wins. Indexing is applied afterwards, in [`resolve`].
    pub fn select(flags: Nixbpe) -> Mode {
        match (flags.n, flags.i, flags.e, flags.p, flags.b) {
            (false, true, _, _, _) => Mode::Immediate,
            (true, false, _, _, _) => Mode::Indirect,
            // Simple (n=i=1) and n=i=0 share the remaining rows
            (_, _, true, _, _) => Mode::Extended,
            (_, _, false, true, _) => Mode::PcRelative,
            (_, _, false, false, true) => Mode::BaseRelative,
            (_, _, false, false, false) => Mode::Direct,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Immediate => "Immediate",
            Mode::Indirect => "Indirect",
            Mode::Extended => "Extended",
            Mode::PcRelative => "PC-relative",
            Mode::BaseRelative => "Base-relative",
            Mode::Direct => "Direct",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so that width specifiers work in the table
        f.pad(self.label())
    }
}

/// Outcome of resolving one LDA.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Resolution {
    pub mode: Mode,
    /// Effective address. `None` for immediate operands, or if the address overflows.
    pub target: Option<Word>,
    /// Word read at the target before the second dereference.
    pub pointer: Option<Word>,
    /// Value loaded into A.
    pub value: Word,
}

/// Resolve the value an LDA with `flags` and `operand` would load.
///
/// Never reads more than two words and never mutates `mem`.
/// Indirect addressing uses the operand as-is, ignoring `x`, `b`, `p` and `e`.
pub fn resolve(flags: Nixbpe, operand: Word, mem: &Memory, regs: &Registers) -> Resolution {
    let mode = Mode::select(flags);
    match mode {
        Mode::Immediate => Resolution {
            mode,
            target: None,
            pointer: None,
            value: operand,
        },
        Mode::Indirect => {
            let pointer = mem.get(operand);
            Resolution {
                mode,
                target: Some(operand),
                pointer: Some(pointer),
                value: mem.get(pointer),
            }
        }
        Mode::Extended | Mode::PcRelative | Mode::BaseRelative | Mode::Direct => {
            let offset = match mode {
                Mode::PcRelative => regs.pc,
                Mode::BaseRelative => regs.base,
                _ => 0,
            };
            // Nothing can be loaded past `Word::MAX`, so an overflowing address misses
            let target = offset
                .checked_add(operand)
                .and_then(|ta| if flags.x { ta.checked_add(regs.x) } else { Some(ta) });
            Resolution {
                mode,
                target,
                pointer: None,
                value: target.map_or(0, |ta| mem.get(ta)),
            }
        }
    }
}
