use std::{error::Error, fmt, str::FromStr};

/// Number of characters in a textual `nixbpe` field.
pub const FLAG_COUNT: usize = 6;

/// The six addressing bits of a format 3/4 instruction, in encoding order.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Nixbpe {
    /// Indirect
    pub n: bool,
    /// Immediate
    pub i: bool,
    /// Indexed
    pub x: bool,
    /// Base-relative
    pub b: bool,
    /// PC-relative
    pub p: bool,
    /// Extended (format 4)
    pub e: bool,
}

/// Reason a flag string could not be turned into [`Nixbpe`].
#[derive(Debug, PartialEq)]
pub enum FlagError {
    WrongLength { actual: usize },
    InvalidBit { position: usize, found: char },
}

impl Error for FlagError {}

impl fmt::Display for FlagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { actual } => write!(
                f,
                "Expected {} flag bits, found {}",
                FLAG_COUNT, actual
            ),
            Self::InvalidBit { position, found } => write!(
                f,
                "Invalid flag bit `{}` at position {}",
                found,
                position + 1
            ),
        }
    }
}

impl Nixbpe {
    /// Bits as they appear in source, `n` first.
    pub fn bits(&self) -> [bool; FLAG_COUNT] {
        [self.n, self.i, self.x, self.b, self.p, self.e]
    }

    pub fn as_bin_string(&self) -> String {
        self.bits()
            .iter()
            .map(|&bit| if bit { '1' } else { '0' })
            .collect()
    }
}

impl FromStr for Nixbpe {
    type Err = FlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let actual = s.chars().count();
        if actual != FLAG_COUNT {
            return Err(FlagError::WrongLength { actual });
        }

        let mut bits = [false; FLAG_COUNT];
        for (position, ch) in s.chars().enumerate() {
            bits[position] = match ch {
                '0' => false,
                '1' => true,
                found => return Err(FlagError::InvalidBit { position, found }),
            };
        }

        let [n, i, x, b, p, e] = bits;
        Ok(Nixbpe { n, i, x, b, p, e })
    }
}

impl fmt::Display for Nixbpe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_bin_string())
    }
}
