// Decoding
pub mod flags;
pub use flags::{FlagError, Nixbpe};

// Resolution
pub mod memory;
pub use memory::{Memory, Word};
mod resolve;
pub use resolve::{resolve, Mode, Registers, Resolution};

// Input and output
pub mod ingest;
pub use ingest::{load_memory, records, Record, Source};
#[macro_use]
pub mod output;

mod error;

/// Amount of lines to show as context, each side of focus line (line containing span).
pub const DIAGNOSTIC_CONTEXT_LINES: usize = 2;
