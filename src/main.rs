use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use miette::{bail, miette, IntoDiagnostic, Result};

use sicld::output::{self, file_message, message, MsgColor, Table};
use sicld::{ingest, resolve, trace, Memory, Registers, Source, Word};

/// Sicld resolves SIC/XE LDA addressing modes against a memory image.
#[derive(Parser)]
#[command(version, args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Quickly provide a memory image to run
    memory: Option<PathBuf>,
    /// Instruction list to go with the memory image
    instructions: Option<PathBuf>,
    #[command(flatten)]
    regs: RegisterArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve every instruction in a file and print the result table
    Run {
        /// Memory image, one `address value` pair per line
        memory: PathBuf,
        /// Instruction list, one `nixbpe operand` pair per line
        instructions: PathBuf,
        #[command(flatten)]
        regs: RegisterArgs,
        /// Produce minimal output, suited for blackbox tests
        #[arg(short, long)]
        minimal: bool,
        /// Print how each instruction was resolved to stderr
        #[arg(short, long, env = "SICLD_TRACE")]
        trace: bool,
    },
    /// Check both input files without resolving anything
    Check {
        /// Memory image to check
        memory: PathBuf,
        /// Instruction list to check
        instructions: PathBuf,
    },
    /// Resolve a single instruction given on the command line
    Resolve {
        /// Six `nixbpe` bits, e.g. 110010
        flags: String,
        /// Hexadecimal address or displacement field
        operand: String,
        /// Memory image to read from; memory is empty otherwise
        #[arg(long)]
        memory: Option<PathBuf>,
        #[command(flatten)]
        regs: RegisterArgs,
    },
    /// Print the loaded memory image in address order
    Dump {
        /// Memory image to print
        memory: PathBuf,
    },
}

#[derive(clap::Args)]
struct RegisterArgs {
    /// Program counter, in hex
    #[arg(long, default_value = "2", value_parser = parse_register)]
    pc: Word,
    /// Base register, in hex
    #[arg(long, default_value = "A", value_parser = parse_register)]
    base: Word,
    /// Index register, in hex
    #[arg(long, default_value = "0", value_parser = parse_register)]
    x: Word,
}

impl From<RegisterArgs> for Registers {
    fn from(args: RegisterArgs) -> Self {
        Registers::new(args.pc, args.base, args.x)
    }
}

fn parse_register(s: &str) -> Result<Word, String> {
    ingest::hex_value(s).map_err(|e| format!("`{s}` is not a hex value: {e}"))
}

fn main() -> miette::Result<()> {
    let args = Args::parse();

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new() //
                .context_lines(sicld::DIAGNOSTIC_CONTEXT_LINES)
                .build(),
        )
    }))?;

    let result = match args.command {
        Some(Command::Run {
            memory,
            instructions,
            regs,
            minimal,
            trace,
        }) => {
            output::set_minimal(minimal);
            output::set_trace(trace);
            if minimal {
                colored::control::set_override(false);
            }
            run(&memory, &instructions, regs.into())
        }
        Some(Command::Check {
            memory,
            instructions,
        }) => check(&memory, &instructions),
        Some(Command::Resolve {
            flags,
            operand,
            memory,
            regs,
        }) => resolve_one(flags, operand, memory.as_deref(), regs.into()),
        Some(Command::Dump { memory }) => dump(&memory),
        None => match (args.memory, args.instructions) {
            (Some(memory), Some(instructions)) => run(&memory, &instructions, args.regs.into()),
            (Some(_), None) => Err(miette!("Missing instruction list. Exiting...")),
            _ => {
                // Fall back to the conventional file names in the working directory
                let memory = Path::new(DEFAULT_MEMORY);
                let instructions = Path::new(DEFAULT_INSTRUCTIONS);
                if memory.is_file() && instructions.is_file() {
                    run(memory, instructions, args.regs.into())
                } else {
                    println!("\n~ sicld v{VERSION} ~");
                    println!("{}", "SIC/XE LDA addressing simulator".bold());
                    println!("{SHORT_INFO}");
                    Ok(())
                }
            }
        },
    };

    if result.is_err() {
        message(MsgColor::Red, "Aborted", "due to the error below");
    }
    result
}

fn read_memory(path: &Path) -> Result<Memory> {
    file_message(MsgColor::Green, "Loading", path);
    let src = Source::read(path)?;
    let mem = ingest::load_memory(&src)?;
    message(MsgColor::Green, "Loaded", &format!("{} words", mem.len()));
    Ok(mem)
}

/// Resolve all records, printing each row as soon as it is known.
/// A bad record stops the run; rows already printed stay printed.
fn run(memory: &Path, instructions: &Path, regs: Registers) -> Result<()> {
    let mem = read_memory(memory)?;

    file_message(MsgColor::Green, "Resolving", instructions);
    let src = Source::read(instructions)?;
    let mut stdout = io::stdout().lock();
    Table::write_header(&mut stdout).into_diagnostic()?;

    let mut count = 0;
    for record in ingest::records(&src) {
        let record = record?;
        let res = resolve(record.flags, record.operand, &mem, &regs);
        trace!("{}", output::describe(&record, &res));
        Table::write_row(&mut stdout, &record, &res).into_diagnostic()?;
        count += 1;
    }
    stdout.flush().into_diagnostic()?;

    message(MsgColor::Green, "Finished", &format!("{count} instructions"));
    Ok(())
}

fn check(memory: &Path, instructions: &Path) -> Result<()> {
    let mem = read_memory(memory)?;

    file_message(MsgColor::Green, "Checking", instructions);
    let src = Source::read(instructions)?;
    let count = ingest::records(&src).try_fold(0usize, |count, record| {
        record.map(|_| count + 1)
    })?;

    message(
        MsgColor::Green,
        "Success",
        &format!("{} words, {count} instructions, no errors found!", mem.len()),
    );
    Ok(())
}

fn resolve_one(flags: String, operand: String, memory: Option<&Path>, regs: Registers) -> Result<()> {
    let mem = match memory {
        Some(path) => read_memory(path)?,
        None => Memory::new(),
    };

    // Reuse the file parser so argument errors get the same diagnostics
    let src = Source::new("<arguments>", format!("{flags} {operand}"));
    let Some(record) = ingest::records(&src).next().transpose()? else {
        bail!("Expected flags and an operand. Exiting...");
    };
    let res = resolve(record.flags, record.operand, &mem, &regs);

    let mut stdout = io::stdout().lock();
    Table::write_header(&mut stdout).into_diagnostic()?;
    Table::write_row(&mut stdout, &record, &res).into_diagnostic()?;
    message(MsgColor::Cyan, "Resolved", &output::describe(&record, &res));
    Ok(())
}

fn dump(memory: &Path) -> Result<()> {
    let mem = read_memory(memory)?;
    let mut stdout = io::stdout().lock();
    for (addr, value) in mem.iter() {
        writeln!(stdout, "{addr:04X} {value:04X}").into_diagnostic()?;
    }
    Ok(())
}

const DEFAULT_MEMORY: &str = "memoria.txt";
const DEFAULT_INSTRUCTIONS: &str = "banderas_dir.txt";

const SHORT_INFO: &str = r"
Resolves the operand an LDA would load, for each nixbpe/operand pair in a file.
Without arguments, `memoria.txt` and `banderas_dir.txt` are used when both exist.
Please use `-h` or `--help` to access the usage instructions.
";

const VERSION: &str = env!("CARGO_PKG_VERSION");
