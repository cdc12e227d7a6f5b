//! RV32I multi-cycle core CLI.
//!
//! This binary is the command-line front-end for the simulator. It performs:
//! 1. **Run:** Load a flat or ELF image, run until the program halts in a self-loop,
//!    then print the exit reason, a register dump and statistics.
//! 2. **Disassemble:** List the words of an image with their RV32I mnemonics.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rv32mc_core::config::Config;
use rv32mc_core::isa::disasm::disassemble;
use rv32mc_core::sim::loader::{self, ImageFormat};
use rv32mc_core::soc::memory::Memory;
use rv32mc_core::{SimResult, Simulator};

/// Bytes per listed instruction word.
const WORD_BYTES: usize = 4;

#[derive(Parser, Debug)]
#[command(
    name = "rv32mc",
    author,
    version,
    about = "Cycle-accurate multi-cycle RV32I core simulator",
    long_about = "Run a bare-metal RV32I program on a multi-cycle core with a request/acknowledge memory bus.\n\nPrograms halt by jumping to themselves (`j .`).\n\nExamples:\n  rv32mc run -f program.bin\n  rv32mc run -f program.elf --config sim.json --trace\n  rv32mc disasm -f program.bin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program image until it halts.
    Run {
        /// Flat binary or ELF32 image to execute.
        #[arg(short, long)]
        file: PathBuf,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the cycle budget.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Log every retired instruction.
        #[arg(long)]
        trace: bool,
    },

    /// Disassemble the words of a program image.
    Disasm {
        /// Flat binary or ELF32 image to list.
        #[arg(short, long)]
        file: PathBuf,

        /// JSON configuration file (memory map used to place ELF segments).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            file,
            config,
            max_cycles,
            trace,
        } => cmd_run(&file, config.as_deref(), max_cycles, trace),
        Commands::Disasm { file, config } => cmd_disasm(&file, config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Installs the `tracing` subscriber; `RUST_LOG` overrides the default level.
fn init_logging(trace: bool) {
    let default = if trace { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>) -> SimResult<Config> {
    path.map_or_else(|| Ok(Config::default()), Config::from_file)
}

/// Runs an image to completion and prints the results.
fn cmd_run(
    file: &Path,
    config: Option<&Path>,
    max_cycles: Option<u64>,
    trace: bool,
) -> SimResult<()> {
    let mut config = load_config(config)?;
    config.general.trace_instructions |= trace;
    if let Some(limit) = max_cycles {
        config.general.max_cycles = limit;
    }
    init_logging(config.general.trace_instructions);

    println!(
        "Configuration: {}",
        serde_json::json!({
            "start_pc": format!("{:#010x}", config.general.start_pc),
            "max_cycles": config.general.max_cycles,
            "memory_base": format!("{:#010x}", config.memory.base),
            "memory_bytes": config.memory.size_bytes,
            "wait_states": config.memory.wait_states,
        })
    );

    let image = loader::load_binary(file)?;
    let (mut sim, loaded) = Simulator::with_image(&config, &image)?;
    println!(
        "[*] {:?} image {} ({} bytes), entry {:#010x}",
        loaded.format,
        file.display(),
        image.len(),
        sim.cpu.pc()
    );

    let outcome = sim.run();
    match &outcome {
        Ok(reason) => println!("\n[*] {reason}"),
        Err(e) => println!("\n[!] {e}"),
    }
    println!("\nRegisters (pc = {:#010x}, state = {}):", sim.cpu.pc(), sim.cpu.state());
    print!("{}", sim.cpu.regs);
    println!();
    sim.stats.print();

    outcome.map(|_| ())
}

/// Prints an address / word / mnemonic listing of an image.
fn cmd_disasm(file: &Path, config: Option<&Path>) -> SimResult<()> {
    let config = load_config(config)?;
    init_logging(false);

    let image = loader::load_binary(file)?;
    let mut mem = Memory::new(
        config.memory.base,
        config.memory.size_bytes,
        config.memory.wait_states,
    );
    let loaded = loader::load_image(&mut mem, &image)?;

    for (addr, len) in &loaded.segments {
        if loaded.format == ImageFormat::Elf {
            println!("\n{addr:#010x}:");
        }
        for offset in (0..*len).step_by(WORD_BYTES) {
            let pc = addr.wrapping_add(offset as u32);
            if let Some(word) = mem.peek(pc) {
                println!("  {pc:#010x}:  {word:08x}  {}", disassemble(word));
            }
        }
    }
    Ok(())
}
