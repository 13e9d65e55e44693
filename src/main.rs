//! N1-5A Emulator - CLI Entry Point
//!
//! Commands:
//! - `n15a-emu run <program>` - Boot a program and step it for N ticks
//! - `n15a-emu list <program>` - Parse a program and print the listing
//! - `n15a-emu panel <program>` - Interactive front panel

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "n15a-emu")]
#[command(version = "0.1.0")]
#[command(about = "An emulator of the N1-5A 1-bit NOR-logic computer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Boot a program and step it for a fixed number of ticks
    Run {
        /// Path to the program text file
        program: String,
        /// Number of ticks to execute (default: 64)
        #[arg(short, long, default_value = "64")]
        ticks: u64,
        /// Initial input switch levels as a bit string, IN_0 first
        /// (e.g. `1010000`)
        #[arg(short, long)]
        inputs: Option<String>,
        /// Echo each trace line while stepping
        #[arg(long)]
        trace: bool,
        /// Append the full execution history to this file afterwards
        #[arg(short, long)]
        log: Option<String>,
        /// Print the final state as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Parse a program file and print the annotated listing
    List {
        /// Path to the program text file
        program: String,
    },
    /// Interactive front panel: power switch, inputs, lamps, trace
    #[cfg(feature = "tui")]
    Panel {
        /// Path to the program text file
        program: String,
        /// Clock rate in Hz while powered on
        #[arg(short, long, default_value = "1")]
        clock: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            program,
            ticks,
            inputs,
            trace,
            log,
            json,
        }) => {
            run_program(&program, ticks, inputs.as_deref(), trace, log.as_deref(), json);
        }
        Some(Commands::List { program }) => {
            list_program(&program);
        }
        #[cfg(feature = "tui")]
        Some(Commands::Panel { program, clock }) => {
            panel(&program, clock);
        }
        None => {
            println!("N1-5A Emulator v0.1.0");
            println!("A 1-bit NOR-logic computer emulator");
            println!();
            println!("Use --help for available commands");
            println!();
            demo_logic_primitives();
        }
    }
}

fn read_program(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to read {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

fn run_program(
    path: &str,
    ticks: u64,
    inputs: Option<&str>,
    trace: bool,
    log: Option<&str>,
    json: bool,
) {
    use n15a::Machine;

    let source = read_program(path);
    let mut machine = Machine::new();

    if let Some(levels) = inputs {
        for (index, c) in levels.chars().enumerate() {
            machine.set_input(index, c == '1');
        }
    }

    let diagnostics = machine.power_on(&source);
    for diagnostic in &diagnostics {
        eprintln!("warning: {}", diagnostic);
    }

    for tick in 0..ticks {
        match machine.step(tick) {
            Ok(entry) => {
                if trace {
                    println!("{}", entry);
                }
            }
            Err(signal) => {
                // Unreachable here since nothing powers the machine off
                // mid-run, but the signal is part of the API contract.
                eprintln!("{}", signal);
                break;
            }
        }
    }

    machine.power_off();

    let snap = machine.snapshot();
    if json {
        match serde_json::to_string_pretty(&snap) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Failed to serialize snapshot: {}", e),
        }
    } else {
        if trace {
            println!();
        }
        println!("Ticks: {}", ticks);
        println!("Bank:  {}   PC: {}", snap.bank, snap.pc);
        println!("ACC:   {}   RAM: {}", snap.acc, snap.ram);
        println!("OUT0:  {}   OUT1: {}", snap.outputs[0], snap.outputs[1]);
    }

    if let Some(log_path) = log {
        if let Err(e) = append_log(log_path, &machine.export_trace()) {
            eprintln!("Failed to write log {}: {}", log_path, e);
            std::process::exit(1);
        }
        println!("Log appended to {}", log_path);
    }
}

fn append_log(path: &str, rendered: &str) -> std::io::Result<()> {
    use std::io::Write;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    file.write_all(rendered.as_bytes())
}

fn list_program(path: &str) {
    use n15a::{listing, Machine};

    let source = read_program(path);
    let mut machine = Machine::new();
    let diagnostics = machine.load_program(&source);

    print!("{}", listing(&machine.banks));

    if !diagnostics.is_empty() {
        eprintln!();
        for diagnostic in &diagnostics {
            eprintln!("warning: {}", diagnostic);
        }
    }
}

#[cfg(feature = "tui")]
fn panel(path: &str, clock: u64) {
    use n15a::run_panel;

    let source = read_program(path);

    if let Err(e) = run_panel(source, clock.max(1)) {
        eprintln!("Panel error: {}", e);
        std::process::exit(1);
    }
}

fn demo_logic_primitives() {
    use n15a::{decode, Bit, Word5};
    use n15a::prog::mnemonic;

    println!("--- NOR gate (the machine's only native gate) ---");
    for a in Bit::ALL {
        for b in Bit::ALL {
            println!("  NOR({}, {}) = {}", a, b, a.nor(b));
        }
    }
    println!();

    println!("--- 5-bit instruction words ---");
    for text in ["00_000", "01_000", "10_011", "11_110"] {
        match Word5::parse(text) {
            Ok(word) => println!("  {} -> {}", word, mnemonic(&decode(word))),
            Err(e) => println!("  {}: {}", text, e),
        }
    }
}
