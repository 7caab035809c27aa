//! Crypto-coprocessor simulator CLI.
//!
//! Loads a program image (or the built-in single-block demo), runs it under
//! the selected execution model, and reports the final architectural state.
//!
//! # Usage
//!
//! * `cryptcore` — run the built-in demo under both models and compare.
//! * `cryptcore --program prog.hex --data data.hex --model pipeline`
//! * `cryptcore --trace` — per-cycle pipeline stage diagram on stderr.

use clap::{Parser, ValueEnum};
use std::process;

use cryptcore::config::Config;
use cryptcore::core::{Memory, PipelinedCpu, SingleCycleCpu};
use cryptcore::sim::{loader, programs, run_pipelined, run_single_cycle, RunOutcome, StopReason};

/// Which execution model(s) to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Model {
    /// Single-cycle reference model only.
    Single,
    /// 5-stage pipelined model only.
    Pipeline,
    /// Run both and compare final architectural state.
    Both,
}

/// Command-line arguments for the simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "Cycle-accurate crypto-coprocessor simulator")]
struct Args {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Program image (hex words, one per line). Defaults to the built-in
    /// single-block encrypt/decrypt demo.
    #[arg(short, long)]
    program: Option<String>,

    /// Initial data-memory image (hex words, one per line).
    #[arg(short, long)]
    data: Option<String>,

    /// Execution model to run.
    #[arg(short, long, value_enum, default_value_t = Model::Both)]
    model: Model,

    /// Emit the per-cycle pipeline stage diagram on stderr.
    #[arg(short, long)]
    trace: bool,

    /// Override the configured maximum cycle budget.
    #[arg(long)]
    max_cycles: Option<u64>,
}

fn main() {
    let args = Args::parse();

    let mut config = match args.config.as_deref() {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[!] {e}");
                process::exit(1);
            }
        },
        None => Config::default(),
    };
    if args.trace {
        config.general.trace_instructions = true;
    }
    if let Some(max) = args.max_cycles {
        config.general.max_cycles = max;
    }

    let mem = match build_memory(&args) {
        Ok(mem) => mem,
        Err(e) => {
            eprintln!("[!] {e}");
            process::exit(1);
        }
    };

    let max_cycles = config.general.max_cycles;

    match args.model {
        Model::Single => {
            let mut cpu = SingleCycleCpu::new(mem);
            let outcome = run_single_cycle(&mut cpu, max_cycles);
            report("single-cycle", &outcome);
            dump_state(cpu.state(), &cpu.mem);
            exit_for(&outcome);
        }
        Model::Pipeline => {
            let mut cpu = PipelinedCpu::new(mem, &config);
            let outcome = run_pipelined(&mut cpu, max_cycles);
            report("pipelined", &outcome);
            dump_state(cpu.state(), &cpu.mem);
            cpu.stats.print();
            exit_for(&outcome);
        }
        Model::Both => {
            let mut single = SingleCycleCpu::new(mem.clone());
            let mut pipe = PipelinedCpu::new(mem, &config);

            let single_outcome = run_single_cycle(&mut single, max_cycles);
            let pipe_outcome = run_pipelined(&mut pipe, max_cycles);

            report("single-cycle", &single_outcome);
            report("pipelined", &pipe_outcome);

            println!("\nFinal state (pipelined):");
            dump_state(pipe.state(), &pipe.mem);
            pipe.stats.print();

            let agree = states_agree(&single, &pipe);
            println!(
                "\nModel agreement: {}",
                if agree { "OK" } else { "MISMATCH" }
            );
            if !agree {
                println!("Final state (single-cycle):");
                dump_state(single.state(), &single.mem);
                process::exit(1);
            }
            exit_for(&pipe_outcome);
        }
    }
}

fn build_memory(args: &Args) -> Result<Memory, loader::LoadError> {
    let mut mem = Memory::new();

    match &args.program {
        Some(path) => {
            let program = loader::read_image(path)?;
            loader::load_program(&mut mem, &program)?;
            if let Some(data_path) = &args.data {
                let data = loader::read_image(data_path)?;
                loader::load_data(&mut mem, &data)?;
            }
        }
        None => {
            println!("[*] No program given; running the single-block demo.");
            programs::single_block_program(&mut mem);
        }
    }

    Ok(mem)
}

fn report(model: &str, outcome: &RunOutcome) {
    match outcome.reason {
        StopReason::Halted => {
            println!("[*] {model}: halted after {} cycles", outcome.cycles);
        }
        StopReason::CycleBudgetExhausted => {
            println!(
                "[!] {model}: cycle budget ({}) exhausted before halt",
                outcome.cycles
            );
        }
        StopReason::Faulted(fault) => {
            println!(
                "[!] {model}: fault after {} cycles: {fault}",
                outcome.cycles
            );
        }
    }
}

fn dump_state(state: &cryptcore::core::ArchState, mem: &Memory) {
    println!("PC = {}", state.pc);
    println!("K0 = {:#06x}  K1 = {:#06x}", state.k0, state.k1);
    state.regs.dump();
    for addr in 0..4 {
        if let Ok(word) = mem.read_data(addr) {
            println!("data[{addr}] = {word:#06x}");
        }
    }
}

fn states_agree(single: &SingleCycleCpu, pipe: &PipelinedCpu) -> bool {
    let a = single.state();
    let b = pipe.state();
    if (a.k0, a.k1) != (b.k0, b.k1) {
        return false;
    }
    for r in 0..8 {
        if a.regs.read(r) != b.regs.read(r) {
            return false;
        }
    }
    for addr in 0..cryptcore::isa::DATA_MEM_SIZE as u16 {
        if single.read_memory_word(addr).ok() != pipe.read_memory_word(addr).ok() {
            return false;
        }
    }
    true
}

fn exit_for(outcome: &RunOutcome) {
    if !outcome.halted() {
        process::exit(1);
    }
}
