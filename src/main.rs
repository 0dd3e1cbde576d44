//! Pipeline simulator CLI.
//!
//! Loads a hex-word program, runs the pipeline for the requested number of
//! cycles, and writes the stage trace next to the input file. The output
//! name derives from the input path: `<program>_forward_out.txt` with
//! forwarding enabled, `<program>_noforward_out.txt` without.

use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::process;

use rv32_pipeline::config::Config;
use rv32_pipeline::core::Processor;
use rv32_pipeline::sim::loader;

/// Command-line arguments for the pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "Cycle-accurate RV32I five-stage pipeline simulator")]
struct Args {
    /// Program file: one 32-bit hex machine-code word per line.
    program: String,

    /// Number of clock cycles to simulate.
    cycles: u64,

    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<String>,
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path),
        None => Config::default(),
    };

    let program = loader::load_program(&args.program);
    println!(
        "[*] {} instructions, {} cycles, forwarding {}",
        program.len(),
        args.cycles,
        if config.general.forwarding {
            "enabled"
        } else {
            "disabled"
        }
    );

    let mut cpu = Processor::new(program, &config);
    cpu.run(args.cycles);

    let suffix = if config.general.forwarding {
        "_forward_out.txt"
    } else {
        "_noforward_out.txt"
    };
    let out_path = format!("{}{}", args.program, suffix);
    let mut out = create(&out_path);
    if let Err(e) = cpu.recorder.write_text(&mut out, args.cycles) {
        eprintln!("[!] FATAL: could not write '{}': {}", out_path, e);
        process::exit(1);
    }

    if config.output.csv {
        let csv_path = format!("{}_trace.csv", args.program);
        let mut out = create(&csv_path);
        if let Err(e) = cpu.recorder.write_csv(&mut out, args.cycles) {
            eprintln!("[!] FATAL: could not write '{}': {}", csv_path, e);
            process::exit(1);
        }
    }

    if config.general.trace_instructions {
        cpu.recorder.print_table(args.cycles);
        cpu.dump_state();
    }

    cpu.stats.print();
}

fn create(path: &str) -> BufWriter<File> {
    let file = File::create(path).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: could not create '{}': {}", path, e);
        process::exit(1);
    });
    BufWriter::new(file)
}
