//! Marquee CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use marquee_bytecode::disassemble;
use marquee_compiler::{CompilationUnit, CompileOptions, Registry, Session};
use marquee_grammar::ParseTables;
use marquee_runtime::{CompiledOutput, read_tokens, write_units};
use tracing::{error, info, warn};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    output: Option<PathBuf>,
    strict: bool,
    max_depth: Option<usize>,
    show_help: bool,
    show_version: bool,
    // Listings
    disasm: bool,
    handlers: bool,
    tables: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--strict" => config.strict = true,
            "--disasm" => config.disasm = true,
            "--handlers" => config.handlers = true,
            "--tables" => config.tables = true,
            "--max-depth" => {
                i += 1;
                if i >= args.len() {
                    return Err("--max-depth requires a value".into());
                }
                config.max_depth = Some(
                    args[i]
                        .parse()
                        .map_err(|_| format!("invalid --max-depth value: {}", args[i]))?,
                );
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    return Err("-o requires a file name".into());
                }
                config.output = Some(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

/// Returns whether every unit was acceptable.
fn run(args: Vec<String>) -> Result<bool, Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(true);
    }

    if config.show_version {
        println!("marquee {}", env!("CARGO_PKG_VERSION"));
        return Ok(true);
    }

    if config.tables {
        print_tables();
        if config.files.is_empty() {
            return Ok(true);
        }
    }

    if config.files.is_empty() {
        return Err("no input files (try --help)".into());
    }

    let mut options = if config.strict {
        CompileOptions::strict()
    } else {
        CompileOptions::default()
    };
    if let Some(depth) = config.max_depth {
        options = options.with_max_stack_depth(depth);
    }

    let mut session = Session::new(options);
    let mut units = Vec::new();
    let mut ok = true;

    for file in &config.files {
        let tokens = read_tokens(file)?;
        info!(file = %file.display(), tokens = tokens.len(), "compiling");
        for result in session.compile_script(tokens) {
            match result {
                Ok(unit) => {
                    if !unit.is_clean() {
                        warn!(
                            file = %file.display(),
                            unit = %unit.id,
                            errors = unit.error_count(),
                            "unit compiled with errors"
                        );
                        if config.strict {
                            ok = false;
                        }
                    }
                    units.push(unit);
                }
                Err(e) => {
                    error!(file = %file.display(), "{e}");
                    ok = false;
                }
            }
        }
    }

    for call in session.unresolved_calls(&units) {
        warn!(
            name = %call.name,
            line = call.line,
            column = call.column,
            "call to undefined handler"
        );
    }

    if config.disasm {
        for unit in &units {
            print_unit(unit);
        }
    }

    if config.handlers {
        print_handlers(session.registry());
    }

    if let Some(path) = &config.output {
        let output = CompiledOutput::new(units, session.registry());
        write_units(&output, path)?;
        info!(path = %path.display(), units = output.units.len(), "wrote output");
    }

    Ok(ok)
}

fn print_unit(unit: &CompilationUnit) {
    match &unit.name {
        Some(name) => println!("=== {} ({name}) ===", unit.id),
        None => println!("=== {} ===", unit.id),
    }
    for instruction in disassemble(&unit.script) {
        println!("{instruction}");
    }
    for diagnostic in &unit.diagnostics {
        println!("; {diagnostic}");
    }
    println!();
}

fn print_handlers(registry: &Registry) {
    println!("=== Handlers ===");
    for handler in registry.handlers() {
        println!(
            "{:<24} {} entry={} args={}",
            handler.name, handler.unit, handler.entry, handler.arg_count
        );
    }
    for factory in registry.factories() {
        println!("factory {}", factory.name);
        for method in factory.methods() {
            println!(
                "  {:<22} {} entry={} args={}",
                method.name, method.unit, method.entry, method.arg_count
            );
        }
    }
    println!();
}

fn print_tables() {
    let tables = ParseTables::script();
    println!("=== Parse tables ===");
    println!("{}", tables.stats());
    println!();
}

fn print_help() {
    println!(
        "Marquee - script compiler core

USAGE:
    marquee [OPTIONS] FILES...

ARGUMENTS:
    FILES...    MessagePack token streams to compile, in order

OPTIONS:
    -h, --help         Print help information
    -V, --version      Print version information
    -o, --output FILE  Write compiled units and handler table to FILE
    --strict           Reject mismatched 'end' keywords; fail on flagged units
    --max-depth N      Limit the parser stack to N frames

LISTINGS:
    --disasm           Print a disassembly of every unit
    --handlers         Print the handler table
    --tables           Print parse table statistics

Set RUST_LOG to control log output (default: info)."
    );
}
