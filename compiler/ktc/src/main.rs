//! ktc: parse source files and report what the parser found.

mod args;
mod commands;
mod logging;

use args::{Command, Invocation};

fn main() {
    let raw: Vec<String> = std::env::args().skip(1).collect();

    let invocation = match args::parse_args(&raw) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    logging::init_tracing(invocation.options.log_tree);

    let Invocation { command, options } = invocation;
    let ok = match command {
        Command::Help => {
            print_usage();
            true
        }
        Command::Parse(paths) | Command::Check(paths) => commands::run(&paths, &options),
    };

    if !ok {
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: ktc <command> [options] <files...>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  parse    Print the syntax tree of each file, then its errors");
    eprintln!("  check    Report errors only");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --tree                      Print syntax trees (implied by parse)");
    eprintln!("  --tokens                    Print the token stream");
    eprintln!("  --script                    Parse files as scripts");
    eprintln!("  --format <terminal|json>    Diagnostic format (default: terminal)");
    eprintln!("                              json moves tree and token dumps to stderr");
    eprintln!("  --color <auto|always|never> Terminal colors (default: auto)");
    eprintln!("  --log-tree                  Hierarchical log output");
    eprintln!();
    eprintln!("Logging is controlled by KTC_LOG or RUST_LOG, e.g. KTC_LOG=kt_parse=debug");
}
