use std::process::ExitCode;

use burrow::core::config::Config;
use burrow::error::ShellError;
use burrow::flags::Flags;
use burrow::highlight::SyntaxHighlighter;
use burrow::shell::{self, Shell};
use clap::Parser;

fn main() -> ExitCode {
    let flags = Flags::parse();

    match run(&flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", SyntaxHighlighter::new().highlight_error(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}

fn run(flags: &Flags) -> Result<(), ShellError> {
    let config = Config::new(flags)?;
    burrow::logging::init(&config)?;

    if !flags.is_interactive() {
        return shell::run_once(&config, &flags.command);
    }

    if !config.quiet() {
        println!("Interactive file shell. Exit: exit, quit");
    }
    let mut shell = Shell::new(config)?;
    shell.run()
}
