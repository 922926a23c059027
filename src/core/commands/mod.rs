use std::collections::BTreeMap;
use std::io::Write;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::debug;

mod archive;
mod cat;
mod cd;
mod cp;
mod error;
mod ls;
mod mv;
mod rm;

pub use archive::ZipCommand;
pub use cat::CatCommand;
pub use cd::CdCommand;
pub use cp::CpCommand;
pub use error::CommandError;
pub use ls::LsCommand;
pub use mv::MvCommand;
pub use rm::RmCommand;

use crate::core::engine::{CommandEngine, Confirm};

/// Everything a command may touch while it runs.
pub struct CommandContext<'a> {
    pub engine: &'a mut CommandEngine,
    pub out: &'a mut dyn Write,
    pub confirm: &'a mut dyn Confirm,
}

pub trait Command {
    /// One-line description shown by `help`.
    fn about(&self) -> &'static str;
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Ls(LsCommand),
    Cat(CatCommand),
    Cd(CdCommand),
    Cp(CpCommand),
    Mv(MvCommand),
    Rm(RmCommand),
    Zip(ZipCommand),
}

impl Command for CommandType {
    fn about(&self) -> &'static str {
        match self {
            CommandType::Ls(cmd) => cmd.about(),
            CommandType::Cat(cmd) => cmd.about(),
            CommandType::Cd(cmd) => cmd.about(),
            CommandType::Cp(cmd) => cmd.about(),
            CommandType::Mv(cmd) => cmd.about(),
            CommandType::Rm(cmd) => cmd.about(),
            CommandType::Zip(cmd) => cmd.about(),
        }
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
        match self {
            CommandType::Ls(cmd) => cmd.execute(ctx, args),
            CommandType::Cat(cmd) => cmd.execute(ctx, args),
            CommandType::Cd(cmd) => cmd.execute(ctx, args),
            CommandType::Cp(cmd) => cmd.execute(ctx, args),
            CommandType::Mv(cmd) => cmd.execute(ctx, args),
            CommandType::Rm(cmd) => cmd.execute(ctx, args),
            CommandType::Zip(cmd) => cmd.execute(ctx, args),
        }
    }
}

#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("ls", CommandType::Ls(LsCommand));
        commands.insert("cat", CommandType::Cat(CatCommand));
        commands.insert("cd", CommandType::Cd(CdCommand));
        commands.insert("cp", CommandType::Cp(CpCommand));
        commands.insert("mv", CommandType::Mv(MvCommand));
        commands.insert("rm", CommandType::Rm(RmCommand));
        commands.insert("zip", CommandType::Zip(ZipCommand));

        Self { commands }
    }

    pub fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        command: &str,
        args: &[String],
    ) -> Result<(), CommandError> {
        debug!(command, ?args, "dispatching");
        if command == "help" {
            return self.print_help(ctx.out);
        }

        match self.commands.get(command) {
            Some(cmd) => cmd.execute(ctx, args),
            None => Err(CommandError::UnknownCommand(command.to_string()).logged()),
        }
    }

    pub fn is_builtin(&self, command: &str) -> bool {
        command == "help" || self.commands.contains_key(command)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied().chain(["help"])
    }

    fn print_help(&self, out: &mut dyn Write) -> Result<(), CommandError> {
        for (name, cmd) in &self.commands {
            writeln!(out, "  {:<6} {}", name, cmd.about()).map_err(write_error)?;
        }
        writeln!(out, "  {:<6} {}", "exit", "Leave the shell (also: quit)").map_err(write_error)?;
        writeln!(out, "\nRun '<command> --help' for details.").map_err(write_error)
    }
}

/// Parses a command's arguments with clap. `--help` is printed to `out`
/// and yields `None`.
fn parse_args<T: Parser>(
    name: &str,
    args: &[String],
    out: &mut dyn Write,
) -> Result<Option<T>, CommandError> {
    let argv = std::iter::once(name).chain(args.iter().map(String::as_str));
    match T::try_parse_from(argv) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(out, "{}", err.render()).map_err(write_error)?;
            Ok(None)
        }
        Err(err) => {
            let message = err.render().to_string().trim_end().to_string();
            Err(CommandError::InvalidArguments(message).logged())
        }
    }
}

fn write_error(err: std::io::Error) -> CommandError {
    CommandError::io("failed to write output", err)
}
