use clap::Parser;

use super::{parse_args, Command, CommandContext, CommandError};

#[derive(Debug, Parser)]
#[command(name = "mv", about = "Move a file or directory into a directory")]
struct MvArgs {
    /// File or directory to move
    filename: String,

    /// Directory to move into
    destination: String,
}

#[derive(Clone)]
pub struct MvCommand;

impl Command for MvCommand {
    fn about(&self) -> &'static str {
        "Move a file or directory into a directory"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
        let Some(args) = parse_args::<MvArgs>("mv", args, ctx.out)? else {
            return Ok(());
        };

        ctx.engine.move_entry(&args.filename, &args.destination)?;
        Ok(())
    }
}
