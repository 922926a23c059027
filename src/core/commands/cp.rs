use clap::Parser;

use super::{parse_args, Command, CommandContext, CommandError};

#[derive(Debug, Parser)]
#[command(name = "cp", about = "Copy a file or directory into a directory")]
struct CpArgs {
    /// File or directory to copy
    filename: String,

    /// Directory to copy into
    destination: String,

    /// Copy a directory and everything below it
    #[arg(short, long)]
    recursive: bool,
}

#[derive(Clone)]
pub struct CpCommand;

impl Command for CpCommand {
    fn about(&self) -> &'static str {
        "Copy a file or directory into a directory"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
        let Some(args) = parse_args::<CpArgs>("cp", args, ctx.out)? else {
            return Ok(());
        };

        ctx.engine
            .copy(&args.filename, &args.destination, args.recursive)?;
        Ok(())
    }
}
