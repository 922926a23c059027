use clap::Parser;

use super::{parse_args, write_error, Command, CommandContext, CommandError};

#[derive(Debug, Parser)]
#[command(name = "ls", about = "List directory contents")]
struct LsArgs {
    /// Directory to list
    #[arg(default_value = ".")]
    path: String,

    /// Show permissions, owner, group, size and last access time
    #[arg(short, long)]
    long: bool,
}

#[derive(Clone)]
pub struct LsCommand;

impl Command for LsCommand {
    fn about(&self) -> &'static str {
        "List directory contents"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
        let Some(args) = parse_args::<LsArgs>("ls", args, ctx.out)? else {
            return Ok(());
        };

        for entry in ctx.engine.list(&args.path, args.long)? {
            writeln!(ctx.out, "{entry}").map_err(write_error)?;
        }
        Ok(())
    }
}
