use clap::Parser;

use super::{parse_args, Command, CommandContext, CommandError};

#[derive(Debug, Parser)]
#[command(name = "cd", about = "Change the working directory")]
struct CdArgs {
    /// Target directory; `..` is the parent, `~` the home directory
    #[arg(default_value = "~")]
    path: String,
}

#[derive(Clone)]
pub struct CdCommand;

impl Command for CdCommand {
    fn about(&self) -> &'static str {
        "Change the working directory"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
        let Some(args) = parse_args::<CdArgs>("cd", args, ctx.out)? else {
            return Ok(());
        };

        ctx.engine.change_directory(&args.path)?;
        Ok(())
    }
}
