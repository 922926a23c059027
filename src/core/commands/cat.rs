use clap::Parser;

use super::{parse_args, write_error, Command, CommandContext, CommandError};
use crate::core::engine::ReadMode;

#[derive(Debug, Parser)]
#[command(name = "cat", about = "Print a file")]
struct CatArgs {
    /// File to print
    filename: String,

    /// Print raw bytes instead of UTF-8 text
    #[arg(short, long)]
    bytes: bool,
}

#[derive(Clone)]
pub struct CatCommand;

impl Command for CatCommand {
    fn about(&self) -> &'static str {
        "Print a file"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
        let Some(args) = parse_args::<CatArgs>("cat", args, ctx.out)? else {
            return Ok(());
        };
        let mode = if args.bytes { ReadMode::Binary } else { ReadMode::Text };

        let content = ctx.engine.read(&args.filename, mode)?;
        ctx.out.write_all(content.as_bytes()).map_err(write_error)?;
        ctx.out.flush().map_err(write_error)
    }
}
