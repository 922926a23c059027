use clap::Parser;

use super::{parse_args, write_error, Command, CommandContext, CommandError};
use crate::core::engine::RemoveOutcome;

#[derive(Debug, Parser)]
#[command(name = "rm", about = "Remove a file or directory after confirmation")]
struct RmArgs {
    /// File or directory to remove
    filename: String,

    /// Remove a directory and everything below it
    #[arg(short, long)]
    recursive: bool,
}

#[derive(Clone)]
pub struct RmCommand;

impl Command for RmCommand {
    fn about(&self) -> &'static str {
        "Remove a file or directory after confirmation"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
        let Some(args) = parse_args::<RmArgs>("rm", args, ctx.out)? else {
            return Ok(());
        };

        match ctx.engine.remove(&args.filename, args.recursive, ctx.confirm)? {
            RemoveOutcome::Removed => Ok(()),
            RemoveOutcome::Cancelled => writeln!(ctx.out, "Cancel").map_err(write_error),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::commands::tests::{run, setup_engine};
    use crate::core::commands::CommandError;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_rm_declined() {
        let (temp, mut engine) = setup_engine();
        let file = temp.path().join("work/file.txt");
        fs::write(&file, "test").unwrap();

        let output = run(&mut engine, &["rm", "file.txt"], "n\n").unwrap();

        assert_eq!(output, "Cancel\n");
        assert!(file.exists());
    }

    #[test]
    fn test_rm_working_directory() {
        let (temp, mut engine) = setup_engine();

        for target in [".", "..", "/"] {
            let result = run(&mut engine, &["rm", target, "-r"], "y\n");
            assert!(matches!(result, Err(CommandError::SafetyViolation(_))), "{target}");
        }
        assert!(temp.path().join("work").is_dir());
    }
}
