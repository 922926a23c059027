use std::path::PathBuf;

use clap::Parser;

/// Interactive shell for everyday file operations.
///
/// Run without a command to start the shell. Run with a command
/// (`burrow ls -l`) to execute it once against the saved working
/// directory.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "burrow", version)]
pub struct Flags {
    /// Suppress the banner and warnings
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Directory holding the saved working directory, log and history
    #[arg(long, env = "BURROW_STATE_DIR", value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Command to run once instead of starting the shell
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl Flags {
    /// `shell` is accepted as an explicit request for interactive mode.
    pub fn is_interactive(&self) -> bool {
        match self.command.as_slice() {
            [] => true,
            [only] => only == "shell",
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_is_interactive() {
        let flags = Flags::parse_from(["burrow", "-q"]);
        assert!(flags.quiet);
        assert!(flags.is_interactive());

        let flags = Flags::parse_from(["burrow", "shell"]);
        assert!(flags.is_interactive());
    }

    #[test]
    fn test_trailing_command_keeps_its_flags() {
        let flags = Flags::parse_from(["burrow", "--debug", "ls", "-l", "data"]);
        assert!(flags.debug);
        assert!(!flags.is_interactive());
        assert_eq!(flags.command, vec!["ls", "-l", "data"]);
    }
}
