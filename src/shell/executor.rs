use tracing::debug;

use super::dispatch;
use crate::input::tokenize;

pub(crate) enum Flow {
    Continue,
    Exit,
}

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, line: &str) -> Flow;
}

impl CommandHandler for super::Shell {
    /// Runs one input line. A failing command is reported and the session
    /// carries on.
    fn execute_command(&mut self, line: &str) -> Flow {
        let tokens = tokenize(line);
        let Some((command, args)) = tokens.split_first() else {
            return Flow::Continue;
        };

        if command == "exit" || command == "quit" {
            debug!("exit requested");
            return Flow::Exit;
        }

        if let Err(e) = dispatch(&mut self.engine, &self.executor, command, args) {
            eprintln!("{}", self.highlighter.highlight_error(&e.to_string()));
        }
        Flow::Continue
    }
}
