use std::collections::BTreeSet;

use rustyline::completion::Pair;

/// Completes the first word of a line against the shell's commands.
#[derive(Clone)]
pub struct CommandCompleter {
    commands: BTreeSet<&'static str>,
}

impl CommandCompleter {
    pub fn new(names: impl IntoIterator<Item = &'static str>) -> Self {
        let mut commands: BTreeSet<_> = names.into_iter().collect();
        commands.extend(["exit", "quit"]);
        Self { commands }
    }

    pub fn is_command(&self, word: &str) -> bool {
        self.commands.contains(word)
    }

    pub fn complete_command(&self, input: &str) -> Vec<Pair> {
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(input))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: format!("{cmd} "),
            })
            .collect()
    }
}
