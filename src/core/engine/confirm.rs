use std::io::{self, BufRead, Write};

/// Answers yes/no questions before destructive actions.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Asks on `output` and reads one line from `input`. Only `y` agrees;
/// anything else, including end of input, declines.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl PromptConfirm<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{question} y/n ")?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim() == "y")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(input: &str) -> (bool, String) {
        let mut confirm = PromptConfirm::new(input.as_bytes(), Vec::new());
        let answer = confirm.confirm("Remove it?").unwrap();
        (answer, String::from_utf8(confirm.into_output()).unwrap())
    }

    #[test]
    fn test_only_y_confirms() {
        assert_eq!(ask("y\n"), (true, "Remove it? y/n ".to_string()));
        assert!(!ask("yes\n").0);
        assert!(!ask("n\n").0);
        assert!(!ask("").0);
    }
}
