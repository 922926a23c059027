mod completer;
mod tokenizer;

pub use completer::ShellCompleter;
pub use tokenizer::tokenize;
