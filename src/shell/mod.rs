use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use rustyline::{config::Configurer, error::ReadlineError, history::FileHistory, Editor};
use tracing::{debug, info, warn};

mod executor;

use crate::{
    core::{
        commands::{CommandContext, CommandError, CommandExecutor},
        config::Config,
        engine::{CommandEngine, PromptConfirm},
        state::WorkingDirectoryStore,
    },
    error::ShellError,
    highlight::SyntaxHighlighter,
    input::ShellCompleter,
    path::PathResolver,
};

use executor::{CommandHandler, Flow};

pub struct Shell {
    pub(crate) editor: Editor<ShellCompleter, FileHistory>,
    pub(crate) engine: CommandEngine,
    pub(crate) executor: CommandExecutor,
    pub(crate) config: Config,
    pub(crate) working_dir: Arc<Mutex<PathBuf>>,
    pub(crate) interrupted: Arc<AtomicBool>,
    pub(crate) highlighter: SyntaxHighlighter,
}

impl Shell {
    pub fn new(config: Config) -> Result<Self, ShellError> {
        let mut engine = build_engine(&config)?;
        let executor = CommandExecutor::new();

        // prompt and path completion both follow the store
        let working_dir = Arc::new(Mutex::new(engine.working_dir().to_path_buf()));
        let shared = Arc::clone(&working_dir);
        engine.store_mut().observe(move |path: &Path| {
            if let Ok(mut dir) = shared.lock() {
                *dir = path.to_path_buf();
            }
        });

        let completer = ShellCompleter::new(executor.names(), Arc::clone(&working_dir));
        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(completer));
        editor.set_auto_add_history(true);
        if let Err(e) = editor.load_history(config.history_file()) {
            debug!("no history loaded: {e}");
        }

        // SIGINT while a command runs ends the session once it finishes
        let interrupted = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&interrupted);
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;

        Ok(Shell {
            editor,
            engine,
            executor,
            config,
            working_dir,
            interrupted,
            highlighter: SyntaxHighlighter::new(),
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        let result = self.command_loop();

        if let Err(e) = self.editor.save_history(self.config.history_file()) {
            if !self.config.quiet() {
                eprintln!("Warning: Couldn't save history: {}", e);
            }
            warn!("failed to save history: {e}");
        }
        info!("shell session ended");
        result
    }

    fn command_loop(&mut self) -> Result<(), ShellError> {
        loop {
            let prompt = self.prompt();
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if let Flow::Exit = self.execute_command(&line) {
                        break;
                    }
                    if self.interrupted.swap(false, Ordering::SeqCst) {
                        info!("interrupted, leaving shell");
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn prompt(&self) -> String {
        let dir = self
            .working_dir
            .lock()
            .map(|dir| dir.clone())
            .unwrap_or_else(|_| self.engine.working_dir().to_path_buf());
        format!("{} > ", dir.display())
    }
}

/// Opens the persisted working directory and wires up the engine.
pub fn build_engine(config: &Config) -> Result<CommandEngine, ShellError> {
    let store = WorkingDirectoryStore::load(config.state_file())?;
    Ok(CommandEngine::new(store, PathResolver::default()))
}

/// Runs a single command non-interactively, as in `burrow cp a.txt data`.
pub fn run_once(config: &Config, args: &[String]) -> Result<(), ShellError> {
    let Some((command, rest)) = args.split_first() else {
        return Ok(());
    };

    let mut engine = build_engine(config)?;
    let executor = CommandExecutor::new();
    dispatch(&mut engine, &executor, command, rest)?;
    Ok(())
}

/// Runs one command against the real terminal.
pub(crate) fn dispatch(
    engine: &mut CommandEngine,
    executor: &CommandExecutor,
    command: &str,
    args: &[String],
) -> Result<(), CommandError> {
    let mut stdout = io::stdout();
    let mut confirm = PromptConfirm::stdio();
    let mut ctx = CommandContext {
        engine,
        out: &mut stdout,
        confirm: &mut confirm,
    };
    executor.execute(&mut ctx, command, args)
}
