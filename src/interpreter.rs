use crate::command::{CommandFactory, ExitCode};
use crate::lexer;
use crate::session::Session;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result};
use std::io::Write;

/// Prompt written before every read.
const PROMPT: &str = "myshell> ";

/// First token that terminates the loop without dispatching a command.
const EXIT_COMMAND: &str = "exit";

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports the built-in commands defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// What the loop should do after a line has been processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep reading.
    Continue,
    /// Stop reading and shut down.
    Exit,
}

/// An interactive interpreter for a fixed set of built-in commands.
///
/// The interpreter owns a [`Session`] (working directory plus the bounded
/// command history) and a list of [`CommandFactory`] objects that are queried
/// to create commands by name. See [`Default`] for the built-in table.
///
/// Example
/// ```
/// use myshell::Interpreter;
/// let mut sh = Interpreter::default();
/// let mut out = Vec::new();
/// let code = sh.run("echo", &["hello", "world"], &mut out).unwrap();
/// assert_eq!(code, 0);
/// assert_eq!(out, b"hello world\n");
/// ```
pub struct Interpreter {
    session: Session,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            session: Session::new(),
            commands,
        }
    }

    /// Run a single command invocation by name with arguments.
    ///
    /// Returns the command's exit code, or an error if the name matches no
    /// known command.
    pub fn run(
        &mut self,
        name: &str,
        args: &[&str],
        out: &mut dyn Write,
    ) -> anyhow::Result<ExitCode> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(name, args) {
                return cmd.execute(out, &mut self.session);
            }
        }
        Err(anyhow::anyhow!("Command not found: {}", name))
    }

    /// Process one input line: record it, tokenize it, dispatch it.
    ///
    /// A single trailing newline is stripped. An empty line is discarded
    /// without being recorded or dispatched. Every other line lands in the
    /// history before anything else happens, so `exit` and unrecognized
    /// commands are retained too. A first token of `exit` stops the loop
    /// without invoking any command; an unknown first token is reported as a
    /// single line and the loop keeps going.
    pub fn eval_line(&mut self, line: &str, out: &mut dyn Write) -> anyhow::Result<Control> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        if line.is_empty() {
            return Ok(Control::Continue);
        }

        self.session.history.append(line);

        let tokens = lexer::split_into_tokens(line);
        let Some((&name, args)) = tokens.split_first() else {
            return Ok(Control::Continue);
        };

        if name == EXIT_COMMAND {
            return Ok(Control::Exit);
        }

        match self.run(name, args, out) {
            Ok(_) => Ok(Control::Continue),
            Err(e) => {
                writeln!(out, "{}", e)?;
                Ok(Control::Continue)
            }
        }
    }

    /// The Read-Eval-Print Loop.
    ///
    /// Reads until end of input or an `exit` command. Command failures are
    /// reported by the commands themselves and never terminate the loop.
    pub fn repl(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;
        let mut out = std::io::stdout();

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    if line.is_empty() {
                        continue;
                    }
                    // Feed the editor's recall history as well, so arrow-key
                    // navigation works on a TTY.
                    rl.add_history_entry(line.as_str())?;
                    match self.eval_line(&line, &mut out) {
                        Ok(Control::Exit) => break,
                        Ok(Control::Continue) => {}
                        Err(e) => eprintln!("myshell: {}", e),
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("myshell: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the full built-in table:
    /// `pwd`, `echo`, `cat`, `mkdir`, `rmdir`, `touch`, `wc`, `head`,
    /// `grep` and `history`.
    fn default() -> Self {
        use crate::builtin::*;
        Self::new(vec![
            Box::new(Factory::<Pwd>::default()),
            Box::new(Factory::<Echo>::default()),
            Box::new(Factory::<Cat>::default()),
            Box::new(Factory::<Mkdir>::default()),
            Box::new(Factory::<Rmdir>::default()),
            Box::new(Factory::<Touch>::default()),
            Box::new(Factory::<Wc>::default()),
            Box::new(Factory::<Head>::default()),
            Box::new(Factory::<Grep>::default()),
            Box::new(Factory::<History>::default()),
        ])
    }
}
