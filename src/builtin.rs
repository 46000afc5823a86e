use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::interpreter::Factory;
use crate::session::Session;
use anyhow::{anyhow, bail, Result};
use argh::{EarlyExit, FromArgs};
use std::fs;
use std::io::{BufRead, BufReader, Write};
#[cfg(unix)]
use std::os::unix::fs::DirBuilderExt;

/// Built-in commands known to the interpreter at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in-process without spawning a child process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "echo" or "pwd".
    fn name() -> &'static str;

    /// Executes the command using the provided output sink and session state.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    fn execute(self, out: &mut dyn Write, session: &mut Session) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, out: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        match T::execute(*self, out, session) {
            Ok(x) => Ok(x),
            Err(e) => {
                writeln!(out, "{}", e)?;
                Ok(1)
            }
        }
    }
}

struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        out: &mut dyn Write,
        _session: &mut Session,
    ) -> anyhow::Result<i32> {
        out.write_all(self.output.as_bytes())?;
        Ok(if self.is_error { 1 } else { 0 })
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            Some(match T::from_args(&[name], args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

#[derive(FromArgs)]
/// Print the current working directory to standard output.
pub struct Pwd {}

impl BuiltinCommand for Pwd {
    fn name() -> &'static str {
        "pwd"
    }

    fn execute(self, out: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        writeln!(out, "{}", session.current_dir.to_string_lossy())?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// write the arguments to standard output, separated by spaces and
/// terminated by a newline.
pub struct Echo {
    #[argh(positional, greedy)]
    /// values to print as-is, separated by spaces.
    pub args: Vec<String>,
}

impl BuiltinCommand for Echo {
    fn name() -> &'static str {
        "echo"
    }

    fn execute(self, out: &mut dyn Write, _session: &mut Session) -> Result<ExitCode> {
        writeln!(out, "{}", self.args.join(" "))?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// print file(s) to stdout
pub struct Cat {
    #[argh(positional, greedy)]
    /// files to print, in order.
    pub files: Vec<String>,
}

impl BuiltinCommand for Cat {
    fn name() -> &'static str {
        "cat"
    }

    fn execute(self, out: &mut dyn Write, _session: &mut Session) -> Result<ExitCode> {
        if self.files.is_empty() {
            bail!("Usage: cat <filename>");
        }
        let mut code = 0;
        for fname in &self.files {
            match fs::File::open(fname) {
                Ok(mut f) => {
                    std::io::copy(&mut f, out)?;
                }
                Err(e) => {
                    writeln!(out, "cat: {}: {}", fname, e)?;
                    code = 1;
                }
            }
        }
        Ok(code)
    }
}

#[derive(FromArgs)]
/// create directories
pub struct Mkdir {
    #[argh(positional, greedy)]
    /// directories to create.
    pub dirs: Vec<String>,
}

impl BuiltinCommand for Mkdir {
    fn name() -> &'static str {
        "mkdir"
    }

    fn execute(self, out: &mut dyn Write, _session: &mut Session) -> Result<ExitCode> {
        if self.dirs.is_empty() {
            bail!("Usage: mkdir <dirname>");
        }
        let mut code = 0;
        for dir in &self.dirs {
            let mut builder = fs::DirBuilder::new();
            #[cfg(unix)]
            builder.mode(0o755);
            if let Err(e) = builder.create(dir) {
                writeln!(out, "mkdir: {}: {}", dir, e)?;
                code = 1;
            }
        }
        Ok(code)
    }
}

#[derive(FromArgs)]
/// remove empty directories
pub struct Rmdir {
    #[argh(positional, greedy)]
    /// directories to remove; each must be empty.
    pub dirs: Vec<String>,
}

impl BuiltinCommand for Rmdir {
    fn name() -> &'static str {
        "rmdir"
    }

    fn execute(self, out: &mut dyn Write, _session: &mut Session) -> Result<ExitCode> {
        if self.dirs.is_empty() {
            bail!("Usage: rmdir <dirname>");
        }
        let mut code = 0;
        for dir in &self.dirs {
            if let Err(e) = fs::remove_dir(dir) {
                writeln!(out, "rmdir: {}: {}", dir, e)?;
                code = 1;
            }
        }
        Ok(code)
    }
}

#[derive(FromArgs)]
/// create files if they do not already exist
pub struct Touch {
    #[argh(positional, greedy)]
    /// files to create.
    pub files: Vec<String>,
}

impl BuiltinCommand for Touch {
    fn name() -> &'static str {
        "touch"
    }

    fn execute(self, out: &mut dyn Write, _session: &mut Session) -> Result<ExitCode> {
        if self.files.is_empty() {
            bail!("Usage: touch <filename>");
        }
        let mut code = 0;
        for fname in &self.files {
            // Append mode creates the file when absent without truncating
            // existing content.
            match fs::OpenOptions::new().append(true).create(true).open(fname) {
                Ok(f) => drop(f),
                Err(e) => {
                    writeln!(out, "touch: {}: {}", fname, e)?;
                    code = 1;
                }
            }
        }
        Ok(code)
    }
}

#[derive(argh::FromArgs)]
/// count lines, words and bytes in a file
pub struct Wc {
    #[argh(positional)]
    /// file to count.
    pub file: Option<String>,
}

impl BuiltinCommand for Wc {
    fn name() -> &'static str {
        "wc"
    }

    fn execute(self, out: &mut dyn Write, _session: &mut Session) -> Result<ExitCode> {
        let Some(fname) = self.file else {
            bail!("Usage: wc <filename>");
        };
        let data = fs::read(&fname).map_err(|e| anyhow!("wc: {}: {}", fname, e))?;
        // A line is a newline byte; a word is a maximal run of bytes outside
        // {space, newline, tab}.
        let lines = data.iter().filter(|&&b| b == b'\n').count();
        let words = data
            .split(|&b| b == b' ' || b == b'\n' || b == b'\t')
            .filter(|w| !w.is_empty())
            .count();
        writeln!(out, "{} {} {} {}", lines, words, data.len(), fname)?;
        Ok(0)
    }
}

const HEAD_LINES: usize = 10;

#[derive(argh::FromArgs)]
/// print the first lines of a file
pub struct Head {
    #[argh(positional)]
    /// file to read.
    pub file: Option<String>,
}

impl BuiltinCommand for Head {
    fn name() -> &'static str {
        "head"
    }

    fn execute(self, out: &mut dyn Write, _session: &mut Session) -> Result<ExitCode> {
        let Some(fname) = self.file else {
            bail!("Usage: head <filename>");
        };
        let f = fs::File::open(&fname).map_err(|e| anyhow!("head: {}: {}", fname, e))?;
        let mut reader = BufReader::new(f);
        let mut line = String::new();
        for _ in 0..HEAD_LINES {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            // Lines keep their trailing newline; the last line of the file
            // may not have one and is printed as-is.
            write!(out, "{}", line)?;
        }
        Ok(0)
    }
}

#[derive(argh::FromArgs)]
/// print lines of a file containing a pattern
pub struct Grep {
    #[argh(positional)]
    /// the substring to search for, matched literally.
    pub pattern: Option<String>,

    #[argh(positional)]
    /// file to search.
    pub file: Option<String>,
}

impl BuiltinCommand for Grep {
    fn name() -> &'static str {
        "grep"
    }

    fn execute(self, out: &mut dyn Write, _session: &mut Session) -> Result<ExitCode> {
        let (Some(pattern), Some(fname)) = (self.pattern, self.file) else {
            bail!("Usage: grep <pattern> <filename>");
        };
        let f = fs::File::open(&fname).map_err(|e| anyhow!("grep: {}: {}", fname, e))?;
        let mut reader = BufReader::new(f);
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            if line.contains(&pattern) {
                write!(out, "{}", line)?;
            }
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print previously entered command lines, oldest first.
pub struct History {}

impl BuiltinCommand for History {
    fn name() -> &'static str {
        "history"
    }

    fn execute(self, out: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        for (n, line) in session.history.iter() {
            writeln!(out, "{} {}", n, line)?;
        }
        Ok(0)
    }
}
