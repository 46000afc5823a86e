use crate::history::{CommandHistory, HISTORY_CAPACITY};
use std::env as stdenv;
use std::path::PathBuf;

/// Mutable per-run state owned by the interpreter.
///
/// The session contains:
/// - `current_dir`: the working directory, captured at construction and
///   reported by the `pwd` built-in.
/// - `history`: the bounded log of submitted command lines, recorded by the
///   dispatch loop and listed by the `history` built-in.
///
/// Note: fields are public for simplicity to keep the crate small.
#[derive(Debug, Clone)]
pub struct Session {
    /// The working directory command paths are resolved against.
    pub current_dir: PathBuf,
    /// Previously submitted command lines, oldest first.
    pub history: CommandHistory,
}

impl Session {
    /// Capture the current process state into a new `Session` instance.
    ///
    /// `current_dir` is initialized from `std::env::current_dir()` and the
    /// history starts empty with the default capacity.
    pub fn new() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            current_dir,
            history: CommandHistory::new(HISTORY_CAPACITY),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
