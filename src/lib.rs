//! A tiny interactive line-oriented command interpreter.
//!
//! This crate reads one line at a time, records it into a bounded command
//! history, splits it into tokens and dispatches it to one of a fixed set of
//! built-in commands implemented in Rust, reporting anything else as
//! unrecognized.
//! It is intentionally small and easy to read: there are no pipes, no
//! redirection, no external processes and no scripting.
//!
//! The main entry point is [`Interpreter`], which dispatches commands by name
//! using a set of pluggable factories and drives the interactive loop. The
//! public modules [`command`], [`session`] and [`history`] expose the traits
//! and types the interpreter is built from.

mod builtin;
pub mod command;
pub mod history;
mod interpreter;
pub mod lexer;
pub mod session;

pub use interpreter::{Control, Interpreter};
