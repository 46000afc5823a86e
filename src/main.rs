use myshell::Interpreter;

fn main() -> anyhow::Result<()> {
    Interpreter::default().repl()?;
    Ok(())
}
