//! The three failure policies side by side.
//!
//! Walks through four states, each reading one boolean a different way:
//! plain retrying read, default-substituting requirement, terminating
//! requirement, and an explicitly retrying requirement. Feed it garbage
//! (or close stdin) to watch the policies diverge.

use menuflow::{ActionFn, Console, Director, Flow, Requirement};

fn parse_bool(token: &str) -> Option<bool> {
    match token {
        t if t.eq_ignore_ascii_case("true") => Some(true),
        t if t.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn plain_read(cns: &mut Console) -> Flow<()> {
    cns.println("plain read_bool");
    let value = cns.read_bool("bool: ")?;
    cns.println(value);
    Ok(())
}

fn with_default(cns: &mut Console) -> Flow<()> {
    cns.println("require with UseDefault(false)");
    let value = cns.require_with(parse_bool, Requirement::with_default(false))?;
    cns.println(value);
    Ok(())
}

fn terminating(cns: &mut Console) -> Flow<()> {
    cns.println("require with Terminate");
    let value = cns.require_with(
        parse_bool,
        Requirement::terminating("Invalid input, terminating now."),
    )?;
    cns.println(value);
    Ok(())
}

fn retrying(cns: &mut Console) -> Flow<()> {
    cns.println("require with RetryForever");
    let value = cns.require_with(
        parse_bool,
        Requirement::retrying("Invalid input, try again: "),
    )?;
    cns.println(value);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut cns = Console::new();
    cns.set_greeting("");
    cns.on_terminate(|c| c.println("Terminated!!"));
    cns.on_exit(|c| c.println("Exited!!"));

    cns.define("#0", ActionFn::rc(plain_read), Director::next("#1"))?
        .define("#1", ActionFn::rc(with_default), Director::next("#2"))?
        .define("#2", ActionFn::rc(terminating), Director::next("#3"))?
        .define("#3", ActionFn::rc(retrying), Director::exit())?;

    cns.run()?;
    Ok(())
}
