//! Styling, restrictors, and the object store in one small sign-up flow.

use menuflow::style::{colorize, AnsiColor, Sgr};
use menuflow::{restrict, ActionFn, Console, Director, Flow, Requirement};

fn ask_name(cns: &mut Console) -> Flow<()> {
    let title = colorize("SIGN-UP", &[Sgr::Bold, Sgr::Fg(AnsiColor::Cyan)]);
    cns.println(title);
    cns.print("Name (3-12 chars): ");

    let min = restrict::min_len(3);
    let max = restrict::max_len(12);
    let name = cns.require_with(
        |t| Some(t.to_owned()),
        Requirement::retrying("Name (3-12 chars): ")
            .restrict(move |s| min(s) && max(s), "Names are 3 to 12 characters."),
    )?;

    let styled = colorize(&name, &[Sgr::Underline, Sgr::Fg(AnsiColor::BrightGreen)]);
    cns.println(format_args!("Save profile for {styled}?"));
    cns.print("yes/no: ");
    cns.store_mut().put("name", name);
    Ok(())
}

fn save(cns: &mut Console) -> Flow<()> {
    let name = cns.store().get::<String>("name")?.clone();
    cns.println(colorize(
        &format!("Saved profile for {name}."),
        &[Sgr::Fg(AnsiColor::Green)],
    ));
    Ok(())
}

fn discard(cns: &mut Console) -> Flow<()> {
    cns.store_mut().remove("name");
    cns.println(colorize("Discarded.", &[Sgr::Fg(AnsiColor::Red)]));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut cns = Console::new();
    cns.set_greeting("");

    cns.define(
        "ask",
        ActionFn::rc(ask_name),
        Director::branch_str(["yes", "no"], ["save", "discard"])?,
    )?
    .define("save", ActionFn::rc(save), Director::exit())?
    .define("discard", ActionFn::rc(discard), Director::exit())?;

    cns.run()?;
    Ok(())
}
