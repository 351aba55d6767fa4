//! The classic menu calculator, wired as a menuflow state machine.
//!
//! Shows all four non-terminal director kinds in one program:
//! - the main menu is an integer branch over its options;
//! - "addition" goes back to the menu after running;
//! - "subtraction" jumps to the menu explicitly with `next`;
//! - "multiplication" ends the program;
//! - "fibonacci" chains into a second branch state.

use menuflow::{ActionFn, Console, Director, Flow};

fn add(cns: &mut Console) -> Flow<()> {
    let x = cns.read_i64("Enter number #1: ")?;
    let y = cns.read_i64("Enter number #2: ")?;
    cns.println(format_args!("{x} + {y} = {}", x + y));
    Ok(())
}

fn sub(cns: &mut Console) -> Flow<()> {
    let x = cns.read_i64("Enter number #1: ")?;
    let y = cns.read_i64("Enter number #2: ")?;
    cns.println(format_args!("{x} - {y} = {}", x - y));
    Ok(())
}

fn mul(cns: &mut Console) -> Flow<()> {
    let x = cns.read_i64("Enter number #1: ")?;
    let y = cns.read_i64("Enter number #2: ")?;
    cns.println(format_args!("{x} * {y} = {}", x * y));
    Ok(())
}

fn main_menu(cns: &mut Console) -> Flow<()> {
    cns.println("Hello please choose an option:");
    cns.println("1. Addition");
    cns.println("2. Subtraction");
    cns.println("3. Multiplication");
    cns.println("4. Fibonacci");
    cns.print("Your choice: ");
    Ok(())
}

fn fibo_menu(cns: &mut Console) -> Flow<()> {
    cns.print("Do you want to see all steps (0 for no, 1 for yes): ");
    Ok(())
}

fn fibo_last(cns: &mut Console) -> Flow<()> {
    let x = cns.read_i64_in("Enter number: ", 2, i64::MAX)?;
    let (mut a, mut b) = (0_u128, 1_u128);
    for _ in 2..=x {
        (a, b) = (b, a + b);
    }
    cns.println(format_args!("Fibonacci({x}) = {b}"));
    Ok(())
}

fn fibo_all(cns: &mut Console) -> Flow<()> {
    let x = cns.read_i64_in("Enter number: ", 2, i64::MAX)?;
    let (mut a, mut b) = (0_u128, 1_u128);
    cns.println("Fibonacci(0) = 0");
    cns.println("Fibonacci(1) = 1");
    for i in 2..=x {
        (a, b) = (b, a + b);
        cns.println(format_args!("Fibonacci({i}) = {b}"));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut cns = Console::new();
    cns.set_greeting("");
    cns.on_exit(|c| c.println("Thanks for using this program!"));

    cns.define(
        "#A",
        ActionFn::rc(main_menu),
        Director::branch_int(1, 4, ["#A1", "#A2", "#A3", "#A4"])?,
    )?
    .define("#A1", ActionFn::rc(add), Director::back(1))?
    .define("#A2", ActionFn::rc(sub), Director::next("#A"))?
    .define("#A3", ActionFn::rc(mul), Director::exit())?
    .define(
        "#A4",
        ActionFn::rc(fibo_menu),
        Director::branch_int(0, 1, ["#A4.1", "#A4.2"])?,
    )?
    .define("#A4.1", ActionFn::rc(fibo_last), Director::exit())?
    .define("#A4.2", ActionFn::rc(fibo_all), Director::exit())?;

    cns.run()?;
    Ok(())
}
