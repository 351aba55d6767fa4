//! # menuflow
//!
//! **Menuflow** is a lightweight state-machine framework for interactive,
//! text-based menu programs.
//!
//! A program is a set of named **states**. Each state has an *action*
//! (runs once per visit: print, read validated input, use the object
//! store) and a *director* (decides what happens next). The framework
//! drives execution from the entry state until a terminal director is
//! reached or the program terminates itself intentionally.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │    State     │   │    State     │   │    State     │
//!     │ action + dir │   │ action + dir │   │ action + dir │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Console (session object)                                         │
//! │  - Registry (states by id)                                        │
//! │  - Trail (visited path; top = current state)                      │
//! │  - ObjectStore (typed cross-state data)                           │
//! │  - Config (greeting, default prompts)                             │
//! │  - hooks (on_terminate, on_exit)                                  │
//! │  - I/O endpoints (TokenSource in, out/err sinks)                  │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼
//!                     run loop (Console::run)
//!
//! loop {
//!   ├─► look up trail top in the registry   (UnknownState = fatal)
//!   ├─► execute the state's action
//!   ├─► director terminal? ──► break        (graceful exit path)
//!   ├─► resolve director  ──► next id       (may read via the
//!   │                                        requiring engine)
//!   └─► push next id onto the trail, continue
//! }
//!
//! exit paths:
//!   - Exit director      ─► exit hook
//!   - Interrupt::Terminated (Terminate policy fired, or input
//!     exhausted)         ─► terminate hook, then exit hook
//!   - Interrupt::Fault   ─► RunError returned, no hooks
//! ```
//!
//! ### The requiring engine
//! Every read that must produce a usable value goes through one loop:
//! pull a token, parse it (the *producer*), apply the optional
//! *restrictor*, and on rejection follow the [`FailurePolicy`]: retry
//! forever with a re-prompt, substitute a default, or terminate the run.
//! Branch directors always retry: a menu with no valid answer could never
//! resolve. Exhausted input terminates cleanly under every policy; a
//! broken stream is fatal.
//!
//! ## Features
//! | Area            | Description                                              | Key types / traits                  |
//! |-----------------|----------------------------------------------------------|-------------------------------------|
//! | **States**      | Register actions and transition rules by id.             | [`Console::define`], [`ActionFn`]   |
//! | **Directors**   | Exit / next / back / integer branch / string branch.     | [`Director`]                        |
//! | **Requiring**   | Validate, retry, default, or terminate on bad input.     | [`Requirement`], [`FailurePolicy`]  |
//! | **Restrictors** | Ready-made predicates (ranges, membership, lengths).     | [`restrict`]                        |
//! | **Store**       | Typed key-value data shared between actions.             | [`ObjectStore`]                     |
//! | **Styling**     | Pure ANSI SGR composition without bleed.                 | [`style::colorize`], [`style::Sgr`] |
//! | **Errors**      | Typed wiring and runtime faults, snake_case log labels.  | [`ConfigError`], [`RunError`]       |
//!
//! ## Example
//! ```no_run
//! use menuflow::{ActionFn, Console, Director, Flow};
//!
//! fn add(cns: &mut Console) -> Flow<()> {
//!     let x = cns.read_i64("Enter number #1: ")?;
//!     let y = cns.read_i64("Enter number #2: ")?;
//!     cns.println(format_args!("{x} + {y} = {}", x + y));
//!     Ok(())
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cns = Console::new();
//!     cns.set_greeting("Welcome to the calculator!");
//!     cns.on_exit(|c| c.println("Thanks for using this program!"));
//!
//!     cns.define(
//!         "menu",
//!         ActionFn::rc(|c| {
//!             c.println("1. Addition");
//!             c.println("2. Quit");
//!             c.print("Your choice: ");
//!             Ok(())
//!         }),
//!         Director::branch_int(1, 2, ["add", "quit"])?,
//!     )?
//!     .define("add", ActionFn::rc(add), Director::back(1))?
//!     .define_passive("quit", Director::exit())?;
//!
//!     cns.run()?;
//!     Ok(())
//! }
//! ```
//!
//! Execution is strictly single-threaded and synchronous; the only
//! blocking points are reads from the input source. All callbacks are
//! plain `Rc`-held closures owned by the console.

mod actions;
mod core;
mod director;
mod error;
mod io;
mod require;
mod store;

pub mod restrict;
pub mod style;

// ---- Public re-exports ----

pub use actions::{Action, ActionFn, ActionRef};
pub use core::{Config, Console, Trail};
pub use director::Director;
pub use error::{ConfigError, Flow, Interrupt, RunError, StoreError};
pub use io::{SourceError, TokenReader, TokenSource};
pub use require::{FailurePolicy, Requirement};
pub use store::ObjectStore;
