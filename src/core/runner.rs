//! # The run loop.
//!
//! Drives a configured [`Console`] to completion:
//!
//! ```text
//! run(self):
//!   ├─► print greeting (if non-empty)
//!   ├─► push entry id onto the trail
//!   ├─► loop:
//!   │     ├─ registry lookup        ─► UnknownState = fatal, no hooks
//!   │     ├─ execute action         ─► may raise Interrupt at any depth
//!   │     ├─ director terminal?     ─► break (graceful exit path)
//!   │     ├─ resolve director       ─► may read input, may raise Interrupt
//!   │     └─ push next id, continue
//!   │
//!   ├─ ended by Exit director       ─► exit hook
//!   ├─ ended by Terminated signal   ─► terminate hook, then exit hook
//!   ├─ ended by Fault               ─► return the error, no hooks
//!   └─► flush owned sinks; drop releases them
//! ```
//!
//! The loop has no other terminal condition: a program whose directors
//! never exit and whose input never runs dry runs forever.

use log::debug;

use crate::core::console::Console;
use crate::error::{Flow, Interrupt, RunError};

impl Console {
    /// Runs the state machine to completion.
    ///
    /// Consumes the console: one run per construction, and the owned I/O
    /// endpoints are flushed and released when the run ends.
    ///
    /// Returns `Ok(())` on both clean endings (a terminal state, or the
    /// intentional termination signal). Configuration faults and broken
    /// streams are returned as [`RunError`] with **no** hook invoked.
    pub fn run(mut self) -> Result<(), RunError> {
        let greeting = self.greeting().to_owned();
        if !greeting.is_empty() {
            self.println(greeting);
        }

        let Some(entry) = self.entry_state().map(str::to_owned) else {
            return Err(RunError::NoEntryState);
        };
        debug!("run starting at {entry:?}");
        self.push_trail(entry.clone());

        match self.drive(entry) {
            Ok(()) => {
                debug!("run reached a terminal state");
            }
            Err(Interrupt::Terminated) => {
                debug!("run terminated intentionally");
                if let Some(hook) = self.terminate_hook() {
                    hook(&mut self);
                }
            }
            Err(Interrupt::Fault(err)) => {
                debug!("run aborted: {}", err.as_label());
                return Err(err);
            }
        }

        if let Some(hook) = self.exit_hook() {
            hook(&mut self);
        }
        self.flush_outputs();
        Ok(())
    }

    /// Executes states until a terminal director or an interrupt.
    ///
    /// `current` always equals the top of the trail.
    fn drive(&mut self, mut current: String) -> Flow<()> {
        loop {
            let state = self.state(&current).ok_or_else(|| RunError::UnknownState {
                id: current.clone(),
            })?;
            debug!("visiting {current:?}");

            if let Some(action) = state.action.clone() {
                action.call(self)?;
            }

            if state.director.is_terminal() {
                return Ok(());
            }

            let next = state.director.resolve(self)?;
            debug!("{current:?} -> {next:?}");
            self.push_trail(next.clone());
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io::Cursor;
    use std::rc::Rc;

    use crate::core::console::test_io::SharedBuf;
    use crate::core::{Config, Console};
    use crate::director::Director;
    use crate::error::RunError;
    use crate::io::TokenReader;
    use crate::{ActionFn, Requirement};

    fn scripted(input: &str) -> (Console, SharedBuf) {
        let buf = SharedBuf::default();
        let cfg = Config {
            greeting: String::new(),
            ..Config::default()
        };
        let cns = Console::with_io(
            cfg,
            Box::new(TokenReader::new(Cursor::new(input.as_bytes().to_vec()))),
            Box::new(buf.clone()),
            None,
        );
        (cns, buf)
    }

    /// Scenario A from the calculator wiring: menu branches on 1/2, both
    /// targets are terminal.
    fn define_menu(cns: &mut Console) {
        cns.define(
            "menu",
            ActionFn::rc(|c| {
                c.println("1. Add");
                c.println("2. Sub");
                c.print("Your choice: ");
                Ok(())
            }),
            Director::branch_int(1, 2, ["add", "sub"]).unwrap(),
        )
        .unwrap()
        .define(
            "add",
            ActionFn::rc(|c| {
                c.println("picked add");
                Ok(())
            }),
            Director::exit(),
        )
        .unwrap()
        .define(
            "sub",
            ActionFn::rc(|c| {
                c.println("picked sub");
                Ok(())
            }),
            Director::exit(),
        )
        .unwrap();
    }

    #[test]
    fn menu_branch_runs_to_terminal_state() {
        let (mut cns, buf) = scripted("1\n");
        define_menu(&mut cns);

        let trail_probe = Rc::new(Cell::new(0_usize));
        let probe = trail_probe.clone();
        cns.on_exit(move |c| probe.set(c.trail().len()));

        cns.run().unwrap();
        assert!(buf.contents().contains("picked add"));
        // Visited path was exactly ["menu", "add"].
        assert_eq!(trail_probe.get(), 2);
    }

    #[test]
    fn rejected_menu_input_reprompts_then_branches() {
        let (mut cns, buf) = scripted("9 2\n");
        define_menu(&mut cns);
        cns.run().unwrap();

        let printed = buf.contents();
        assert!(printed.contains("Invalid option, please try again."));
        assert!(printed.contains("Try again: "));
        assert!(printed.contains("picked sub"));
        assert!(!printed.contains("picked add"));
    }

    #[test]
    fn greeting_prints_once_before_the_first_state() {
        let (mut cns, buf) = scripted("");
        cns.config_mut().greeting = "hello there".to_owned();
        cns.define_passive("end", Director::exit()).unwrap();
        cns.run().unwrap();
        assert!(buf.contents().starts_with("hello there\n"));
    }

    #[test]
    fn exhausted_input_fires_terminate_then_exit_exactly_once() {
        // Scenario C: a self-looping state whose action reads with the
        // terminate-on-failure policy from an empty source.
        let (mut cns, _) = scripted("");
        cns.define(
            "loop",
            ActionFn::rc(|c| {
                let _: i64 = c.require(Requirement::terminating("stopping"))?;
                Ok(())
            }),
            Director::next("loop"),
        )
        .unwrap();

        let order = Rc::new(std::cell::RefCell::new(Vec::new()));
        let o1 = order.clone();
        let o2 = order.clone();
        cns.on_terminate(move |_| o1.borrow_mut().push("terminate"));
        cns.on_exit(move |_| o2.borrow_mut().push("exit"));

        cns.run().unwrap();
        assert_eq!(*order.borrow(), ["terminate", "exit"]);
    }

    #[test]
    fn exit_hook_runs_on_the_terminal_path_without_terminate() {
        let (mut cns, _) = scripted("");
        cns.define_passive("end", Director::exit()).unwrap();

        let order = Rc::new(std::cell::RefCell::new(Vec::new()));
        let o1 = order.clone();
        let o2 = order.clone();
        cns.on_terminate(move |_| o1.borrow_mut().push("terminate"));
        cns.on_exit(move |_| o2.borrow_mut().push("exit"));

        cns.run().unwrap();
        assert_eq!(*order.borrow(), ["exit"]);
    }

    #[test]
    fn unknown_state_is_fatal_and_skips_hooks() {
        let (mut cns, _) = scripted("");
        cns.define_passive("start", Director::next("ghost")).unwrap();

        let fired = Rc::new(Cell::new(false));
        let probe = fired.clone();
        cns.on_exit(move |_| probe.set(true));

        let err = cns.run().unwrap_err();
        assert!(matches!(err, RunError::UnknownState { id } if id == "ghost"));
        assert!(!fired.get());
    }

    #[test]
    fn run_without_states_reports_no_entry() {
        let (cns, _) = scripted("");
        assert!(matches!(cns.run().unwrap_err(), RunError::NoEntryState));
    }

    #[test]
    fn back_revisits_without_truncating_history() {
        // menu -> detail -> back(1) -> menu -> exit; trail keeps growing.
        let (mut cns, _) = scripted("1 2\n");
        cns.define(
            "menu",
            ActionFn::rc(|c| {
                c.print("pick: ");
                Ok(())
            }),
            Director::branch_int(1, 2, ["detail", "end"]).unwrap(),
        )
        .unwrap()
        .define_passive("detail", Director::back(1))
        .unwrap()
        .define_passive("end", Director::exit())
        .unwrap();

        let path = Rc::new(std::cell::RefCell::new(Vec::new()));
        let probe = path.clone();
        cns.on_exit(move |c| *probe.borrow_mut() = c.trail().as_slice().to_vec());

        cns.run().unwrap();
        assert_eq!(*path.borrow(), ["menu", "detail", "menu", "end"]);
    }

    #[test]
    fn back_past_history_aborts_the_run() {
        let (mut cns, _) = scripted("");
        cns.define_passive("start", Director::back(5)).unwrap();
        let err = cns.run().unwrap_err();
        assert!(matches!(
            err,
            RunError::HistoryUnderflow { depth: 5, len: 1 }
        ));
    }

    #[test]
    fn actions_pass_data_through_the_store() {
        let (mut cns, buf) = scripted("");
        cns.define(
            "first",
            ActionFn::rc(|c| {
                c.store_mut().put("total", 40_i64 + 2);
                Ok(())
            }),
            Director::next("second"),
        )
        .unwrap()
        .define(
            "second",
            ActionFn::rc(|c| {
                let total = *c.store().get::<i64>("total")?;
                c.println(format_args!("total = {total}"));
                Ok(())
            }),
            Director::exit(),
        )
        .unwrap();

        cns.run().unwrap();
        assert!(buf.contents().contains("total = 42"));
    }

    #[test]
    fn store_misuse_is_a_fatal_fault() {
        let (mut cns, _) = scripted("");
        cns.define(
            "first",
            ActionFn::rc(|c| {
                let _ = c.store().get::<i64>("never-stored")?;
                Ok(())
            }),
            Director::exit(),
        )
        .unwrap();

        assert!(matches!(cns.run().unwrap_err(), RunError::Store(_)));
    }

    #[test]
    fn terminate_policy_skips_remaining_states() {
        let (mut cns, buf) = scripted("oops\n");
        cns.define(
            "ask",
            ActionFn::rc(|c| {
                let _: i64 = c.require(Requirement::terminating("goodbye"))?;
                c.println("never reached");
                Ok(())
            }),
            Director::next("after"),
        )
        .unwrap()
        .define(
            "after",
            ActionFn::rc(|c| {
                c.println("also never reached");
                Ok(())
            }),
            Director::exit(),
        )
        .unwrap();

        cns.run().unwrap();
        let printed = buf.contents();
        assert!(printed.contains("goodbye"));
        assert!(!printed.contains("never reached"));
        assert!(!printed.contains("also never reached"));
    }
}
