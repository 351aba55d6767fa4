//! # The console session object.
//!
//! [`Console`] owns everything one menu program needs for one run: the
//! state registry, the visited-path trail, the configuration defaults, the
//! typed object store, the exit/terminate hooks, and the I/O endpoints.
//! There are no ambient globals: every operation goes through the one
//! session object, which the run loop hands to actions and directors.
//!
//! ## Key responsibilities
//! - register states (`define` / `define_passive`) and track the entry id
//! - expose printing and validated-input primitives to actions
//! - own the object store for cross-state data
//! - hold the exit and terminate hooks until the run loop fires them
//!
//! The run loop itself lives in the `runner` module; [`Console::run`]
//! consumes the console, so a session runs exactly once and its owned I/O
//! is released when the run ends.

use std::fmt::Display;
use std::io::{self, Write};
use std::rc::Rc;
use std::str::FromStr;

use crate::actions::ActionRef;
use crate::core::config::Config;
use crate::core::registry::Registry;
use crate::core::trail::Trail;
use crate::director::Director;
use crate::error::{ConfigError, Flow, Interrupt};
use crate::io::{SourceError, TokenReader, TokenSource};
use crate::require::{self, Requirement};
use crate::restrict;
use crate::store::ObjectStore;

/// Shared handle to an exit/terminate hook.
pub(crate) type HookRef = Rc<dyn Fn(&mut Console)>;

/// One interactive menu session: registry, trail, store, hooks, and I/O.
///
/// ## Example
/// ```no_run
/// use menuflow::{ActionFn, Console, Director};
///
/// let mut cns = Console::new();
/// cns.define(
///     "hello",
///     ActionFn::rc(|c| {
///         c.println("Hello!");
///         Ok(())
///     }),
///     Director::exit(),
/// )
/// .unwrap();
/// cns.run().unwrap();
/// ```
pub struct Console {
    cfg: Config,
    registry: Registry,
    trail: Trail,
    entry: Option<String>,
    terminate_hook: Option<HookRef>,
    exit_hook: Option<HookRef>,
    store: ObjectStore,
    pub(crate) input: Box<dyn TokenSource>,
    pub(crate) out: Box<dyn Write>,
    /// Separate error sink; `None` means errors share the out sink (and
    /// the shared stream is flushed and released only once).
    pub(crate) err: Option<Box<dyn Write>>,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("entry", &self.entry)
            .finish_non_exhaustive()
    }
}

impl Console {
    /// Creates a console over the process's standard streams with default
    /// configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a console over the standard streams with the given
    /// configuration.
    pub fn with_config(cfg: Config) -> Self {
        Self::with_io(
            cfg,
            Box::new(TokenReader::stdin()),
            Box::new(io::stdout()),
            Some(Box::new(io::stderr())),
        )
    }

    /// Creates a console over arbitrary endpoints.
    ///
    /// Pass `err = None` when errors should share the out sink; the
    /// shared stream is then flushed and released only once at the end of
    /// the run.
    pub fn with_io(
        cfg: Config,
        input: Box<dyn TokenSource>,
        out: Box<dyn Write>,
        err: Option<Box<dyn Write>>,
    ) -> Self {
        Self {
            cfg,
            registry: Registry::default(),
            trail: Trail::new(),
            entry: None,
            terminate_hook: None,
            exit_hook: None,
            store: ObjectStore::new(),
            input,
            out,
            err,
        }
    }

    // ---------------------------
    // Registration
    // ---------------------------

    /// Registers a state with an action and a director.
    ///
    /// The first successful registration becomes the entry state unless
    /// one was set explicitly. Returns `&mut Self` for chaining:
    ///
    /// ```
    /// use menuflow::{ActionFn, Console, Director};
    ///
    /// let mut cns = Console::new();
    /// cns.define("a", ActionFn::rc(|_| Ok(())), Director::next("b"))?
    ///     .define("b", ActionFn::rc(|_| Ok(())), Director::exit())?;
    /// # Ok::<(), menuflow::ConfigError>(())
    /// ```
    pub fn define(
        &mut self,
        id: impl Into<String>,
        action: ActionRef,
        director: Director,
    ) -> Result<&mut Self, ConfigError> {
        self.insert_state(id.into(), Some(action), director)
    }

    /// Registers a state with no action of its own.
    ///
    /// The missing action is a no-op: the state only exists to route
    /// through its director.
    pub fn define_passive(
        &mut self,
        id: impl Into<String>,
        director: Director,
    ) -> Result<&mut Self, ConfigError> {
        self.insert_state(id.into(), None, director)
    }

    fn insert_state(
        &mut self,
        id: String,
        action: Option<ActionRef>,
        director: Director,
    ) -> Result<&mut Self, ConfigError> {
        let first = self.registry.insert(id.clone(), action, director)?;
        if first && self.entry.is_none() {
            self.entry = Some(id);
        }
        Ok(self)
    }

    /// Sets the entry state explicitly, overriding the first-registered
    /// default.
    pub fn set_entry_state(&mut self, id: impl Into<String>) {
        self.entry = Some(id.into());
    }

    /// The id the run loop will start at, if known.
    pub fn entry_state(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    // ---------------------------
    // Session accessors
    // ---------------------------

    /// The session configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Mutable access to the session configuration.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.cfg
    }

    /// Replaces the greeting printed at the start of `run`; an empty
    /// string disables it.
    pub fn set_greeting(&mut self, text: impl Into<String>) {
        self.cfg.greeting = text.into();
    }

    /// The currently configured greeting.
    pub fn greeting(&self) -> &str {
        &self.cfg.greeting
    }

    /// Sets the hook invoked exactly once at the very end of every clean
    /// run, on both exit paths.
    pub fn on_exit(&mut self, hook: impl Fn(&mut Console) + 'static) {
        self.exit_hook = Some(Rc::new(hook));
    }

    /// Sets the hook invoked when the run ends through the intentional
    /// termination signal (before the exit hook).
    pub fn on_terminate(&mut self, hook: impl Fn(&mut Console) + 'static) {
        self.terminate_hook = Some(Rc::new(hook));
    }

    /// The visited path so far; its top is the currently executing state.
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// The typed object store shared by all actions of this session.
    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    /// Mutable access to the object store.
    pub fn store_mut(&mut self) -> &mut ObjectStore {
        &mut self.store
    }

    // ---------------------------
    // Output
    // ---------------------------

    /// Writes to the out sink without a line break, flushing immediately
    /// (prompts must be visible before a blocking read).
    pub fn print(&mut self, text: impl Display) {
        let _ = write!(self.out, "{text}");
        let _ = self.out.flush();
    }

    /// Writes a line to the out sink.
    pub fn println(&mut self, text: impl Display) {
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }

    /// Writes a line to the error sink (or the out sink when merged).
    pub fn eprintln(&mut self, text: impl Display) {
        match self.err.as_mut() {
            Some(err) => {
                let _ = writeln!(err, "{text}");
                let _ = err.flush();
            }
            None => {
                let _ = writeln!(self.out, "{text}");
                let _ = self.out.flush();
            }
        }
    }

    /// Flushes both sinks; a merged sink is flushed once.
    pub(crate) fn flush_outputs(&mut self) {
        let _ = self.out.flush();
        if let Some(err) = self.err.as_mut() {
            let _ = err.flush();
        }
    }

    // ---------------------------
    // Validated input
    // ---------------------------

    /// Acquires a value whose producer is `str::parse::<T>`.
    ///
    /// The requirement decides what happens on malformed or rejected
    /// input; exhausted input always terminates the run cleanly.
    pub fn require<T: FromStr>(&mut self, requirement: Requirement<T>) -> Flow<T> {
        require::acquire(
            self.input.as_mut(),
            self.out.as_mut(),
            &|token| token.parse::<T>().ok(),
            requirement,
        )
    }

    /// Acquires a value through a caller-supplied producer.
    ///
    /// This is the hook for token types outside `FromStr`: custom
    /// formats, case-insensitive keywords, big-number crates.
    pub fn require_with<T>(
        &mut self,
        parse: impl Fn(&str) -> Option<T>,
        requirement: Requirement<T>,
    ) -> Flow<T> {
        require::acquire(
            self.input.as_mut(),
            self.out.as_mut(),
            &parse,
            requirement,
        )
    }

    /// Prompts for an integer, retrying until one parses.
    pub fn read_i64(&mut self, prompt: &str) -> Flow<i64> {
        self.print(prompt);
        let requirement = Requirement::retrying(self.cfg.retry_prompt.clone());
        self.require(requirement)
    }

    /// Prompts for an integer in `[lo, hi]`, retrying until satisfied.
    ///
    /// # Panics
    /// Panics if `lo > hi` (author bug, same contract as
    /// [`restrict::in_range`]).
    pub fn read_i64_in(&mut self, prompt: &str, lo: i64, hi: i64) -> Flow<i64> {
        self.print(prompt);
        let requirement = Requirement::retrying(self.cfg.retry_prompt.clone())
            .restrict(restrict::in_range(lo, hi), self.cfg.reject_message.clone());
        self.require(requirement)
    }

    /// Prompts for a floating-point number, retrying until one parses.
    pub fn read_f64(&mut self, prompt: &str) -> Flow<f64> {
        self.print(prompt);
        let requirement = Requirement::retrying(self.cfg.retry_prompt.clone());
        self.require(requirement)
    }

    /// Prompts for `true`/`false` (any case), retrying until one is given.
    pub fn read_bool(&mut self, prompt: &str) -> Flow<bool> {
        self.print(prompt);
        let requirement = Requirement::retrying(self.cfg.retry_prompt.clone());
        self.require_with(parse_bool, requirement)
    }

    /// Prompts for one whitespace-delimited token.
    pub fn read_token(&mut self, prompt: &str) -> Flow<String> {
        self.print(prompt);
        let requirement = Requirement::retrying(self.cfg.retry_prompt.clone());
        self.require_with(|token| Some(token.to_owned()), requirement)
    }

    /// Prompts for the rest of the current input line (or the next line).
    pub fn read_line(&mut self, prompt: &str) -> Flow<String> {
        self.print(prompt);
        match self.input.next_line() {
            Ok(line) => Ok(line),
            Err(SourceError::Exhausted) => Err(Interrupt::Terminated),
            Err(SourceError::Broken(err)) => Err(err.into()),
        }
    }

    // ---------------------------
    // Crate-internal plumbing
    // ---------------------------

    /// Registry lookup for the run loop.
    pub(crate) fn state(&self, id: &str) -> Option<Rc<crate::core::registry::StateDef>> {
        self.registry.get(id)
    }

    /// Records a visit on the trail.
    pub(crate) fn push_trail(&mut self, id: String) {
        self.trail.push(id);
    }

    /// A callable handle to the terminate hook, if set.
    pub(crate) fn terminate_hook(&self) -> Option<HookRef> {
        self.terminate_hook.clone()
    }

    /// A callable handle to the exit hook, if set.
    pub(crate) fn exit_hook(&self) -> Option<HookRef> {
        self.exit_hook.clone()
    }

    /// Director re-prompt: per-director override or the config default.
    pub(crate) fn reprompt_or(&self, over: Option<&str>) -> String {
        over.map(str::to_owned)
            .unwrap_or_else(|| self.cfg.retry_prompt.clone())
    }

    /// Director rejection message: override or the config default.
    pub(crate) fn reject_or(&self, over: Option<&str>) -> String {
        over.map(str::to_owned)
            .unwrap_or_else(|| self.cfg.reject_message.clone())
    }

    #[cfg(test)]
    pub(crate) fn seed_trail(&mut self, ids: &[&str]) {
        for id in ids {
            self.trail.push((*id).to_owned());
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_bool(token: &str) -> Option<bool> {
    if token.eq_ignore_ascii_case("true") {
        Some(true)
    } else if token.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
