//! # Console configuration.
//!
//! Provides [`Config`], the defaults bundle for a console session.
//!
//! Config is used in two ways:
//! 1. **Console creation**: `Console::with_config(config)`
//! 2. **Engine defaults**: branch directors and the `read_*` sugar fall
//!    back to these messages when no per-call override is given.
//!
//! ## Sentinel values
//! - `greeting = ""` → no greeting is printed at the start of `run`

/// Defaults bundle for a console session.
///
/// ## Field semantics
/// - `greeting`: printed once when `run` starts; skipped if empty
/// - `retry_prompt`: re-prompt written by `RetryForever` acquisitions that
///   did not supply their own (written verbatim, no added newline)
/// - `reject_message`: line printed when a default-message restrictor
///   rejects a parsed value
///
/// All fields are public; construct with struct update syntax over
/// `Config::default()`.
#[derive(Clone, Debug)]
pub struct Config {
    /// Greeting printed once at the start of `run`; empty disables it.
    pub greeting: String,

    /// Default re-prompt for retrying acquisitions.
    ///
    /// Used by branch directors and `read_*` methods unless the director
    /// or call site carries its own prompt.
    pub retry_prompt: String,

    /// Default message for restrictor rejections.
    ///
    /// Used by branch directors and the bounded `read_*` methods unless
    /// overridden.
    pub reject_message: String,
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `greeting` — a short banner explaining how to customize or
    ///   disable it;
    /// - `retry_prompt = "Try again: "`;
    /// - `reject_message = "Invalid option, please try again."`
    fn default() -> Self {
        Self {
            greeting: "Welcome! Customize or disable this message via Config::greeting."
                .to_owned(),
            retry_prompt: "Try again: ".to_owned(),
            reject_message: "Invalid option, please try again.".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_messages_are_non_empty() {
        let cfg = Config::default();
        assert!(!cfg.greeting.is_empty());
        assert!(!cfg.retry_prompt.is_empty());
        assert!(!cfg.reject_message.is_empty());
    }

    #[test]
    fn empty_greeting_is_representable() {
        let cfg = Config {
            greeting: String::new(),
            ..Config::default()
        };
        assert!(cfg.greeting.is_empty());
    }
}
