//! Process-wide settings resolved once at startup.

use crate::config::environment::{vars, Environment};

/// Settings that shape how a handler runs, independent of which handler it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    /// Emit timestamped diagnostic logging (DEBUG=true).
    pub debug: bool,
}

impl Settings {
    pub fn from_env(env: &Environment) -> Self {
        Self {
            debug: env.get(vars::DEBUG) == Some("true"),
        }
    }

    /// Log filter directive matching the debug setting.
    pub fn log_directive(&self) -> &'static str {
        if self.debug {
            "manual_approval=debug"
        } else {
            "manual_approval=warn"
        }
    }
}
