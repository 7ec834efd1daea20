//! Display configuration

use serde::{Deserialize, Serialize};

/// What each log line shows besides the message.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show timestamps
    pub time: bool,
    /// Show source location (`file:line`)
    pub source: bool,
    /// Show target module
    pub target: bool,
    /// Use ANSI colors
    pub colors: bool,
    /// Flatten JSON events
    pub flatten: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time: true,
            source: false,
            target: true,
            colors: std::io::IsTerminal::is_terminal(&std::io::stderr()),
            flatten: true,
        }
    }
}

impl DisplayConfig {
    /// Reads `SHAPEGUARD_LOG_TIME`, `SHAPEGUARD_LOG_SOURCE` and
    /// `SHAPEGUARD_LOG_COLORS`.
    pub(super) fn parse_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("SHAPEGUARD_LOG_TIME") {
            self.time = is_truthy(&v);
        }
        if let Some(v) = lookup("SHAPEGUARD_LOG_SOURCE") {
            self.source = is_truthy(&v);
        }
        if let Some(v) = lookup("SHAPEGUARD_LOG_COLORS") {
            self.colors = is_truthy(&v);
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value != "0" && !value.eq_ignore_ascii_case("false")
}
