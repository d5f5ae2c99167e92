use serde::{Deserialize, Serialize};

/// TermBridge configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermBridgeConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Console session defaults
    #[serde(default)]
    pub console: ConsoleDefaults,
}

/// Global configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Defaults applied to a console session when the command line leaves them out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleDefaults {
    /// Serial port speed
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    /// Enable CTS/RTS flow control
    #[serde(default)]
    pub hw_flow_control: bool,
    /// Drive RTS and DTR explicitly once the port is open
    #[serde(default = "default_set_control_lines")]
    pub set_control_lines: bool,
    /// Drive RTS and DTR high instead of low
    #[serde(default)]
    pub invert_control_lines: bool,
    /// Only print device output, never forward local input
    #[serde(default)]
    pub no_input: bool,
    /// Line timestamp format, empty to disable
    #[serde(default = "default_timestamp")]
    pub timestamp: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_baud_rate() -> u32 {
    115_200
}

fn default_set_control_lines() -> bool {
    true
}

fn default_timestamp() -> String {
    "StampMilli".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for ConsoleDefaults {
    fn default() -> Self {
        Self {
            baud_rate: default_baud_rate(),
            hw_flow_control: false,
            set_control_lines: default_set_control_lines(),
            invert_control_lines: false,
            no_input: false,
            timestamp: default_timestamp(),
        }
    }
}

/// Settings for one console session, fixed before the port is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub port: String,
    pub baud_rate: u32,
    pub hw_flow_control: bool,
    pub set_control_lines: bool,
    pub invert_control_lines: bool,
    pub no_input: bool,
    pub timestamp: String,
}

impl SessionConfig {
    /// Session for `port` using the given defaults.
    pub fn from_defaults(port: impl Into<String>, defaults: &ConsoleDefaults) -> Self {
        Self {
            port: port.into(),
            baud_rate: defaults.baud_rate,
            hw_flow_control: defaults.hw_flow_control,
            set_control_lines: defaults.set_control_lines,
            invert_control_lines: defaults.invert_control_lines,
            no_input: defaults.no_input,
            timestamp: defaults.timestamp.clone(),
        }
    }

    /// Level to drive RTS and DTR to at session start, if they are driven at all.
    pub fn control_line_level(&self) -> Option<bool> {
        if self.set_control_lines || self.invert_control_lines {
            Some(self.invert_control_lines)
        } else {
            None
        }
    }
}
