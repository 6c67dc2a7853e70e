//! Runtime configuration.
//!
//! Configuration is read from the environment once, when the process-wide
//! [`Tripwire`](crate::Tripwire) is first used:
//!
//! - `TRIPWIRE_TAG`: initial emitter tag (see [`crate::tag`])
//! - `TRIPWIRE_COLOR`: `auto`, `always` or `never` (default `auto`)
//! - `TRIPWIRE_PROMPT`: interactive breakpoint prompt on/off (default on)
//! - `TRIPWIRE_TRACE`: stack trace on failed checks on/off (default on)

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Environment variable holding the initial emitter tag.
pub const ENV_TAG: &str = "TRIPWIRE_TAG";
/// Environment variable selecting the [`ColorMode`].
pub const ENV_COLOR: &str = "TRIPWIRE_COLOR";
/// Environment variable enabling the interactive breakpoint prompt.
pub const ENV_PROMPT: &str = "TRIPWIRE_PROMPT";
/// Environment variable enabling stack traces on failed checks.
pub const ENV_TRACE: &str = "TRIPWIRE_TRACE";

const BOOL_VALUES: &str = "1, 0, true, false, yes, no, on, off";

/// When error lines are highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode
{
    /// Highlight when the sink reports color support (stderr is a terminal)
    #[default]
    Auto,
    /// Always highlight
    Always,
    /// Never highlight
    Never,
}

impl FromStr for ColorMode
{
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" | "on" => Ok(ColorMode::Always),
            "never" | "off" => Ok(ColorMode::Never),
            _ => Err(ConfigError::InvalidValue {
                variable: ENV_COLOR,
                value: s.to_string(),
                expected: "auto, always, never",
            }),
        }
    }
}

impl fmt::Display for ColorMode
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        })
    }
}

/// Behavior switches for a [`Tripwire`](crate::Tripwire).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config
{
    /// Highlighting of error lines
    pub color: ColorMode,
    /// Offer the skip prompt on a terminal before halting
    pub prompt: bool,
    /// Print a stack trace when a check fails
    pub trace_on_check: bool,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            color: ColorMode::Auto,
            prompt: true,
            trace_on_check: true,
        }
    }
}

impl Config
{
    /// Load configuration from the process environment.
    ///
    /// ## Errors
    ///
    /// Returns the first variable holding an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError>
    {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from the process environment, replacing bad values
    /// with defaults (each one is reported with `tracing::warn!`).
    #[must_use]
    pub fn from_env_lossy() -> Self
    {
        Self::from_lookup_lossy(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// ## Errors
    ///
    /// Returns the first variable holding an unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            color: field(&lookup, ENV_COLOR, str::parse::<ColorMode>)?.unwrap_or(defaults.color),
            prompt: field(&lookup, ENV_PROMPT, |v| parse_bool(ENV_PROMPT, v))?.unwrap_or(defaults.prompt),
            trace_on_check: field(&lookup, ENV_TRACE, |v| parse_bool(ENV_TRACE, v))?.unwrap_or(defaults.trace_on_check),
        })
    }

    /// Like [`Config::from_lookup`], but never fails.
    #[must_use]
    pub fn from_lookup_lossy<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            color: lossy(field(&lookup, ENV_COLOR, str::parse::<ColorMode>), defaults.color),
            prompt: lossy(field(&lookup, ENV_PROMPT, |v| parse_bool(ENV_PROMPT, v)), defaults.prompt),
            trace_on_check: lossy(field(&lookup, ENV_TRACE, |v| parse_bool(ENV_TRACE, v)), defaults.trace_on_check),
        }
    }
}

/// Parse a boolean switch the way the environment variables accept it.
///
/// ## Errors
///
/// Returns [`ConfigError::InvalidValue`] naming `variable` for anything else.
pub fn parse_bool(variable: &'static str, value: &str) -> Result<bool, ConfigError>
{
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            variable,
            value: value.to_string(),
            expected: BOOL_VALUES,
        }),
    }
}

fn field<F, T, P>(lookup: &F, name: &str, parse: P) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Result<T, ConfigError>,
{
    match lookup(name) {
        // An empty variable counts as unset
        Some(value) if !value.trim().is_empty() => parse(&value).map(Some),
        _ => Ok(None),
    }
}

fn lossy<T: fmt::Debug>(value: Result<Option<T>, ConfigError>, default: T) -> T
{
    match value {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(error) => {
            tracing::warn!(%error, ?default, "ignoring invalid configuration value");
            default
        }
    }
}
