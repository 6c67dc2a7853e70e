//! Process-wide emitter tag.
//!
//! The tag names the source of log output for structured log facilities
//! (the Android log, the `tracing` sink in `tripwire-utils`). It starts as
//! `TRIPWIRE_TAG` from the environment, or [`DEFAULT_TAG`], and is meant to be
//! set once during startup and read many times after.

use std::env;
use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;

use crate::config::ENV_TAG;

/// Tag used until the application sets its own.
pub const DEFAULT_TAG: &str = "tripwire";

static EMITTER_TAG: Lazy<RwLock<String>> = Lazy::new(|| {
    let tag = env::var(ENV_TAG)
        .ok()
        .filter(|tag| !tag.is_empty())
        .unwrap_or_else(|| DEFAULT_TAG.to_string());
    RwLock::new(tag)
});

/// Replace the emitter tag. Last write wins.
pub fn set_emitter_tag(name: impl Into<String>)
{
    let mut tag = EMITTER_TAG.write().unwrap_or_else(PoisonError::into_inner);
    *tag = name.into();
}

/// Current emitter tag.
#[must_use]
pub fn emitter_tag() -> String
{
    EMITTER_TAG.read().unwrap_or_else(PoisonError::into_inner).clone()
}
