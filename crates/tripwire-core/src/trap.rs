//! Breakpoint call sites and their skip state.
//!
//! Every trap location is identified by a [`CallSite`] (file + line). A site
//! starts out active; answering "always" at its prompt adds it to the
//! [`SiteRegistry`], after which the site never prompts or halts again for the
//! rest of the process.

use std::collections::HashSet;
use std::fmt;
use std::panic::Location;
use std::sync::{Mutex, PoisonError};

/// Source location of a trap or check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallSite
{
    file: &'static str,
    line: u32,
}

impl CallSite
{
    /// Create a call site from a file name and line (what the macros pass).
    #[must_use]
    pub const fn new(file: &'static str, line: u32) -> Self
    {
        Self { file, line }
    }

    /// The location of whoever called the current `#[track_caller]` function.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self
    {
        let location = Location::caller();
        Self::new(location.file(), location.line())
    }

    /// Source file.
    #[must_use]
    pub const fn file(&self) -> &'static str
    {
        self.file
    }

    /// Source line.
    #[must_use]
    pub const fn line(&self) -> u32
    {
        self.line
    }
}

impl fmt::Display for CallSite
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Call sites the user chose to skip for good.
///
/// Append-only: entries are never removed.
#[derive(Debug, Default)]
pub struct SiteRegistry
{
    skipped: Mutex<HashSet<CallSite>>,
}

impl SiteRegistry
{
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Whether `site` has been skipped permanently.
    #[must_use]
    pub fn is_skipped(&self, site: CallSite) -> bool
    {
        self.skipped.lock().unwrap_or_else(PoisonError::into_inner).contains(&site)
    }

    /// Mark `site` as permanently skipped. Returns `false` if it already was.
    pub fn skip(&self, site: CallSite) -> bool
    {
        self.skipped.lock().unwrap_or_else(PoisonError::into_inner).insert(site)
    }

    /// Number of skipped sites.
    #[must_use]
    pub fn len(&self) -> usize
    {
        self.skipped.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no site has been skipped.
    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.len() == 0
    }
}

/// The user's answer at a breakpoint prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer
{
    /// `y`/`Y`: continue this time only
    Once,
    /// `a`/`A`: continue now and never stop at this site again
    Always,
    /// Anything else (including no input): halt
    Halt,
}

impl Answer
{
    /// Interpret one character read from the terminal.
    #[must_use]
    pub const fn from_input(input: Option<char>) -> Self
    {
        match input {
            Some('y' | 'Y') => Answer::Once,
            Some('a' | 'A') => Answer::Always,
            _ => Answer::Halt,
        }
    }
}

/// What a trap ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapOutcome
{
    /// Diagnostics are compiled out
    Disabled,
    /// The site was already skipped permanently; nothing happened
    Skipped,
    /// The user chose to continue this once
    ContinuedOnce,
    /// The user chose to continue and skip the site from now on
    SkippedFromNow,
    /// A trap instruction handed control to the attached debugger
    Trapped,
    /// The termination path ran
    Terminated,
}

impl TrapOutcome
{
    /// Whether execution was stopped (trap or termination).
    #[must_use]
    pub const fn halted(self) -> bool
    {
        matches!(self, TrapOutcome::Trapped | TrapOutcome::Terminated)
    }
}
