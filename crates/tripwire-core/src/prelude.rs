//! Common imports for code that uses the diagnostics macros.

pub use crate::config::{ColorMode, Config};
pub use crate::context::Tripwire;
pub use crate::global::{dump_hex, is_debugger_attached, print_stack_trace, trap_here};
pub use crate::platform::{Backend, HaltPolicy, HostBackend};
pub use crate::sink::Sink;
pub use crate::trap::{CallSite, TrapOutcome};
pub use crate::{check, checkf, debugf, errorf, on_negative, trespass, trespassf};
