//! Logging and assertion macros.
//!
//! Call sites are captured with `file!()`/`line!()` at the macro invocation.
//! With the `diagnostics` feature off, `check!` and `checkf!` still evaluate
//! their condition exactly once; nothing else runs.

/// Log a formatted line, `format!` style.
///
/// ```rust,no_run
/// tripwire_core::debugf!("loaded {} entries from {}", 12, "cache.db");
/// ```
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::log_line(::core::format_args!($($arg)+))
    };
}

/// Log a formatted line, highlighted as an error.
///
/// ```rust,no_run
/// tripwire_core::errorf!("short read: {} of {} bytes", 3, 8);
/// ```
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::log_error_line(::core::format_args!($($arg)+))
    };
}

/// Trap if `condition` is false, after reporting it with a stack trace.
///
/// ```rust,no_run
/// let len = 4;
/// tripwire_core::check!(len % 4 == 0);
/// ```
#[macro_export]
macro_rules! check {
    ($condition:expr $(,)?) => {{
        let passed: bool = $condition;
        if $crate::ENABLED && !passed {
            $crate::__private::check_failed(
                $crate::CallSite::new(::core::file!(), ::core::line!()),
                ::core::stringify!($condition),
                ::core::option::Option::None,
            );
        }
    }};
}

/// Like [`check!`], with a formatted explanation.
///
/// ```rust,no_run
/// let fd = 3;
/// tripwire_core::checkf!(fd >= 0, "open failed for {}", "config.toml");
/// ```
#[macro_export]
macro_rules! checkf {
    ($condition:expr, $($arg:tt)+) => {{
        let passed: bool = $condition;
        if $crate::ENABLED && !passed {
            $crate::__private::check_failed(
                $crate::CallSite::new(::core::file!(), ::core::line!()),
                ::core::stringify!($condition),
                ::core::option::Option::Some(::core::format_args!($($arg)+)),
            );
        }
    }};
}

/// Mark a code path that must never run; reaching it reports and traps.
///
/// ```rust,no_run
/// match 2 {
///     1 | 2 => {}
///     _ => tripwire_core::trespass!(),
/// }
/// ```
#[macro_export]
macro_rules! trespass {
    () => {
        if $crate::ENABLED {
            $crate::__private::trespassed($crate::CallSite::new(::core::file!(), ::core::line!()), ::core::option::Option::None);
        }
    };
}

/// Like [`trespass!`], with a formatted explanation.
#[macro_export]
macro_rules! trespassf {
    ($($arg:tt)+) => {
        if $crate::ENABLED {
            $crate::__private::trespassed(
                $crate::CallSite::new(::core::file!(), ::core::line!()),
                ::core::option::Option::Some(::core::format_args!($($arg)+)),
            );
        }
    };
}

/// Evaluate a call returning a signed status and, when it is negative, run a
/// block with the result bound to `name`. Evaluates to the result.
///
/// Nothing is logged and nothing halts; pair it with `trespass!` or `errorf!`
/// inside the block as needed.
///
/// ```rust
/// use tripwire_core::on_negative;
///
/// fn close(fd: i32) -> i32
/// {
///     if fd < 0 { -9 } else { 0 }
/// }
///
/// let mut handled = None;
/// let rc = on_negative!(err = close(-1) => {
///     handled = Some(match err {
///         -9 => "bad descriptor",
///         _ => "other",
///     });
/// });
/// assert_eq!(rc, -9);
/// assert_eq!(handled, Some("bad descriptor"));
/// ```
#[macro_export]
macro_rules! on_negative {
    ($name:ident = $call:expr => $dispatch:block) => {{
        let $name = $call;
        if $name < 0 $dispatch
        $name
    }};
}
