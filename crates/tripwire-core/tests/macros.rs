//! Tests for the macros against the process-wide instance
//!
//! Only paths that neither prompt nor halt are exercised here.

use std::cell::Cell;

use tripwire_core::prelude::*;

#[test]
fn test_passing_check_evaluates_condition_once()
{
    let calls = Cell::new(0);
    let ready = || {
        calls.set(calls.get() + 1);
        true
    };

    check!(ready());
    check!(ready(),);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_passing_checkf_skips_message()
{
    let formatted = Cell::new(false);
    let message = || {
        formatted.set(true);
        "never shown"
    };

    checkf!(1 + 1 == 2, "{}", message());
    assert!(!formatted.get());
}

#[test]
fn test_unreached_trespass_is_silent()
{
    let kind = |value: u8| match value % 3 {
        0 => "zero",
        1 => "one",
        2 => "two",
        _ => {
            trespass!();
            "unreachable"
        }
    };
    assert_eq!(kind(0), "zero");
    assert_eq!(kind(7), "one");
}

#[test]
fn test_on_negative_dispatches_only_failures()
{
    let mut failures = Vec::new();

    for status in [3i64, 0, -2] {
        let rc = on_negative!(err = status => {
            failures.push(err);
        });
        assert_eq!(rc, status);
    }
    assert_eq!(failures, vec![-2]);
}

#[test]
fn test_logging_macros_write_without_panicking()
{
    debugf!("macro test {} of {}", 1, 2);
    errorf!("macro test error {:#x}", 0xdead_u32);
    dump_hex(b"tripwire");
}

#[test]
fn test_enabled_matches_feature()
{
    assert_eq!(tripwire_core::ENABLED, cfg!(feature = "diagnostics"));
}
