//! Tests for the interactive breakpoint and the check/trespass reports

mod common;

use common::{Event, RecordingBackend};
use tripwire_core::{CallSite, Config, Frame, HaltPolicy, Tripwire, TrapOutcome};

const SITE: CallSite = CallSite::new("src/store.rs", 42);

fn quiet_config() -> Config
{
    Config {
        trace_on_check: false,
        ..Config::default()
    }
}

#[test]
fn test_trap_with_debugger_attached()
{
    let backend = RecordingBackend {
        debugger: true,
        ..RecordingBackend::new()
    };
    let tw = Tripwire::new(backend);

    assert_eq!(tw.trap(SITE), TrapOutcome::Trapped);
    assert_eq!(tw.backend().events(), vec![Event::Trap]);
}

#[test]
fn test_trap_without_debugger_or_terminal_terminates()
{
    let tw = Tripwire::new(RecordingBackend::new());

    assert_eq!(tw.trap(SITE), TrapOutcome::Terminated);
    assert_eq!(tw.backend().events(), vec![Event::Terminate]);
}

#[test]
fn test_trap_without_trap_instruction_terminates()
{
    let backend = RecordingBackend {
        debugger: true,
        no_trap_instruction: true,
        ..RecordingBackend::new()
    };
    let tw = Tripwire::new(backend);

    assert_eq!(tw.trap(SITE), TrapOutcome::Terminated);
    assert_eq!(tw.backend().count(&Event::Trap), 0);
}

#[test]
fn test_prompt_text()
{
    let tw = Tripwire::new(RecordingBackend::interactive("y"));
    tw.trap(SITE);

    assert_eq!(
        tw.backend().events(),
        vec![
            Event::Prompt("src/store.rs:42: skip breakpoint? [y]es/[a]lways/[N]o ".to_string()),
            Event::Read,
        ]
    );
}

#[test]
fn test_answer_always_silences_the_site()
{
    let tw = Tripwire::new(RecordingBackend::interactive("a"));

    assert_eq!(tw.trap(SITE), TrapOutcome::SkippedFromNow);
    assert!(tw.sites().is_skipped(SITE));
    tw.backend().clear();

    assert_eq!(tw.trap(SITE), TrapOutcome::Skipped);
    assert!(tw.backend().events().is_empty());
}

#[test]
fn test_answer_always_is_per_site()
{
    let tw = Tripwire::new(RecordingBackend::interactive("Ay"));
    let other = CallSite::new("src/store.rs", 43);

    assert_eq!(tw.trap(SITE), TrapOutcome::SkippedFromNow);
    assert_eq!(tw.trap(other), TrapOutcome::ContinuedOnce);
    assert_eq!(tw.backend().count(&Event::Read), 2);
}

#[test]
fn test_answer_yes_keeps_the_site_active()
{
    let tw = Tripwire::new(RecordingBackend::interactive("yY"));

    assert_eq!(tw.trap(SITE), TrapOutcome::ContinuedOnce);
    assert_eq!(tw.trap(SITE), TrapOutcome::ContinuedOnce);
    assert_eq!(tw.backend().count(&Event::Read), 2);
    assert!(tw.sites().is_empty());
}

#[test]
fn test_other_answers_halt()
{
    for answers in ["n", "N", "\n", "q", ""] {
        let mut backend = RecordingBackend::interactive(answers);
        backend.debugger = true;
        let tw = Tripwire::new(backend);

        assert_eq!(tw.trap(SITE), TrapOutcome::Trapped, "answer {answers:?}");
        assert_eq!(tw.backend().count(&Event::Trap), 1);
        assert_eq!(tw.backend().count(&Event::Terminate), 0);
    }
}

#[test]
fn test_declined_prompt_without_debugger_terminates()
{
    let tw = Tripwire::new(RecordingBackend::interactive("n"));

    assert_eq!(tw.trap(SITE), TrapOutcome::Terminated);
    assert_eq!(tw.backend().events().last(), Some(&Event::Terminate));
}

#[test]
fn test_immediate_policy_never_prompts()
{
    let mut backend = RecordingBackend::interactive("a");
    backend.policy = HaltPolicy::Immediate;
    let tw = Tripwire::new(backend);

    assert_eq!(tw.trap(SITE), TrapOutcome::Trapped);
    assert_eq!(tw.trap(SITE), TrapOutcome::Trapped);
    assert_eq!(tw.backend().events(), vec![Event::Trap, Event::Trap]);
}

#[test]
fn test_prompt_disabled_by_config()
{
    let backend = RecordingBackend {
        debugger: true,
        ..RecordingBackend::interactive("y")
    };
    let tw = Tripwire::with_config(
        backend,
        Config {
            prompt: false,
            ..Config::default()
        },
    );

    assert_eq!(tw.trap(SITE), TrapOutcome::Trapped);
    assert_eq!(tw.backend().count(&Event::Read), 0);
}

#[test]
fn test_check_failed_report()
{
    let tw = Tripwire::with_config(RecordingBackend::new(), quiet_config());
    let outcome = tw.check_failed(SITE, "len % 4 == 0", None);

    assert_eq!(outcome, TrapOutcome::Terminated);
    assert_eq!(
        tw.backend().events(),
        vec![
            Event::Emit("src/store.rs:42: check `len % 4 == 0' failed\n".to_string()),
            Event::Terminate,
        ]
    );
}

#[test]
fn test_check_failed_report_with_message()
{
    let tw = Tripwire::with_config(RecordingBackend::new(), quiet_config());
    tw.check_failed(SITE, "fd >= 0", Some(format_args!("open {} failed", "a.db")));

    assert_eq!(tw.backend().emits()[0], "src/store.rs:42: check `fd >= 0' failed: open a.db failed\n");
}

#[test]
fn test_trespass_report()
{
    let tw = Tripwire::with_config(RecordingBackend::new(), quiet_config());
    tw.trespassed(SITE, None);
    tw.trespassed(SITE, Some(format_args!("state {}", 7)));

    assert_eq!(
        tw.backend().emits(),
        vec![
            "src/store.rs:42: should not be here\n".to_string(),
            "src/store.rs:42: should not be here: state 7\n".to_string(),
        ]
    );
}

#[test]
fn test_check_failed_prints_trace_before_trapping()
{
    let backend = RecordingBackend {
        frames: vec![Frame::new(0xabc, Some("store::flush"))],
        debugger: true,
        ..RecordingBackend::new()
    };
    let tw = Tripwire::new(backend);
    tw.check_failed(SITE, "ok", None);

    assert_eq!(
        tw.backend().events(),
        vec![
            Event::Emit("src/store.rs:42: check `ok' failed\n".to_string()),
            Event::Emit(" 0: 0x0000000000000abc - store::flush\n".to_string()),
            Event::Trap,
        ]
    );
}

#[test]
fn test_skipped_site_still_reports()
{
    let backend = RecordingBackend {
        frames: vec![Frame::new(0x1, None::<String>)],
        ..RecordingBackend::interactive("a")
    };
    let tw = Tripwire::new(backend);

    assert_eq!(tw.check_failed(SITE, "ok", None), TrapOutcome::SkippedFromNow);
    tw.backend().clear();

    assert_eq!(tw.check_failed(SITE, "ok", None), TrapOutcome::Skipped);
    assert_eq!(
        tw.backend().emits(),
        vec![
            "src/store.rs:42: check `ok' failed\n".to_string(),
            " 0: 0x0000000000000001 - <unknown>\n".to_string(),
        ]
    );
    assert_eq!(tw.backend().count(&Event::Read), 0);
}

#[test]
fn test_prompt_bypasses_log_sink()
{
    let tw = Tripwire::new(RecordingBackend::interactive("y"));
    tw.trap(SITE);

    assert!(tw.backend().emits().is_empty());
    assert_eq!(
        tw.backend().events()[0],
        Event::Prompt("src/store.rs:42: skip breakpoint? [y]es/[a]lways/[N]o ".to_string())
    );
}

#[test]
fn test_terminate_prints_trace_first()
{
    let backend = RecordingBackend {
        frames: vec![Frame::new(0x40, Some("app::commit"))],
        ..RecordingBackend::new()
    };
    let tw = Tripwire::new(backend);

    assert_eq!(tw.trap(SITE), TrapOutcome::Terminated);
    assert_eq!(
        tw.backend().events(),
        vec![
            Event::Emit(" 0: 0x0000000000000040 - app::commit\n".to_string()),
            Event::Terminate,
        ]
    );
}

#[test]
fn test_debugger_trap_prints_no_trace()
{
    let backend = RecordingBackend {
        frames: vec![Frame::new(0x40, Some("app::commit"))],
        debugger: true,
        ..RecordingBackend::new()
    };
    let tw = Tripwire::new(backend);

    assert_eq!(tw.trap(SITE), TrapOutcome::Trapped);
    assert_eq!(tw.backend().events(), vec![Event::Trap]);
}

#[test]
fn test_failed_check_traces_once_before_terminate()
{
    let backend = RecordingBackend {
        frames: vec![Frame::new(0x40, Some("app::commit"))],
        ..RecordingBackend::new()
    };
    let tw = Tripwire::new(backend);
    tw.check_failed(SITE, "ok", None);

    assert_eq!(
        tw.backend().events(),
        vec![
            Event::Emit("src/store.rs:42: check `ok' failed\n".to_string()),
            Event::Emit(" 0: 0x0000000000000040 - app::commit\n".to_string()),
            Event::Terminate,
        ]
    );

    let quiet = Tripwire::with_config(
        RecordingBackend {
            frames: vec![Frame::new(0x40, Some("app::commit"))],
            ..RecordingBackend::new()
        },
        quiet_config(),
    );
    quiet.check_failed(SITE, "ok", None);
    assert_eq!(quiet.backend().emits().len(), 2);
    assert_eq!(quiet.backend().events().last(), Some(&Event::Terminate));
}
