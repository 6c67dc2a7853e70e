//! Recording backend shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use tripwire_core::{Backend, Frame, HaltPolicy, Sink, StackTrace};

/// Everything a backend was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event
{
    Emit(String),
    Prompt(String),
    HighlightOn,
    HighlightOff,
    Read,
    Trap,
    Terminate,
}

/// Test double: scripted probes, recorded side effects, no real traps.
#[derive(Debug, Default)]
pub struct RecordingBackend
{
    pub terminal: bool,
    pub debugger: bool,
    pub color: bool,
    pub no_trap_instruction: bool,
    pub policy: HaltPolicy,
    pub frames: Vec<Frame>,
    pub answers: Mutex<VecDeque<char>>,
    pub events: Mutex<Vec<Event>>,
}

impl RecordingBackend
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Interactive terminal answering with `answers`, one per prompt.
    pub fn interactive(answers: &str) -> Self
    {
        let backend = Self {
            terminal: true,
            ..Self::default()
        };
        backend.answers.lock().unwrap().extend(answers.chars());
        backend
    }

    pub fn events(&self) -> Vec<Event>
    {
        self.events.lock().unwrap().clone()
    }

    pub fn emits(&self) -> Vec<String>
    {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Emit(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &Event) -> usize
    {
        self.events().iter().filter(|event| *event == wanted).count()
    }

    pub fn clear(&self)
    {
        self.events.lock().unwrap().clear();
    }

    fn record(&self, event: Event)
    {
        self.events.lock().unwrap().push(event);
    }
}

impl Sink for RecordingBackend
{
    fn emit(&self, text: &str)
    {
        self.record(Event::Emit(text.to_string()));
    }

    fn set_highlight(&self, on: bool)
    {
        self.record(if on { Event::HighlightOn } else { Event::HighlightOff });
    }

    fn supports_color(&self) -> bool
    {
        self.color
    }
}

impl Backend for RecordingBackend
{
    fn is_stdin_terminal(&self) -> bool
    {
        self.terminal
    }

    fn is_debugger_attached(&self) -> bool
    {
        self.debugger
    }

    fn read_interactive_char(&self) -> Option<char>
    {
        self.record(Event::Read);
        self.answers.lock().unwrap().pop_front()
    }

    fn prompt(&self, text: &str)
    {
        self.record(Event::Prompt(text.to_string()));
    }

    fn capture_trace(&self) -> StackTrace
    {
        self.frames.iter().cloned().collect()
    }

    fn has_trap_instruction(&self) -> bool
    {
        !self.no_trap_instruction
    }

    fn debug_trap(&self)
    {
        self.record(Event::Trap);
    }

    fn terminate(&self)
    {
        self.record(Event::Terminate);
    }

    fn halt_policy(&self) -> HaltPolicy
    {
        self.policy
    }
}
