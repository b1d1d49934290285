//! Display sink implementations.
//!
//! - `TerminalDisplay` renders notifications on stdout/stderr.
//! - `ChannelDisplay` forwards them over a tokio broadcast channel, for
//!   front-ends (and tests) that render elsewhere.

use anstream::{eprintln, println};
use tokio::sync::broadcast;

use scoreboard_core::display::{DisplayEvent, DisplaySink};

/// Channel capacity for forwarded display events.
const CHANNEL_CAPACITY: usize = 256;

const RED: &str = "\x1b[38;2;247;118;142m";
const RESET: &str = "\x1b[0m";

/// Prints appended text to stdout and errors, in red, to stderr.
///
/// Each command is a one-shot run, so `clear` keeps the scrollback and
/// prints nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalDisplay;

impl DisplaySink for TerminalDisplay {
    fn clear(&self) {}

    fn append(&self, text: &str) {
        println!("{text}");
    }

    fn error(&self, text: &str) {
        eprintln!("{RED}{text}{RESET}");
    }
}

/// Forwards every notification as a `DisplayEvent` to subscribers.
#[derive(Debug, Clone)]
pub struct ChannelDisplay {
    sender: broadcast::Sender<DisplayEvent>,
}

impl ChannelDisplay {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribes to notifications sent from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DisplayEvent> {
        self.sender.subscribe()
    }

    fn send(&self, event: DisplayEvent) {
        // No subscribers just means nobody is watching.
        let _ = self.sender.send(event);
    }
}

impl Default for ChannelDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for ChannelDisplay {
    fn clear(&self) {
        self.send(DisplayEvent::Clear);
    }

    fn append(&self, text: &str) {
        self.send(DisplayEvent::Append(text.to_string()));
    }

    fn error(&self, text: &str) {
        self.send(DisplayEvent::Error(text.to_string()));
    }
}

/// Drains every event currently buffered in `receiver`.
pub fn drain_events(receiver: &mut broadcast::Receiver<DisplayEvent>) -> Vec<DisplayEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}
