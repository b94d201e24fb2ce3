//! Message sinks for user-visible form output

use console::style;
use serde::Serialize;

/// Severity of a user-visible message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Status,
    Error,
}

/// Destination for messages shown to the user
pub trait Messenger {
    fn add_message(&mut self, kind: MessageKind, message: &str);

    /// Add a status message
    fn add_status(&mut self, message: &str) {
        self.add_message(MessageKind::Status, message);
    }

    /// Add an error message
    fn add_error(&mut self, message: &str) {
        self.add_message(MessageKind::Error, message);
    }
}

/// A message recorded by `MessageLog`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// Collects messages in memory, in the order they were added
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Texts of all messages of one kind
    pub fn texts(&self, kind: MessageKind) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.kind == kind)
            .map(|m| m.text.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Messenger for MessageLog {
    fn add_message(&mut self, kind: MessageKind, message: &str) {
        self.messages.push(Message {
            kind,
            text: message.to_string(),
        });
    }
}

/// Prints messages to the terminal as they arrive
///
/// Status lines go to stdout, errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleMessenger {
    quiet: bool,
}

impl ConsoleMessenger {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Messenger for ConsoleMessenger {
    fn add_message(&mut self, kind: MessageKind, message: &str) {
        match kind {
            MessageKind::Status => {
                if self.quiet {
                    println!("{}", message);
                } else {
                    println!("{} {}", style("•").green(), message);
                }
            }
            MessageKind::Error => eprintln!("{} {}", style("✗").red(), message),
        }
    }
}
