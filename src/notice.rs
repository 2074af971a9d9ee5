//! User-facing notices and the sinks that receive them.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::sync::Mutex;

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Neutral information (reshuffles, pushes).
    Info,
    /// A win.
    Success,
    /// A loss or a refused action.
    Error,
}

impl Severity {
    /// Returns the lowercase name used by presentation layers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A message for the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Text shown to the player.
    pub message: String,
    /// Presentation severity.
    pub severity: Severity,
    /// Display lifetime in milliseconds; `None` uses the sink's default.
    pub ttl_ms: Option<u32>,
}

impl Notice {
    /// Creates a notice with the sink's default lifetime.
    #[must_use]
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            ttl_ms: None,
        }
    }
}

/// Receives notices from the table. Fire-and-forget.
pub trait Notifier {
    /// Delivers one notice.
    fn notify(&self, notice: Notice);
}

/// Forwards notices to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.severity {
            Severity::Error => log::warn!("{}", notice.message),
            Severity::Info | Severity::Success => log::info!("{}", notice.message),
        }
    }
}

/// A shared buffer of notices.
///
/// Clones share the same buffer, so one clone can be handed to the table
/// while another is drained by the presentation layer.
#[derive(Clone, Default)]
pub struct NoticeQueue {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl NoticeQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every queued notice, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notice> {
        core::mem::take(&mut *self.notices.lock())
    }

    /// Returns the number of queued notices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notices.lock().len()
    }

    /// Returns whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.lock().is_empty()
    }
}

impl Notifier for NoticeQueue {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}
