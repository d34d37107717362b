//! Transient single-slot notifications

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How long a notification stays visible before it starts leaving.
pub const DISPLAY_DURATION: Duration = Duration::from_secs(4);
/// Exit transition window after the display duration elapses.
pub const EXIT_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub kind: Severity,
}

#[derive(Debug)]
struct Slot {
    current: Option<Notification>,
    leaving: bool,
    // Invalidates pending dismiss timers when a newer notification replaces
    // the one they were scheduled for.
    generation: u64,
}

/// Owns the one visible notification.
///
/// Showing a new notification replaces any live one immediately; each
/// auto-dismisses after [`DISPLAY_DURATION`] plus a short exit transition.
#[derive(Clone)]
pub struct Notifier {
    slot: Arc<Mutex<Slot>>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                current: None,
                leaving: false,
                generation: 0,
            })),
        }
    }

    /// Display a notification, replacing any visible one.
    pub fn show(&self, text: impl Into<String>, kind: Severity) {
        let generation = {
            let mut slot = self.slot.lock().unwrap();
            slot.generation += 1;
            slot.current = Some(Notification {
                text: text.into(),
                kind,
            });
            slot.leaving = false;
            slot.generation
        };

        let slot = Arc::clone(&self.slot);
        tokio::spawn(async move {
            tokio::time::sleep(DISPLAY_DURATION).await;
            {
                let mut slot = slot.lock().unwrap();
                if slot.generation != generation {
                    return;
                }
                slot.leaving = true;
            }
            tokio::time::sleep(EXIT_DURATION).await;
            let mut slot = slot.lock().unwrap();
            if slot.generation == generation {
                slot.current = None;
                slot.leaving = false;
            }
        });
    }

    /// The currently visible notification, if any.
    pub fn current(&self) -> Option<Notification> {
        self.slot.lock().unwrap().current.clone()
    }

    /// True while the visible notification is in its exit transition.
    pub fn is_leaving(&self) -> bool {
        self.slot.lock().unwrap().leaving
    }
}
