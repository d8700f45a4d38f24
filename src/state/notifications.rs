//! Notification toast state
//!
//! A single toast slides in, holds, then slides out, unless the user
//! dismisses it early or a newer notification replaces it. `advance` is the
//! clock: phase transitions only happen there, while `display_at` is a pure
//! read. Both take an explicit `Instant` so the timeline can be driven in
//! tests; `tick`/`show`/`dismiss` are the wall-clock wrappers.

use std::time::{Duration, Instant};

/// Visual weight of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// Animation phase of the toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Sliding in from the edge
    SlideIn,
    /// Fully on screen
    Visible,
    /// Sliding back out
    SlideOut,
}

/// A notification message queued for display
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// Snapshot of the current toast for the renderer
#[derive(Debug, Clone)]
pub struct ToastDisplay {
    pub message: String,
    pub severity: Severity,
    pub phase: ToastPhase,
    /// Progress through the current slide phase (0.0 to 1.0, 1.0 when visible)
    pub progress: f32,
}

#[derive(Debug)]
struct ActiveToast {
    notification: Notification,
    shown_at: Instant,
    exit_started: Option<Instant>,
}

/// Owns the toast lifecycle: one visible notification at a time
#[derive(Debug)]
pub struct NotificationCenter {
    current: Option<ActiveToast>,
    visible_for: Duration,
}

impl NotificationCenter {
    /// Slide-in animation length
    pub const SLIDE_IN_DURATION: Duration = Duration::from_millis(200);
    /// Slide-out animation length
    pub const SLIDE_OUT_DURATION: Duration = Duration::from_millis(250);
    /// How long a toast holds on screen before auto-dismissing
    pub const DEFAULT_VISIBLE_FOR: Duration = Duration::from_secs(5);

    pub fn new(visible_for: Duration) -> Self {
        Self {
            current: None,
            visible_for,
        }
    }

    /// Show a notification, replacing any current toast outright
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) {
        self.show_at(message, severity, Instant::now());
    }

    pub fn show_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.current = Some(ActiveToast {
            notification: Notification {
                message: message.into(),
                severity,
            },
            shown_at: now,
            exit_started: None,
        });
    }

    /// Begin the exit animation early (user dismissed the toast)
    pub fn dismiss(&mut self) {
        self.dismiss_at(Instant::now());
    }

    pub fn dismiss_at(&mut self, now: Instant) {
        if let Some(toast) = &mut self.current {
            if toast.exit_started.is_none() {
                toast.exit_started = Some(now);
            }
        }
    }

    /// Drive phase transitions from the wall clock
    pub fn tick(&mut self) {
        self.advance(Instant::now());
    }

    /// Drive phase transitions: schedule the exit once the hold expires and
    /// drop the toast once the exit completes
    pub fn advance(&mut self, now: Instant) {
        let Some(toast) = &mut self.current else {
            return;
        };
        if toast.exit_started.is_none() {
            let hold = Self::SLIDE_IN_DURATION + self.visible_for;
            if now.duration_since(toast.shown_at) >= hold {
                // Anchor the exit to its scheduled start so a late tick
                // still runs the full lifecycle in one pass
                toast.exit_started = Some(toast.shown_at + hold);
            }
        }
        if let Some(started) = toast.exit_started {
            if now.duration_since(started) >= Self::SLIDE_OUT_DURATION {
                self.current = None;
            }
        }
    }

    /// Whether a toast is currently on screen in any phase
    pub fn is_live(&self) -> bool {
        self.current.is_some()
    }

    /// Whether the toast is mid-slide (drives the fast poll cadence)
    pub fn is_animating(&self) -> bool {
        self.is_animating_at(Instant::now())
    }

    fn is_animating_at(&self, now: Instant) -> bool {
        match &self.current {
            None => false,
            Some(toast) => {
                toast.exit_started.is_some()
                    || now.duration_since(toast.shown_at) < Self::SLIDE_IN_DURATION
            }
        }
    }

    pub fn display(&self) -> Option<ToastDisplay> {
        self.display_at(Instant::now())
    }

    pub fn display_at(&self, now: Instant) -> Option<ToastDisplay> {
        let toast = self.current.as_ref()?;
        let (phase, progress) = match toast.exit_started {
            Some(started) => {
                let progress = now.duration_since(started).as_secs_f32()
                    / Self::SLIDE_OUT_DURATION.as_secs_f32();
                (ToastPhase::SlideOut, progress.min(1.0))
            }
            None => {
                let since = now.duration_since(toast.shown_at);
                if since < Self::SLIDE_IN_DURATION {
                    let progress = since.as_secs_f32() / Self::SLIDE_IN_DURATION.as_secs_f32();
                    (ToastPhase::SlideIn, progress)
                } else {
                    (ToastPhase::Visible, 1.0)
                }
            }
        };
        Some(ToastDisplay {
            message: toast.notification.message.clone(),
            severity: toast.notification.severity,
            phase,
            progress,
        })
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VISIBLE_FOR)
    }
}
