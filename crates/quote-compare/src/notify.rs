use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use log::{debug, warn};
use tokio::task::JoinHandle;

pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(10);
pub const ERROR_DISPLAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// The message currently displayed on a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
    pub expires_after: Duration,
}

/// Pending auto-clear. `generation` identifies the `show` call that armed it.
struct TimerHandle {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl TimerHandle {
    fn cancel(self) {
        if let Some(task) = self.task {
            task.abort();
        }
    }
}

enum ChannelState {
    Idle,
    Showing {
        text: String,
        expires_after: Duration,
        timer: TimerHandle,
    },
}

struct Inner {
    state: ChannelState,
    generation: u64,
}

/// A display slot whose message clears itself after a fixed duration.
///
/// A later `show` replaces both the text and the pending clear; an earlier
/// timer can never clear a newer message.
pub struct NotificationChannel {
    kind: NotificationKind,
    default_duration: Duration,
    inner: Arc<Mutex<Inner>>,
}

impl NotificationChannel {
    pub fn new(kind: NotificationKind, default_duration: Duration) -> Self {
        Self {
            kind,
            default_duration,
            inner: Arc::new(Mutex::new(Inner {
                state: ChannelState::Idle,
                generation: 0,
            })),
        }
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Display `text` and schedule a clear `duration` from now.
    ///
    /// Outside a tokio runtime no clear can be scheduled and the message
    /// stays until `clear` or the next `show`.
    pub fn show(&self, text: impl Into<String>, duration: Duration) {
        let text = text.into();
        let mut inner = self.lock();

        if let ChannelState::Showing { timer, .. } =
            std::mem::replace(&mut inner.state, ChannelState::Idle)
        {
            timer.cancel();
        }

        inner.generation += 1;
        let generation = inner.generation;
        let task = match tokio::runtime::Handle::try_current() {
            Ok(handle) => Some(handle.spawn(expire(
                Arc::downgrade(&self.inner),
                generation,
                duration,
            ))),
            Err(_) => {
                warn!("{:?} notification shown outside a runtime; it will not expire", self.kind);
                None
            }
        };

        debug!("{:?} notification: {text}", self.kind);
        inner.state = ChannelState::Showing {
            text,
            expires_after: duration,
            timer: TimerHandle { generation, task },
        };
    }

    /// Display `text` for this channel's default duration.
    pub fn show_default(&self, text: impl Into<String>) {
        self.show(text, self.default_duration);
    }

    /// Return to idle, dropping the text and any pending clear.
    pub fn clear(&self) {
        let mut inner = self.lock();
        if let ChannelState::Showing { timer, .. } =
            std::mem::replace(&mut inner.state, ChannelState::Idle)
        {
            timer.cancel();
        }
    }

    pub fn is_showing(&self) -> bool {
        matches!(self.lock().state, ChannelState::Showing { .. })
    }

    pub fn text(&self) -> Option<String> {
        match &self.lock().state {
            ChannelState::Showing { text, .. } => Some(text.clone()),
            ChannelState::Idle => None,
        }
    }

    pub fn current(&self) -> Option<Notification> {
        match &self.lock().state {
            ChannelState::Showing {
                text,
                expires_after,
                ..
            } => Some(Notification {
                kind: self.kind,
                text: text.clone(),
                expires_after: *expires_after,
            }),
            ChannelState::Idle => None,
        }
    }
}

impl Drop for NotificationChannel {
    fn drop(&mut self) {
        self.clear();
    }
}

async fn expire(inner: Weak<Mutex<Inner>>, generation: u64, after: Duration) {
    tokio::time::sleep(after).await;

    let Some(shared) = inner.upgrade() else {
        return;
    };
    let mut inner = shared.lock().unwrap_or_else(PoisonError::into_inner);
    let current = matches!(
        &inner.state,
        ChannelState::Showing { timer, .. } if timer.generation == generation
    );
    if current {
        inner.state = ChannelState::Idle;
    }
}

/// The success and error channels of the quote form.
pub struct Notifier {
    pub success: NotificationChannel,
    pub error: NotificationChannel,
}

impl Notifier {
    pub fn new(success_duration: Duration, error_duration: Duration) -> Self {
        Self {
            success: NotificationChannel::new(NotificationKind::Success, success_duration),
            error: NotificationChannel::new(NotificationKind::Error, error_duration),
        }
    }

    /// Show a success message, dismissing any error on screen.
    pub fn success(&self, text: impl Into<String>) {
        self.error.clear();
        self.success.show_default(text);
    }

    /// Show an error message, dismissing any success on screen.
    pub fn error(&self, text: impl Into<String>) {
        self.success.clear();
        self.error.show_default(text);
    }

    /// Whichever notification is currently displayed.
    pub fn current(&self) -> Option<Notification> {
        self.success.current().or_else(|| self.error.current())
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(SUCCESS_DISPLAY, ERROR_DISPLAY)
    }
}
