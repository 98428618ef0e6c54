//! Notification Lifecycle: a single transient status slot.
//!
//! At most one [`Notice`] exists at a time and a new one replaces the old
//! immediately. Success notices hide themselves after the auto-hide delay;
//! error notices stay until dismissed. Hiding first flips `visible` off
//! (the fade-out) and clears the slot only after the fade window.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Default time a success notice stays visible.
pub const DEFAULT_AUTO_HIDE: Duration = Duration::from_millis(2000);

/// Default fade-out window before the message is cleared.
pub const DEFAULT_FADE: Duration = Duration::from_millis(300);

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    /// Heading shown above the message.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Error => "Error",
        }
    }
}

/// A status message and its visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    /// `false` while fading out.
    pub visible: bool,
    seq: u64,
}

impl Notice {
    /// Identifies this notice among all notices shown by its notifier.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Auto-hide and fade durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeTiming {
    pub auto_hide: Duration,
    pub fade: Duration,
}

impl Default for NoticeTiming {
    fn default() -> Self {
        Self {
            auto_hide: DEFAULT_AUTO_HIDE,
            fade: DEFAULT_FADE,
        }
    }
}

/// Owner of the notice slot.
///
/// Cheap to clone; clones share the slot. Timers run as tokio tasks, so
/// `show` and `dismiss` must be called inside a runtime.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<NotifierInner>,
}

struct NotifierInner {
    slot: watch::Sender<Option<Notice>>,
    timing: NoticeTiming,
    next_seq: AtomicU64,
    timer: Mutex<Option<CancellationToken>>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(NoticeTiming::default())
    }
}

impl Notifier {
    pub fn new(timing: NoticeTiming) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            inner: Arc::new(NotifierInner {
                slot,
                timing,
                next_seq: AtomicU64::new(1),
                timer: Mutex::new(None),
            }),
        }
    }

    pub fn timing(&self) -> NoticeTiming {
        self.inner.timing
    }

    /// The current notice, if any.
    pub fn current(&self) -> Option<Notice> {
        self.inner.slot.borrow().clone()
    }

    /// Receiver that observes every change to the slot.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notice>> {
        self.inner.slot.subscribe()
    }

    /// Shows a success notice that hides itself.
    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.show(Severity::Success, message)
    }

    /// Shows an error notice that stays until dismissed.
    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.show(Severity::Error, message)
    }

    /// Replaces whatever is showing with a new visible notice.
    ///
    /// Returns the notice's sequence number.
    pub fn show(&self, severity: Severity, message: impl Into<String>) -> u64 {
        let seq = self.inner.next_seq.fetch_add(1, Ordering::SeqCst);
        let token = self.arm();

        self.inner.slot.send_replace(Some(Notice {
            severity,
            message: message.into(),
            visible: true,
            seq,
        }));

        if severity == Severity::Success {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(async move {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {}
                    _ = tokio::time::sleep(inner.timing.auto_hide) => {
                        if inner.hide(seq) {
                            inner.clear_after_fade(seq, token.clone()).await;
                        }
                    }
                }
            });
        }

        seq
    }

    /// Starts the fade-out of the current notice.
    ///
    /// Does nothing if the slot is empty or already fading.
    pub fn dismiss(&self) {
        let Some(notice) = self.current().filter(|n| n.visible) else {
            return;
        };
        let token = self.arm();
        if !self.inner.hide(notice.seq) {
            return;
        }
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.clear_after_fade(notice.seq, token).await;
        });
    }

    /// Cancels pending timers without touching the slot.
    pub fn cancel_timers(&self) {
        if let Ok(mut timer) = self.inner.timer.lock()
            && let Some(token) = timer.take()
        {
            token.cancel();
        }
    }

    /// Installs a fresh timer token, cancelling the previous timer.
    fn arm(&self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Ok(mut timer) = self.inner.timer.lock()
            && let Some(previous) = timer.replace(token.clone())
        {
            previous.cancel();
        }
        token
    }
}

impl NotifierInner {
    /// Starts the fade-out of notice `seq`. Returns `false` if another
    /// notice owns the slot or `seq` is already fading.
    fn hide(&self, seq: u64) -> bool {
        self.slot.send_if_modified(|slot| match slot {
            Some(notice) if notice.seq == seq && notice.visible => {
                notice.visible = false;
                true
            }
            _ => false,
        })
    }

    /// Clears notice `seq` once the fade window elapses, unless a newer
    /// notice replaced it first.
    async fn clear_after_fade(&self, seq: u64, token: CancellationToken) {
        tokio::select! {
            biased;
            _ = token.cancelled() => {}
            _ = tokio::time::sleep(self.timing.fade) => {
                self.slot.send_if_modified(|slot| {
                    if slot.as_ref().is_some_and(|n| n.seq == seq) {
                        *slot = None;
                        true
                    } else {
                        false
                    }
                });
            }
        }
    }
}
