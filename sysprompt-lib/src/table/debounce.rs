//! Debounced input.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Default quiet period before input is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Buffers raw input and commits only the latest value after a quiet
/// period with no further input.
///
/// Every [`push`](Debouncer::push) restarts the timer. Dropping the
/// debouncer discards any pending value.
///
/// Must be created inside a tokio runtime.
///
/// # Example
///
/// ```ignore
/// let debouncer = Debouncer::new(String::new(), Duration::from_millis(500));
/// let mut committed = debouncer.subscribe();
///
/// debouncer.push("ab".to_string());
/// committed.changed().await?;
/// assert_eq!(*committed.borrow(), "ab");
/// ```
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
    output: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
    T: Send + Sync + 'static,
{
    /// Starts a debouncer whose committed value begins at `initial`.
    pub fn new(initial: T, quiet: Duration) -> Self {
        let (input, rx) = mpsc::unbounded_channel();
        let (tx, output) = watch::channel(initial);
        let task = tokio::spawn(run(rx, tx, quiet));
        Self {
            input,
            output,
            task,
        }
    }

    /// Feeds a raw value, restarting the quiet period.
    pub fn push(&self, value: T) {
        if self.input.send(value).is_err() {
            log::debug!("debouncer task already stopped; input dropped");
        }
    }

    /// Receiver of committed values.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }
}

impl<T: Clone> Debouncer<T> {
    /// The most recently committed value.
    pub fn committed(&self) -> T {
        self.output.borrow().clone()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<T>(mut input: mpsc::UnboundedReceiver<T>, output: watch::Sender<T>, quiet: Duration) {
    while let Some(mut pending) = input.recv().await {
        loop {
            tokio::select! {
                next = input.recv() => match next {
                    Some(value) => pending = value,
                    None => return,
                },
                _ = tokio::time::sleep(quiet) => {
                    output.send_replace(pending);
                    break;
                }
            }
        }
    }
}
