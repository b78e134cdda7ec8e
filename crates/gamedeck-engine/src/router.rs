//! Debounced search input routing.
//!
//! Keystrokes are buffered in a [`Debouncer`] and dispatched once input has
//! been quiet for the window; a submit dispatches at once and cancels the
//! pending value. Dispatch goes to a [`SearchTarget`], which for the engine
//! routes to whichever view is active.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::debug;

use crate::debounce::Debouncer;
use crate::engine::CatalogEngine;

/// Receiver of settled search values.
#[async_trait]
pub trait SearchTarget: Send + Sync {
    /// Apply a settled search term.
    async fn dispatch_search(&self, value: String);
}

#[async_trait]
impl SearchTarget for CatalogEngine {
    async fn dispatch_search(&self, value: String) {
        self.search_input(value).await;
    }
}

#[derive(Debug)]
enum RouterInput {
    Keystroke(String),
    Submit(String),
}

/// Handle to a running input router task.
#[derive(Debug)]
pub struct InputRouter {
    tx: mpsc::UnboundedSender<RouterInput>,
    task: JoinHandle<()>,
}

impl InputRouter {
    /// Buffer a keystroke value. Returns `false` once the router has stopped.
    #[must_use]
    pub fn keystroke(&self, value: impl Into<String>) -> bool {
        self.tx.send(RouterInput::Keystroke(value.into())).is_ok()
    }

    /// Dispatch immediately, cancelling any pending keystroke value.
    #[must_use]
    pub fn submit(&self, value: impl Into<String>) -> bool {
        self.tx.send(RouterInput::Submit(value.into())).is_ok()
    }

    /// Stop the router. A value still inside its window is dropped.
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(err) = self.task.await {
            debug!(error = %err, "input router task ended abnormally");
        }
    }
}

/// Spawn a router task dispatching to `target` after `window` of quiet.
pub fn spawn_input_router<T>(target: Arc<T>, window: Duration) -> InputRouter
where
    T: SearchTarget + ?Sized + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(async move {
        let mut debouncer = Debouncer::new(window);
        loop {
            let deadline = debouncer.deadline();
            let wake = deadline.map_or_else(Instant::now, Instant::from_std);
            tokio::select! {
                input = rx.recv() => match input {
                    Some(RouterInput::Keystroke(value)) => {
                        debouncer.push(value, Instant::now().into_std());
                    }
                    Some(RouterInput::Submit(value)) => {
                        debouncer.cancel();
                        debug!(search = %value, "search submitted");
                        target.dispatch_search(value).await;
                    }
                    None => break,
                },
                () = sleep_until(wake), if deadline.is_some() => {
                    if let Some(value) = debouncer.poll(Instant::now().into_std()) {
                        debug!(search = %value, "search settled");
                        target.dispatch_search(value).await;
                    }
                }
            }
        }
    });
    InputRouter { tx, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, PoisonError};
    use tokio::time::sleep;

    const WINDOW: Duration = Duration::from_millis(500);

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    #[async_trait]
    impl SearchTarget for Recorder {
        async fn dispatch_search(&self, value: String) {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(value);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_keystrokes_dispatch_once_with_last_value() {
        let recorder = Arc::new(Recorder::default());
        let router = spawn_input_router(Arc::clone(&recorder), WINDOW);

        for value in ["z", "ze", "zel", "zeld", "zelda"] {
            assert!(router.keystroke(value));
            sleep(Duration::from_millis(100)).await;
        }
        sleep(Duration::from_millis(350)).await;
        assert!(recorder.calls().is_empty());

        sleep(Duration::from_millis(100)).await;
        assert_eq!(recorder.calls(), vec!["zelda".to_string()]);

        sleep(Duration::from_secs(2)).await;
        assert_eq!(recorder.calls().len(), 1);
        router.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn submit_bypasses_window_and_cancels_pending() {
        let recorder = Arc::new(Recorder::default());
        let router = spawn_input_router(Arc::clone(&recorder), WINDOW);

        assert!(router.keystroke("mar"));
        assert!(router.submit("mario"));
        sleep(Duration::from_millis(1)).await;
        assert_eq!(recorder.calls(), vec!["mario".to_string()]);

        sleep(Duration::from_secs(1)).await;
        assert_eq!(recorder.calls(), vec!["mario".to_string()]);
        router.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn separated_inputs_dispatch_separately() {
        let recorder = Arc::new(Recorder::default());
        let router = spawn_input_router(Arc::clone(&recorder), WINDOW);

        assert!(router.keystroke("halo"));
        sleep(Duration::from_millis(600)).await;
        assert!(router.keystroke("hades"));
        sleep(Duration::from_millis(600)).await;
        assert_eq!(
            recorder.calls(),
            vec!["halo".to_string(), "hades".to_string()]
        );
        router.shutdown().await;
    }
}
