// src/client/debounce.rs
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

enum Msg<T> {
    Schedule(T),
    Now(T),
    Shutdown,
}

/// Delayed task with "replace, don't queue" semantics: at most one value is
/// pending, and scheduling a new one restarts the delay. Callbacks run on a
/// single worker thread in the order they fire.
pub struct Debouncer<T: Send + 'static> {
    tx: Sender<Msg<T>>,
    worker: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, on_fire: F) -> Self
    where
        F: Fn(T) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let worker = thread::Builder::new()
            .name("search-debounce".into())
            .spawn(move || run(rx, delay, on_fire))
            .ok();

        if worker.is_none() {
            error!("failed to spawn debounce worker");
        }

        Self { tx, worker }
    }

    /// Replace any pending value and restart the delay.
    pub fn schedule(&self, value: T) {
        self.send(Msg::Schedule(value));
    }

    /// Drop any pending value and fire `value` right away.
    pub fn fire_now(&self, value: T) {
        self.send(Msg::Now(value));
    }

    /// False when the worker is gone and the message was dropped.
    fn send(&self, msg: Msg<T>) -> bool {
        if self.tx.send(msg).is_err() {
            warn!("debounce worker not running, dropping request");
            return false;
        }
        true
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let _ = self.tx.send(Msg::Shutdown);
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

fn run<T, F>(rx: Receiver<Msg<T>>, delay: Duration, on_fire: F)
where
    F: Fn(T),
{
    let mut pending: Option<(T, Instant)> = None;

    loop {
        let deadline = pending.as_ref().map(|(_, at)| *at);
        let msg = match deadline {
            None => match rx.recv() {
                Ok(msg) => msg,
                Err(_) => return,
            },
            Some(deadline) => {
                let wait = deadline.saturating_duration_since(Instant::now());
                match rx.recv_timeout(wait) {
                    Ok(msg) => msg,
                    Err(RecvTimeoutError::Timeout) => {
                        if let Some((value, _)) = pending.take() {
                            on_fire(value);
                        }
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => return,
                }
            }
        };

        match msg {
            Msg::Schedule(value) => {
                if pending.is_some() {
                    debug!("debounce timer superseded");
                }
                pending = Some((value, Instant::now() + delay));
            }
            Msg::Now(value) => {
                pending = None;
                on_fire(value);
            }
            Msg::Shutdown => return,
        }
    }
}
