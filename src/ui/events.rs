use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

use crate::query::{QuerySettled, SettleNotifier};

/// Everything the UI loop reacts to, from the terminal and from the
/// fetch tasks.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
    /// A query fetch finished on the runtime.
    QuerySettled(QuerySettled),
}

pub struct EventHandler {
    rx: Receiver<AppEvent>,
    tx: Sender<AppEvent>,
    stop: Arc<AtomicBool>,
    reader: Option<JoinHandle<()>>,
}

impl EventHandler {
    /// Start the terminal reader thread. A `Tick` is sent whenever no input
    /// arrived for `tick_rate`.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));

        let event_tx = tx.clone();
        let stop_flag = Arc::clone(&stop);
        let reader = thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                let ready = match event::poll(tick_rate) {
                    Ok(ready) => ready,
                    Err(err) => {
                        tracing::error!(error = %err, "Terminal poll failed");
                        break;
                    }
                };
                let app_event = if !ready {
                    AppEvent::Tick
                } else {
                    match event::read() {
                        Ok(Event::Key(key)) => AppEvent::Key(key),
                        Ok(Event::Resize(cols, rows)) => AppEvent::Resize(cols, rows),
                        Ok(_) => continue,
                        Err(err) => {
                            tracing::error!(error = %err, "Terminal read failed");
                            break;
                        }
                    }
                };
                if event_tx.send(app_event).is_err() {
                    break;
                }
            }
        });

        Self {
            rx,
            tx,
            stop,
            reader: Some(reader),
        }
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }

    /// Callback for the query cache: posts completions into this loop.
    pub fn notifier(&self) -> SettleNotifier {
        settle_notifier(self.sender())
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
    }
}

/// Wrap `tx` so fetch tasks can report into the UI loop. A closed loop
/// means the app is exiting; late completions are dropped.
pub fn settle_notifier(tx: Sender<AppEvent>) -> SettleNotifier {
    let tx = parking_lot::Mutex::new(tx);
    Arc::new(move |settled: QuerySettled| {
        if tx.lock().send(AppEvent::QuerySettled(settled)).is_err() {
            tracing::debug!("Event loop gone, dropping query result");
        }
    })
}
