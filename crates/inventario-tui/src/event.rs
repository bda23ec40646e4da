//! Event system: crossterm event reader running in a background tokio task.
//!
//! Produces terminal events (key, mouse, resize) plus a render tick via
//! `tokio::sync::mpsc`.

use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Mouse button presses only; motion and scroll are dropped.
    Mouse(MouseEvent),
    Resize(u16, u16),
    Render,
}

/// Reads terminal events in a background task and sends them over a channel.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    pub fn new(render_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let task_cancel = cancel.clone();
        tokio::spawn(async move {
            let mut event_stream = EventStream::new();
            let mut render_interval = tokio::time::interval(render_rate);
            render_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                let event = tokio::select! {
                    () = task_cancel.cancelled() => break,

                    _ = render_interval.tick() => Event::Render,

                    Some(Ok(crossterm_event)) = event_stream.next() => {
                        match crossterm_event {
                            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                                Event::Key(key)
                            }
                            CrosstermEvent::Mouse(mouse)
                                if matches!(mouse.kind, MouseEventKind::Down(_)) =>
                            {
                                Event::Mouse(mouse)
                            }
                            CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
                            _ => continue,
                        }
                    }
                };

                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, cancel }
    }

    /// Receive the next event. Returns `None` if the reader has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
