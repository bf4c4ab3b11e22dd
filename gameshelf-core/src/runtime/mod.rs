//! Tokio driver for a shelf
//!
//! [`ShelfRuntime`] owns one [`ShelfModel`] and processes messages strictly
//! one at a time, so all state changes stay on a single logical thread. Each
//! requested timer becomes a spawned sleep that posts its expiry back through
//! the same channel. The runtime aborts those tasks as soon as the model no
//! longer waits for them; the model's token check covers any expiry that was
//! already queued. Timer tasks only hold a weak sender, so dropping every
//! [`ShelfHandle`] stops the runtime.

use std::collections::HashMap;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant as TokioInstant;

use crate::shelf::{
    ShelfDirectives, ShelfHost, ShelfMessage, ShelfModel, TimerKind,
    TimerRequest, TimerToken, update,
};

/// Sending half used by the host and the rendering layer.
#[derive(Debug, Clone)]
pub struct ShelfHandle {
    tx: mpsc::UnboundedSender<ShelfMessage>,
    directives: watch::Receiver<ShelfDirectives>,
}

/// The runtime has stopped and no longer accepts messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("shelf runtime has stopped")]
pub struct RuntimeStopped;

impl ShelfHandle {
    /// Queue a message for the runtime.
    pub fn send(&self, message: ShelfMessage) -> Result<(), RuntimeStopped> {
        self.tx.send(message).map_err(|_| RuntimeStopped)
    }

    /// Ask the runtime to unmount the shelf and stop.
    pub fn unmount(&self) -> Result<(), RuntimeStopped> {
        self.send(ShelfMessage::Unmount)
    }

    /// Latest visual directives; updated after every processed message.
    pub fn subscribe(&self) -> watch::Receiver<ShelfDirectives> {
        self.directives.clone()
    }
}

struct ArmedTimer {
    token: TimerToken,
    task: JoinHandle<()>,
}

/// Single-owner driver for one mounted shelf.
pub struct ShelfRuntime<H> {
    model: ShelfModel,
    host: H,
    rx: mpsc::UnboundedReceiver<ShelfMessage>,
    /// Weak so that timer tasks never keep the channel open on their own.
    tx: mpsc::WeakUnboundedSender<ShelfMessage>,
    directives: watch::Sender<ShelfDirectives>,
    timers: HashMap<TimerKind, ArmedTimer>,
}

impl<H> std::fmt::Debug for ShelfRuntime<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShelfRuntime")
            .field("model", &self.model)
            .field("armed_timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl<H: ShelfHost> ShelfRuntime<H> {
    /// Wrap `model`; the returned handle feeds it messages.
    pub fn new(model: ShelfModel, host: H) -> (Self, ShelfHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (directives_tx, directives_rx) =
            watch::channel(model.directives(now()));
        let runtime = Self {
            model,
            host,
            rx,
            tx: tx.downgrade(),
            directives: directives_tx,
            timers: HashMap::new(),
        };
        let handle = ShelfHandle {
            tx,
            directives: directives_rx,
        };
        (runtime, handle)
    }

    /// Process messages until [`ShelfMessage::Unmount`] arrives or every
    /// handle is dropped. Returns the final model and the host.
    pub async fn run(mut self) -> (ShelfModel, H) {
        while let Some(message) = self.rx.recv().await {
            if self.handle(message) {
                break;
            }
        }
        self.model.unmount();
        self.abort_all();
        log::debug!("Shelf runtime stopped");
        (self.model, self.host)
    }

    /// Returns true when the runtime should stop.
    fn handle(&mut self, message: ShelfMessage) -> bool {
        if let ShelfMessage::TimerExpired { kind, token } = &message
            && self.timers.get(kind).is_some_and(|t| t.token == *token)
        {
            self.timers.remove(kind);
        }

        let outcome = update(&mut self.model, message, now());

        for request in outcome.timers {
            self.arm(request);
        }
        self.reconcile_long_press();

        for signal in outcome.signals {
            log::debug!("Shelf signal {signal:?}");
            self.host.dispatch(signal);
        }

        self.directives.send_replace(self.model.directives(now()));
        outcome.unmounted
    }

    fn arm(&mut self, request: TimerRequest) {
        let tx = self.tx.clone();
        let deadline = TokioInstant::from_std(request.deadline);
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(ShelfMessage::TimerExpired {
                    kind: request.kind,
                    token: request.token,
                });
            }
        });
        let armed = ArmedTimer {
            token: request.token,
            task,
        };
        if let Some(previous) = self.timers.insert(request.kind, armed) {
            previous.task.abort();
        }
    }

    /// Abort the long-press sleep once the model stops waiting for it
    /// (release, drag, cancellation, collection replace).
    fn reconcile_long_press(&mut self) {
        let pending = self.model.pending_long_press();
        let stale = self
            .timers
            .get(&TimerKind::LongPress)
            .is_some_and(|armed| Some(armed.token) != pending);
        if stale && let Some(armed) = self.timers.remove(&TimerKind::LongPress)
        {
            log::debug!("Aborting long-press timer {:?}", armed.token);
            armed.task.abort();
        }
    }

    fn abort_all(&mut self) {
        for (_, armed) in self.timers.drain() {
            armed.task.abort();
        }
    }
}

fn now() -> std::time::Instant {
    TokioInstant::now().into_std()
}
