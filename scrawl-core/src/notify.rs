//! # Notifications
//!
//! Canvases announce clears and undos to whoever is interested. Observers register with a
//! [`Notifier`], which can deliver an event in one of two ways:
//!
//! * [`Notifier::post_now`] calls every observer before returning, on the caller's thread.
//! * [`Notifier::post_to_main`] only queues the event. It reaches observers when the owner of the
//!   main context next calls [`Notifier::pump_main`], never before the posting call returns.
//!
//! Delivery is fire-and-forget: posting never fails, and an event posted with nobody listening is
//! simply dropped.

use std::sync::Arc;

/// Name of the event posted when a canvas is emptied.
pub const CANVAS_DID_CLEAR: &str = "scrawl.canvas-did-clear";
/// Name of the event posted when a stroke is undone.
pub const CANVAS_DID_UNDO: &str = "scrawl.canvas-did-undo";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    CanvasCleared {
        /// Index of the canvas which was cleared.
        canvas: i64,
    },
    CanvasUndo {
        canvas: i64,
        /// Label of the undone stroke's tool.
        undo_name: String,
    },
}
impl Event {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::CanvasCleared { .. } => CANVAS_DID_CLEAR,
            Self::CanvasUndo { .. } => CANVAS_DID_UNDO,
        }
    }
    /// Index of the canvas which posted this event.
    #[must_use]
    pub fn source(&self) -> i64 {
        match self {
            Self::CanvasCleared { canvas } | Self::CanvasUndo { canvas, .. } => *canvas,
        }
    }
    /// Extra, human-readable detail, if the event carries any.
    #[must_use]
    pub fn info(&self) -> Option<&str> {
        match self {
            Self::CanvasCleared { .. } => None,
            Self::CanvasUndo { undo_name, .. } => Some(undo_name),
        }
    }
}

pub trait Observer: Send + Sync {
    fn notify(&self, event: &Event);
}
/// Closures make fine observers.
impl<F> Observer for F
where
    F: Fn(&Event) + Send + Sync,
{
    fn notify(&self, event: &Event) {
        self(event);
    }
}

/// Returned by [`Notifier::subscribe`], used to unsubscribe later.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Subscription(u64);

struct NotifierInner {
    observers: parking_lot::RwLock<Vec<(Subscription, Arc<dyn Observer>)>>,
    next_subscription: std::sync::atomic::AtomicU64,
    main_send: crossbeam::channel::Sender<Event>,
    main_recv: crossbeam::channel::Receiver<Event>,
}

/// A shared handle onto a set of observers. Clones post to the same observers and queue.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<NotifierInner>,
}
impl Default for Notifier {
    fn default() -> Self {
        let (main_send, main_recv) = crossbeam::channel::unbounded();
        Self {
            inner: Arc::new(NotifierInner {
                observers: parking_lot::RwLock::default(),
                next_subscription: 0.into(),
                main_send,
                main_recv,
            }),
        }
    }
}
impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("observers", &self.inner.observers.read().len())
            .field("pending", &self.inner.main_recv.len())
            .finish()
    }
}
impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    pub fn subscribe(&self, observer: impl Observer + 'static) -> Subscription {
        let subscription = Subscription(
            self.inner
                .next_subscription
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed),
        );
        self.inner
            .observers
            .write()
            .push((subscription, Arc::new(observer)));
        subscription
    }
    /// Stop delivering to an observer. Returns false if it was not subscribed.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut observers = self.inner.observers.write();
        let before = observers.len();
        observers.retain(|(sub, _)| *sub != subscription);
        observers.len() != before
    }
    /// Deliver to every observer before returning.
    pub fn post_now(&self, event: &Event) {
        // Snapshot, so observers may (un)subscribe from within `notify` without deadlocking.
        let observers: Vec<_> = self
            .inner
            .observers
            .read()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        log::trace!("posting {} to {} observers", event.name(), observers.len());
        for observer in observers {
            observer.notify(event);
        }
    }
    /// Queue for delivery on the main context. See [`Notifier::pump_main`].
    ///
    /// Dropped right away if nobody is subscribed, so an unpumped notifier without observers
    /// never builds a backlog. Observers subscribed later do not see it.
    pub fn post_to_main(&self, event: Event) {
        if self.inner.observers.read().is_empty() {
            log::trace!("no observers, dropping {}", event.name());
            return;
        }
        // Both ends live in `inner`, so the channel can't be disconnected while we hold it.
        if self.inner.main_send.send(event).is_err() {
            log::debug!("main queue closed, dropping event");
        }
    }
    /// Deliver every event queued by [`Notifier::post_to_main`], in posting order.
    /// Call this from the main context. Returns how many were delivered.
    pub fn pump_main(&self) -> usize {
        let mut delivered = 0;
        while let Ok(event) = self.inner.main_recv.try_recv() {
            self.post_now(&event);
            delivered += 1;
        }
        delivered
    }
    /// Number of events waiting for [`Notifier::pump_main`].
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.main_recv.len()
    }
}
