//! # Change Notifications
//!
//! An actor given a [`Notifier`] publishes one [`Notification`] for every successful create,
//! update and delete. Any number of subscribers can listen; a subscriber that falls behind
//! loses the oldest events and sees `RecvError::Lagged`.
//!
//! ```rust
//! use registry_framework::notify::{ChangeKind, Notifier};
//!
//! let notifier = Notifier::new(16);
//! let mut events = notifier.subscribe();
//! notifier.publish(ChangeKind::Created, "projects/demo");
//!
//! let event = events.try_recv().unwrap();
//! assert_eq!(event.kind, ChangeKind::Created);
//! assert_eq!(event.name, "projects/demo");
//! ```

use tokio::sync::broadcast;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// One change to one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: ChangeKind,
    /// Resource name. Created and updated specs carry their revision name.
    pub name: String,
}

/// Cloneable publishing side of the change channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
}

impl Notifier {
    /// `capacity` is how many events a slow subscriber may lag behind before losing some.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn publish(&self, kind: ChangeKind, name: impl Into<String>) {
        let notification = Notification {
            kind,
            name: name.into(),
        };
        // Fails only when nobody is subscribed.
        if let Err(broadcast::error::SendError(dropped)) = self.sender.send(notification) {
            trace!(name = %dropped.name, "No subscribers");
        }
    }
}
