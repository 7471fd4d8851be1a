//! Notifications a [`Store`](crate::store::Store) sends to its subscribers

use std::fmt::{Display, Error, Formatter};

/// What happened to the data of a store.
///
/// `generation` identifies the refresh or mutation the event is about. Generations only grow.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreEvent {
    /// Nothing has been fetched yet
    Idle,
    /// A refresh has started
    Loading { generation: u64 },
    /// The snapshot has been replaced
    Updated { generation: u64 },
    /// A refresh or a mutation failed. `message` is meant to be shown to the user.
    /// The previous snapshot is still valid.
    Failed { generation: u64, message: String },
}

impl StoreEvent {
    pub fn is_failure(&self) -> bool {
        match self {
            StoreEvent::Failed { .. } => true,
            _ => false,
        }
    }
}

impl Display for StoreEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            StoreEvent::Idle => write!(f, "Not loaded yet"),
            StoreEvent::Loading { generation } => write!(f, "Loading (#{})...", generation),
            StoreEvent::Updated { generation } => write!(f, "Up to date (#{})", generation),
            StoreEvent::Failed { message, .. } => write!(f, "{}", message),
        }
    }
}

impl Default for StoreEvent {
    fn default() -> Self {
        Self::Idle
    }
}


/// See [`event_channel`]
pub type EventSender = tokio::sync::watch::Sender<StoreEvent>;
/// See [`event_channel`]
pub type EventReceiver = tokio::sync::watch::Receiver<StoreEvent>;

/// Create a channel that always holds the latest event of a store
pub fn event_channel() -> (EventSender, EventReceiver) {
    tokio::sync::watch::channel(StoreEvent::default())
}
