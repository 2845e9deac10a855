//! In-memory mail queue

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::communication::{
    mailer::{Headers, Mailer, Message},
    queue::{MailQueue, Priority, QueueError, QueuedEmail},
};

/// A message waiting in an [`InMemoryMailQueue`]
#[derive(Clone, Debug, PartialEq)]
pub struct QueueEntry {
    /// Identifier assigned on enqueue
    pub id: Uuid,

    /// When the message was enqueued
    pub queued_at: DateTime<Utc>,

    /// The queued message
    pub email: QueuedEmail,
}

/// Heap key: most urgent priority first, then oldest first.
#[derive(Debug)]
struct Pending {
    priority: Priority,
    sequence: u64,
    entry: QueueEntry,
}

impl Pending {
    fn key(&self) -> Reverse<(Priority, u64)> {
        Reverse((self.priority, self.sequence))
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[derive(Debug, Default)]
struct State {
    pending: BinaryHeap<Pending>,
    deferred: Vec<QueueEntry>,
    sequence: u64,
    closed: bool,
}

/// A bounded, priority-ordered queue held in process memory
///
/// Messages are dequeued most urgent first and oldest first within a priority.
/// Deferred messages are held but never dequeued.
#[derive(Debug, Clone)]
pub struct InMemoryMailQueue {
    capacity: usize,
    state: Arc<Mutex<State>>,
}

impl InMemoryMailQueue {
    /// Create a queue that holds at most `capacity` messages, deferred ones included
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    // Every mutation leaves the state consistent, so a panic elsewhere while
    // holding the lock does not invalidate it.
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take the most urgent message, if any
    pub fn dequeue(&self) -> Option<QueueEntry> {
        self.state().pending.pop().map(|pending| pending.entry)
    }

    /// Messages waiting for delivery, excluding deferred ones
    pub fn len(&self) -> usize {
        self.state().pending.len()
    }

    /// Whether no message is waiting for delivery
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Messages held back with [`Priority::Deferred`]
    pub fn deferred(&self) -> Vec<QueueEntry> {
        self.state().deferred.clone()
    }

    /// Stop accepting messages. Messages already queued can still be dequeued.
    pub fn close(&self) {
        self.state().closed = true;
    }

    /// Deliver every pending message through `mailer`, most urgent first
    ///
    /// A message the mailer rejects is moved to the deferred list and not retried.
    ///
    /// # Returns
    /// The number of messages delivered.
    pub async fn drain<M: Mailer>(&self, mailer: &M) -> usize {
        let mut sent = 0;

        while let Some(entry) = self.dequeue() {
            let message = Message {
                from: entry.email.from.clone(),
                to: entry.email.to.clone(),
                subject: entry.email.subject.clone(),
                plain_body: entry.email.plain_body.clone(),
                html_body: entry.email.html_body.clone(),
                headers: Headers::new(),
            };

            match mailer.send(&message).await {
                Ok(()) => {
                    debug!(id = %entry.id, "Delivered queued email");

                    sent += 1;
                }
                Err(e) => {
                    warn!(id = %entry.id, error = %e, "Could not deliver queued email, deferring it");

                    self.state().deferred.push(entry);
                }
            }
        }

        sent
    }
}

#[async_trait]
impl MailQueue for InMemoryMailQueue {
    async fn enqueue(&self, email: &QueuedEmail) -> Result<(), QueueError> {
        let mut state = self.state();

        if state.closed {
            return Err(QueueError::Unavailable);
        }

        if state.pending.len() + state.deferred.len() >= self.capacity {
            return Err(QueueError::Full {
                capacity: self.capacity,
            });
        }

        let entry = QueueEntry {
            id: Uuid::now_v7(),
            queued_at: Utc::now(),
            email: email.clone(),
        };

        debug!(id = %entry.id, priority = %email.priority, "Enqueued email");

        if email.priority == Priority::Deferred {
            state.deferred.push(entry);
        } else {
            state.sequence += 1;
            let sequence = state.sequence;

            state.pending.push(Pending {
                priority: email.priority,
                sequence,
                entry,
            });
        }

        Ok(())
    }
}
