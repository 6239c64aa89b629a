// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::cell::RefCell;
use std::rc::Rc;

/// One subscriber's single-slot mailbox.
///
/// The publisher keeps its own clone of the receiver so it can drain a stale
/// event before delivering the new one.
struct Mailbox<T> {
    sender: flume::Sender<T>,
    drain: flume::Receiver<T>,
}

impl<T> Mailbox<T> {
    /// A mailbox is live while someone other than the publisher holds a receiver.
    fn is_connected(&self) -> bool {
        self.sender.receiver_count() > 1
    }

    fn deliver(&self, event: T) {
        // Drop-oldest: whatever is still unconsumed is replaced.
        while self.drain.try_recv().is_ok() {}
        if self.sender.try_send(event).is_err() {
            log::trace!("Mailbox rejected an event after draining.");
        }
    }
}

/// A single-threaded broadcast channel with latest-event-wins delivery.
///
/// Cloning the channel yields another handle to the same subscriber set, so
/// producers (input handlers, the frame pump) and consumers can each hold one.
///
/// - [`publish`](Self::publish) never blocks and never fails.
/// - [`subscribe`](Self::subscribe) only observes events published afterwards.
pub struct EventChannel<T: Clone> {
    mailboxes: Rc<RefCell<Vec<Mailbox<T>>>>,
}

impl<T: Clone> EventChannel<T> {
    /// Creates a channel with no subscribers.
    pub fn new() -> Self {
        Self {
            mailboxes: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Delivers `event` to every live subscriber, replacing any event still
    /// waiting in its mailbox. Subscribers that have been dropped are pruned.
    pub fn publish(&self, event: T) {
        let mut mailboxes = self.mailboxes.borrow_mut();
        mailboxes.retain(Mailbox::is_connected);
        log::trace!("Publishing an event to {} subscriber(s).", mailboxes.len());

        for mailbox in mailboxes.iter() {
            mailbox.deliver(event.clone());
        }
    }

    /// Registers a new subscriber. No previously published event is replayed.
    pub fn subscribe(&self) -> Subscription<T> {
        let (sender, receiver) = flume::bounded(1);
        self.mailboxes.borrow_mut().push(Mailbox {
            sender,
            drain: receiver.clone(),
        });
        Subscription { receiver }
    }

    /// Returns the number of subscribers that are still alive.
    pub fn subscriber_count(&self) -> usize {
        self.mailboxes
            .borrow()
            .iter()
            .filter(|mailbox| mailbox.is_connected())
            .count()
    }
}

impl<T: Clone> Clone for EventChannel<T> {
    fn clone(&self) -> Self {
        Self {
            mailboxes: Rc::clone(&self.mailboxes),
        }
    }
}

impl<T: Clone> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> std::fmt::Debug for EventChannel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// The receiving end of one subscription to an [`EventChannel`].
///
/// The sequence is not restartable: every event is handed out at most once.
#[derive(Debug)]
pub struct Subscription<T> {
    receiver: flume::Receiver<T>,
}

impl<T> Subscription<T> {
    /// Waits for the next event.
    ///
    /// Returns `None` once every handle to the channel has been dropped and
    /// the mailbox is empty.
    pub async fn recv(&mut self) -> Option<T> {
        self.receiver.recv_async().await.ok()
    }

    /// Takes the pending event, if any, without waiting.
    pub fn try_recv(&mut self) -> Option<T> {
        self.receiver.try_recv().ok()
    }
}
