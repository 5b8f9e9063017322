//! Event channel between collaborators and the dispatcher

use std::sync::mpsc;
use std::time::Duration;

use tracing::debug;

use super::Event;

/// Cloneable handle for posting events from any thread
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<Event>,
}

impl EventSender {
    /// Queue an event. Returns false if the dispatcher is gone.
    pub fn send(&self, event: Event) -> bool {
        match self.tx.send(event) {
            Ok(()) => true,
            Err(mpsc::SendError(event)) => {
                debug!("Dispatcher dropped, discarding {}", event.name());
                false
            }
        }
    }
}

/// Receiving end, owned by the dispatcher
#[derive(Debug)]
pub(crate) struct EventQueue {
    tx: mpsc::Sender<Event>,
    rx: mpsc::Receiver<Event>,
}

impl EventQueue {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub(crate) fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    pub(crate) fn try_next(&self) -> Option<Event> {
        self.rx.try_recv().ok()
    }

    pub(crate) fn next_timeout(&self, timeout: Duration) -> Option<Event> {
        self.rx.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_arrive_in_order() {
        let queue = EventQueue::new();
        let sender = queue.sender();
        assert!(sender.send(Event::ToggleLight));
        assert!(sender.clone().send(Event::Render));

        assert!(matches!(queue.try_next(), Some(Event::ToggleLight)));
        assert!(matches!(queue.try_next(), Some(Event::Render)));
        assert!(queue.try_next().is_none());
    }

    #[test]
    fn test_send_from_thread() {
        let queue = EventQueue::new();
        let sender = queue.sender();
        std::thread::spawn(move || sender.send(Event::ToggleOpacity))
            .join()
            .unwrap();
        assert!(matches!(
            queue.next_timeout(Duration::from_secs(1)),
            Some(Event::ToggleOpacity)
        ));
    }

    #[test]
    fn test_send_after_drop() {
        let queue = EventQueue::new();
        let sender = queue.sender();
        drop(queue);
        assert!(!sender.send(Event::Render));
    }
}
