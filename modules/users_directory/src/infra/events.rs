use tokio::sync::broadcast;

use crate::domain::events::StoreEvent;
use crate::domain::ports::EventPublisher;

/// Fans store events out to any number of front-end subscribers.
/// Bounded: slow subscribers miss the oldest events and see `Lagged`.
#[derive(Clone, Debug)]
pub struct BroadcastPublisher {
    tx: broadcast::Sender<StoreEvent>,
}

impl BroadcastPublisher {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }
}

impl EventPublisher<StoreEvent> for BroadcastPublisher {
    fn publish(&self, event: &StoreEvent) {
        // No subscribers is not an error.
        let _ = self.tx.send(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::UserId;

    #[test]
    fn every_subscriber_sees_each_event() {
        let publisher = BroadcastPublisher::new(8);
        let mut a = publisher.subscribe();
        let mut b = publisher.subscribe();

        publisher.publish(&StoreEvent::Removed {
            id: UserId::Number(7),
        });

        let expected = StoreEvent::Removed {
            id: UserId::Number(7),
        };
        assert_eq!(a.try_recv().unwrap(), expected);
        assert_eq!(b.try_recv().unwrap(), expected);
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let publisher = BroadcastPublisher::new(0);
        publisher.publish(&StoreEvent::Loaded { count: 0 });
    }
}
