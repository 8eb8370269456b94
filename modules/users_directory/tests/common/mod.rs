#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Value};
use users_directory::domain::events::StoreEvent;
use users_directory::domain::ports::EventPublisher;
use users_directory::model::{Company, User, UserId};

/// Records every published event for later inspection.
#[derive(Clone, Default)]
pub struct RecordingPublisher {
    events: Arc<Mutex<Vec<StoreEvent>>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<StoreEvent> {
        self.events.lock().clone()
    }
}

impl EventPublisher<StoreEvent> for RecordingPublisher {
    fn publish(&self, event: &StoreEvent) {
        self.events.lock().push(event.clone());
    }
}

pub fn user(id: u64) -> User {
    User {
        id: UserId::Number(id),
        name: format!("First{} Last{}", id, id),
        email: format!("user{}@example.com", id),
        company: Company {
            name: format!("Company {}", id),
        },
    }
}

/// Fixture payload shaped like the public fixture API, extra fields included.
pub fn users_payload(n: u64) -> Value {
    Value::Array(
        (1..=n)
            .map(|id| {
                json!({
                    "id": id,
                    "name": format!("First{} Last{}", id, id),
                    "username": format!("user{}", id),
                    "email": format!("user{}@example.com", id),
                    "address": {"street": "Kulas Light", "city": "Gwenborough"},
                    "phone": "1-770-736-8031",
                    "website": "hildegard.org",
                    "company": {
                        "name": format!("Company {}", id),
                        "catchPhrase": "Multi-layered client-server neural-net",
                        "bs": "harness real-time e-markets"
                    }
                })
            })
            .collect(),
    )
}
