use crate::contract::error::OperationKind;
use crate::contract::model::UserId;

/// State-changed notification published by the store after every mutation
/// of its observable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Loaded { count: usize },
    Added { id: UserId },
    Updated { id: UserId },
    Removed { id: UserId },
    EditStarted { id: UserId },
    EditCancelled,
    Failed { kind: OperationKind },
}
