use std::fmt;

use thiserror::Error;

/// The four remote operations the store performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Fetch,
    Add,
    Edit,
    Delete,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fetch => "fetch",
            Self::Add => "add",
            Self::Edit => "edit",
            Self::Delete => "delete",
        })
    }
}

/// User-facing store errors. The underlying cause is logged and dropped;
/// only a fixed message per operation survives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Failed to fetch users. Please try again later.")]
    FetchFailed,

    #[error("Failed to add user. Please try again.")]
    AddFailed,

    #[error("Failed to edit user. Please try again.")]
    EditFailed,

    #[error("Failed to delete user. Please try again.")]
    DeleteFailed,
}

impl StoreError {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::FetchFailed => OperationKind::Fetch,
            Self::AddFailed => OperationKind::Add,
            Self::EditFailed => OperationKind::Edit,
            Self::DeleteFailed => OperationKind::Delete,
        }
    }
}

impl From<OperationKind> for StoreError {
    fn from(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Fetch => Self::FetchFailed,
            OperationKind::Add => Self::AddFailed,
            OperationKind::Edit => Self::EditFailed,
            OperationKind::Delete => Self::DeleteFailed,
        }
    }
}
