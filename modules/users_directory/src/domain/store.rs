use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, instrument, warn};

use crate::contract::error::{OperationKind, StoreError};
use crate::contract::model::{NewUser, User, UserId};
use crate::domain::error::RemoteError;
use crate::domain::events::StoreEvent;
use crate::domain::form::Submission;
use crate::domain::ports::{EventPublisher, UsersRemote};

#[derive(Debug, Default)]
struct StoreState {
    users: Vec<User>,
    editing: Option<User>,
    last_error: Option<StoreError>,
}

/// One gate per operation kind: a second call of the same kind waits for the
/// first to finish. Calls of different kinds still overlap.
#[derive(Debug, Default)]
struct InFlight {
    fetch: AsyncMutex<()>,
    add: AsyncMutex<()>,
    edit: AsyncMutex<()>,
    delete: AsyncMutex<()>,
}

impl InFlight {
    fn gate(&self, kind: OperationKind) -> &AsyncMutex<()> {
        match kind {
            OperationKind::Fetch => &self.fetch,
            OperationKind::Add => &self.add,
            OperationKind::Edit => &self.edit,
            OperationKind::Delete => &self.delete,
        }
    }
}

/// Single source of truth for the user list, the user being edited and the
/// last operation error.
///
/// Every remote operation performs exactly one call through [`UsersRemote`]
/// and only touches local state once that call has resolved. Local state is a
/// best-effort mirror of the remote collection; nothing is rolled back.
pub struct UserStore {
    remote: Arc<dyn UsersRemote>,
    events: Arc<dyn EventPublisher<StoreEvent>>,
    state: Mutex<StoreState>,
    in_flight: InFlight,
}

impl UserStore {
    pub fn new(
        remote: Arc<dyn UsersRemote>,
        events: Arc<dyn EventPublisher<StoreEvent>>,
    ) -> Self {
        Self {
            remote,
            events,
            state: Mutex::new(StoreState::default()),
            in_flight: InFlight::default(),
        }
    }

    // --- snapshots ---

    /// Copy of the full list in its current order.
    pub fn users(&self) -> Vec<User> {
        self.state.lock().users.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().users.is_empty()
    }

    pub fn find(&self, id: &UserId) -> Option<User> {
        self.state.lock().users.iter().find(|u| &u.id == id).cloned()
    }

    /// The user currently being edited, if any.
    pub fn editing(&self) -> Option<User> {
        self.state.lock().editing.clone()
    }

    pub fn is_editing(&self) -> bool {
        self.state.lock().editing.is_some()
    }

    /// Most recent failure; cleared by the next successful remote operation.
    pub fn last_error(&self) -> Option<StoreError> {
        self.state.lock().last_error.clone()
    }

    // --- local transitions ---

    /// Mark `user` as the one being edited.
    #[instrument(name = "users_directory.store.begin_edit", skip_all, fields(user_id = %user.id))]
    pub fn begin_edit(&self, user: User) {
        let id = user.id.clone();
        self.state.lock().editing = Some(user);
        debug!("Edit started");
        self.events.publish(&StoreEvent::EditStarted { id });
    }

    /// Drop the edit marker without touching the list.
    #[instrument(name = "users_directory.store.cancel_edit", skip(self))]
    pub fn cancel_edit(&self) {
        if self.state.lock().editing.take().is_some() {
            debug!("Edit cancelled");
            self.events.publish(&StoreEvent::EditCancelled);
        }
    }

    // --- remote operations ---

    /// Replace the local list with the remote collection.
    #[instrument(name = "users_directory.store.load", skip(self))]
    pub async fn load(&self) -> Result<usize, StoreError> {
        let _gate = self.in_flight.gate(OperationKind::Fetch).lock().await;
        debug!("Fetching users");

        let users = self
            .remote
            .list_users()
            .await
            .map_err(|e| self.fail(OperationKind::Fetch, e))?;

        let count = users.len();
        {
            let mut st = self.state.lock();
            st.users = users;
            st.last_error = None;
        }

        info!("Loaded {} users", count);
        self.events.publish(&StoreEvent::Loaded { count });
        Ok(count)
    }

    /// Create a user remotely and append it locally with the server-assigned id.
    ///
    /// If the server hands back an id that is already present, the existing
    /// entry is replaced so ids stay unique.
    #[instrument(
        name = "users_directory.store.add",
        skip_all,
        fields(email = %new_user.email, name = %new_user.name)
    )]
    pub async fn add(&self, new_user: NewUser) -> Result<User, StoreError> {
        let _gate = self.in_flight.gate(OperationKind::Add).lock().await;
        info!("Adding user");

        let id = self
            .remote
            .create_user(&new_user)
            .await
            .map_err(|e| self.fail(OperationKind::Add, e))?;

        let user = new_user.with_id(id);
        {
            let mut st = self.state.lock();
            match st.users.iter_mut().find(|u| u.id == user.id) {
                Some(existing) => {
                    warn!(user_id = %user.id, "Server returned an id already in the list; replacing entry");
                    *existing = user.clone();
                }
                None => st.users.push(user.clone()),
            }
            st.last_error = None;
        }

        info!("Added user with id={}", user.id);
        self.events.publish(&StoreEvent::Added {
            id: user.id.clone(),
        });
        Ok(user)
    }

    /// Replace a user remotely, then locally by id, and leave edit mode.
    ///
    /// On failure the list and the edit marker are left untouched.
    #[instrument(name = "users_directory.store.update", skip_all, fields(user_id = %user.id))]
    pub async fn update(&self, user: User) -> Result<User, StoreError> {
        let _gate = self.in_flight.gate(OperationKind::Edit).lock().await;
        info!("Updating user");

        self.remote
            .replace_user(&user)
            .await
            .map_err(|e| self.fail(OperationKind::Edit, e))?;

        {
            let mut st = self.state.lock();
            if let Some(existing) = st.users.iter_mut().find(|u| u.id == user.id) {
                *existing = user.clone();
            } else {
                debug!("Updated user is not in the local list");
            }
            st.editing = None;
            st.last_error = None;
        }

        info!("Updated user");
        self.events.publish(&StoreEvent::Updated {
            id: user.id.clone(),
        });
        Ok(user)
    }

    /// Delete a user remotely, then drop it from the local list.
    #[instrument(name = "users_directory.store.remove", skip(self), fields(user_id = %id))]
    pub async fn remove(&self, id: UserId) -> Result<(), StoreError> {
        let _gate = self.in_flight.gate(OperationKind::Delete).lock().await;
        info!("Deleting user");

        self.remote
            .delete_user(&id)
            .await
            .map_err(|e| self.fail(OperationKind::Delete, e))?;

        {
            let mut st = self.state.lock();
            st.users.retain(|u| u.id != id);
            st.last_error = None;
        }

        info!("Deleted user");
        self.events.publish(&StoreEvent::Removed { id });
        Ok(())
    }

    /// Route a form submission to `add` or `update`.
    pub async fn submit(&self, submission: Submission) -> Result<User, StoreError> {
        match submission {
            Submission::Create(new_user) => self.add(new_user).await,
            Submission::Update(user) => self.update(user).await,
        }
    }

    /// Record a failed operation: log the cause, keep only the fixed message.
    fn fail(&self, kind: OperationKind, cause: RemoteError) -> StoreError {
        warn!(operation = %kind, error = %cause, "Remote call failed");
        let err = StoreError::from(kind);
        self.state.lock().last_error = Some(err.clone());
        self.events.publish(&StoreEvent::Failed { kind });
        err
    }
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let st = self.state.lock();
        f.debug_struct("UserStore")
            .field("users", &st.users.len())
            .field("editing", &st.editing.as_ref().map(|u| &u.id))
            .field("last_error", &st.last_error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::Company;
    use async_trait::async_trait;

    struct StaticRemote {
        users: Vec<User>,
        fail: bool,
    }

    #[async_trait]
    impl UsersRemote for StaticRemote {
        async fn list_users(&self) -> Result<Vec<User>, RemoteError> {
            if self.fail {
                return Err(RemoteError::status(500));
            }
            Ok(self.users.clone())
        }

        async fn create_user(&self, _new_user: &NewUser) -> Result<UserId, RemoteError> {
            if self.fail {
                return Err(RemoteError::transport("connection refused"));
            }
            Ok(UserId::Number(11))
        }

        async fn replace_user(&self, _user: &User) -> Result<(), RemoteError> {
            if self.fail {
                return Err(RemoteError::status(404));
            }
            Ok(())
        }

        async fn delete_user(&self, _id: &UserId) -> Result<(), RemoteError> {
            if self.fail {
                return Err(RemoteError::status(503));
            }
            Ok(())
        }
    }

    struct Silent;

    impl EventPublisher<StoreEvent> for Silent {
        fn publish(&self, _event: &StoreEvent) {}
    }

    fn user(id: u64, name: &str) -> User {
        User {
            id: UserId::Number(id),
            name: name.to_string(),
            email: format!("u{}@example.com", id),
            company: Company {
                name: "Acme".to_string(),
            },
        }
    }

    fn new_user(name: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: "n@example.com".to_string(),
            company: Company {
                name: "Eng".to_string(),
            },
        }
    }

    fn store(users: Vec<User>, fail: bool) -> UserStore {
        UserStore::new(Arc::new(StaticRemote { users, fail }), Arc::new(Silent))
    }

    #[tokio::test]
    async fn duplicate_server_id_keeps_ids_unique() {
        let s = store(vec![], false);
        s.add(new_user("First One")).await.unwrap();
        s.add(new_user("Second One")).await.unwrap();

        let users = s.users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Second One");
        assert_eq!(users[0].id, UserId::Number(11));
    }

    #[tokio::test]
    async fn update_of_unknown_id_changes_nothing_but_leaves_edit_mode() {
        let s = store(vec![user(1, "A B")], false);
        s.load().await.unwrap();
        s.begin_edit(user(1, "A B"));

        s.update(user(5, "Ghost User")).await.unwrap();
        assert_eq!(s.users(), vec![user(1, "A B")]);
        assert!(!s.is_editing());
    }

    #[tokio::test]
    async fn failed_load_on_empty_store_records_error() {
        let failing = store(vec![], true);
        assert_eq!(failing.load().await, Err(StoreError::FetchFailed));
        assert!(failing.is_empty());
        assert_eq!(failing.last_error(), Some(StoreError::FetchFailed));
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn failure_cause_is_logged_but_not_returned() {
        let s = store(vec![], true);
        let err = s.load().await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to fetch users. Please try again later.");
        assert!(logs_contain("Remote call failed"));
        assert!(logs_contain("Unexpected HTTP status 500"));
    }

    #[test]
    fn cancel_edit_clears_marker_only() {
        let s = store(vec![], false);
        s.begin_edit(user(3, "C D"));
        assert!(s.is_editing());

        s.cancel_edit();
        assert!(!s.is_editing());
        assert!(s.editing().is_none());

        // no-op when nothing is being edited
        s.cancel_edit();
        assert!(!s.is_editing());
    }

    #[tokio::test]
    async fn newer_error_overwrites_older_one() {
        let s = store(vec![], true);
        let _ = s.load().await;
        let _ = s.remove(UserId::Number(1)).await;
        assert_eq!(s.last_error(), Some(StoreError::DeleteFailed));
    }
}
