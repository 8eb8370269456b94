use async_trait::async_trait;

use crate::contract::model::{NewUser, User, UserId};
use crate::domain::error::RemoteError;

/// Remote user collection: one method per REST call the store makes.
#[async_trait]
pub trait UsersRemote: Send + Sync {
    /// GET /users
    async fn list_users(&self) -> Result<Vec<User>, RemoteError>;
    /// POST /users, returning the id assigned by the server.
    async fn create_user(&self, new_user: &NewUser) -> Result<UserId, RemoteError>;
    /// PUT /users/{id} with the full record. Response body is ignored.
    async fn replace_user(&self, user: &User) -> Result<(), RemoteError>;
    /// DELETE /users/{id}. Response body is ignored.
    async fn delete_user(&self, id: &UserId) -> Result<(), RemoteError>;
}
