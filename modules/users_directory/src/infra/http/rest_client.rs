use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::contract::model::{NewUser, User, UserId};
use crate::domain::error::RemoteError;
use crate::domain::ports::UsersRemote;
use modkit_http::TracedClient;

/// Body of a successful create; only the assigned id is used.
#[derive(Debug, Deserialize)]
struct CreatedDto {
    id: UserId,
}

/// HTTP adapter implementing [`UsersRemote`] against a `/users` collection.
#[derive(Clone, Debug)]
pub struct HttpUsersClient {
    client: TracedClient,
    base: Url,
}

impl HttpUsersClient {
    pub fn new(client: TracedClient, base: Url) -> Self {
        Self { client, base }
    }

    /// `<base>/users[/<id>]`, keeping any path prefix present in the base URL.
    fn endpoint(&self, id: Option<&UserId>) -> Result<Url, RemoteError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| RemoteError::invalid_endpoint(format!("cannot-be-a-base URL: {}", self.base)))?;
            segments.pop_if_empty().push("users");
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        Ok(url)
    }
}

fn ensure_success(response: &reqwest::Response) -> Result<(), RemoteError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(RemoteError::status(status.as_u16()))
    }
}

fn transport(e: reqwest::Error) -> RemoteError {
    RemoteError::transport(e.to_string())
}

fn decode(e: reqwest::Error) -> RemoteError {
    RemoteError::decode(e.to_string())
}

#[async_trait]
impl UsersRemote for HttpUsersClient {
    #[instrument(name = "users_directory.http.list_users", skip_all, fields(base = %self.base))]
    async fn list_users(&self) -> Result<Vec<User>, RemoteError> {
        let url = self.endpoint(None)?;
        let response = self.client.get(url.as_str()).await.map_err(transport)?;
        ensure_success(&response)?;

        let users: Vec<User> = response.json().await.map_err(decode)?;
        debug!("Received {} users", users.len());
        Ok(users)
    }

    #[instrument(name = "users_directory.http.create_user", skip_all, fields(base = %self.base))]
    async fn create_user(&self, new_user: &NewUser) -> Result<UserId, RemoteError> {
        let url = self.endpoint(None)?;
        let response = self
            .client
            .post_json(url.as_str(), new_user)
            .await
            .map_err(transport)?;
        ensure_success(&response)?;

        let created: CreatedDto = response.json().await.map_err(decode)?;
        debug!(user_id = %created.id, "Server assigned id");
        Ok(created.id)
    }

    #[instrument(
        name = "users_directory.http.replace_user",
        skip_all,
        fields(base = %self.base, user_id = %user.id)
    )]
    async fn replace_user(&self, user: &User) -> Result<(), RemoteError> {
        let url = self.endpoint(Some(&user.id))?;
        let response = self
            .client
            .put_json(url.as_str(), user)
            .await
            .map_err(transport)?;
        ensure_success(&response)
    }

    #[instrument(
        name = "users_directory.http.delete_user",
        skip_all,
        fields(base = %self.base, user_id = %id)
    )]
    async fn delete_user(&self, id: &UserId) -> Result<(), RemoteError> {
        let url = self.endpoint(Some(id))?;
        let response = self.client.delete(url.as_str()).await.map_err(transport)?;
        ensure_success(&response)
    }
}
