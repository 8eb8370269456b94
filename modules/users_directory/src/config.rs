use serde::{Deserialize, Serialize};

use crate::domain::pagination::DEFAULT_USERS_PER_PAGE;

/// Configuration for the users_directory module (`modules.users_directory`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct UsersDirectoryConfig {
    /// Base URL of the REST service exposing `/users`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Fixed page size used by the pagination view.
    #[serde(default = "default_users_per_page")]
    pub users_per_page: usize,
    /// Request timeout in seconds; 0 keeps the transport default.
    #[serde(default)]
    pub timeout_sec: u64,
    /// Capacity of the state-change broadcast channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for UsersDirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            users_per_page: default_users_per_page(),
            timeout_sec: 0,
            event_buffer: default_event_buffer(),
        }
    }
}

fn default_base_url() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

fn default_users_per_page() -> usize {
    DEFAULT_USERS_PER_PAGE
}

fn default_event_buffer() -> usize {
    64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_section_fills_defaults() {
        let cfg: UsersDirectoryConfig =
            serde_json::from_value(serde_json::json!({"users_per_page": 10})).unwrap();
        assert_eq!(cfg.users_per_page, 10);
        assert_eq!(cfg.base_url, "https://jsonplaceholder.typicode.com");
        assert_eq!(cfg.timeout_sec, 0);
        assert_eq!(cfg.event_buffer, 64);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res: Result<UsersDirectoryConfig, _> =
            serde_json::from_value(serde_json::json!({"page_size": 10}));
        assert!(res.is_err());
    }
}
