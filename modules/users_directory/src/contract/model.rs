use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Server-assigned user identifier. The fixture API uses integers, other
/// backends may hand out strings; both are accepted on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(u64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for UserId {
    type Err = std::convert::Infallible;

    /// Numeric input becomes `Number`, anything else is kept as `Text`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(s.parse::<u64>()
            .map(Self::Number)
            .unwrap_or_else(|_| Self::Text(s.to_string())))
    }
}

impl From<u64> for UserId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
}

/// A user record as exchanged with the REST service.
/// Extra wire fields (username, address, phone, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub company: Company,
}

impl User {
    /// Text before the first space, or the whole name.
    pub fn first_name(&self) -> &str {
        split_name(&self.name).0
    }

    /// Text after the first space, empty when the name has no space.
    pub fn last_name(&self) -> &str {
        split_name(&self.name).1
    }

    /// Department is carried as the company name.
    pub fn department(&self) -> &str {
        &self.company.name
    }
}

/// Data for creating a new user; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub company: Company,
}

impl NewUser {
    /// Attach the id handed back by the server.
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            company: self.company,
        }
    }
}

/// Split a display name on its first space.
pub fn split_name(name: &str) -> (&str, &str) {
    name.split_once(' ').unwrap_or((name, ""))
}
