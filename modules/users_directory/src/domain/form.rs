use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::contract::model::{split_name, Company, NewUser, User, UserId};
use crate::domain::store::UserStore;

/// Whether the form creates a new user or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Adding,
    Editing,
}

/// Editable fields of the add/edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Id,
    FirstName,
    LastName,
    Email,
    Department,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown form field: '{0}'")]
    UnknownField(String),
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "firstName" | "first_name" | "first" => Ok(Self::FirstName),
            "lastName" | "last_name" | "last" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            "department" | "dept" => Ok(Self::Department),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Id => "id",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Department => "department",
        })
    }
}

/// Raw field values, kept verbatim until submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
}

impl FormFields {
    fn from_user(user: &User) -> Self {
        let (first, last) = split_name(&user.name);
        Self {
            id: user.id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: user.email.clone(),
            department: user.company.name.clone(),
        }
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Id => &mut self.id,
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Email => &mut self.email,
            FormField::Department => &mut self.department,
        }
    }
}

/// Record produced by a form submission, ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(NewUser),
    Update(User),
}

/// Owns the form fields; the adding/editing mode is read from the store's
/// edit marker so that a successful update switches the form back to adding.
pub struct UserFormController {
    store: Arc<UserStore>,
    fields: FormFields,
    source_id: Option<UserId>,
}

impl UserFormController {
    pub fn new(store: Arc<UserStore>) -> Self {
        Self {
            store,
            fields: FormFields::default(),
            source_id: None,
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn mode(&self) -> FormMode {
        if self.store.is_editing() {
            FormMode::Editing
        } else {
            FormMode::Adding
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode() {
            FormMode::Adding => "Add User",
            FormMode::Editing => "Update User",
        }
    }

    /// Load `user` into the fields and switch to editing.
    pub fn begin_edit(&mut self, user: &User) {
        self.fields = FormFields::from_user(user);
        self.source_id = Some(user.id.clone());
        self.store.begin_edit(user.clone());
    }

    /// Abandon the current edit: clear the fields and return to adding.
    pub fn cancel_edit(&mut self) {
        self.fields = FormFields::default();
        self.source_id = None;
        self.store.cancel_edit();
    }

    /// Set one field verbatim.
    pub fn on_field_change(&mut self, field: FormField, value: impl Into<String>) {
        *self.fields.slot(field) = value.into();
    }

    /// Build the record from the current fields and clear them.
    ///
    /// Fields are cleared here, before the store call resolves. In editing mode
    /// the id is the one remembered from `begin_edit`, falling back to the
    /// store's edit marker when the form was already cleared by an earlier
    /// submission whose update failed.
    pub fn submit(&mut self) -> Submission {
        let fields = std::mem::take(&mut self.fields);
        let source_id = self.source_id.take();

        let name = format!("{} {}", fields.first_name, fields.last_name);
        let company = Company {
            name: fields.department,
        };

        let editing_id = match self.mode() {
            FormMode::Adding => None,
            FormMode::Editing => source_id.or_else(|| self.store.editing().map(|u| u.id)),
        };

        match editing_id {
            Some(id) => {
                debug!(user_id = %id, "Form submitted for update");
                Submission::Update(User {
                    id,
                    name,
                    email: fields.email,
                    company,
                })
            }
            None => {
                debug!("Form submitted for creation");
                Submission::Create(NewUser {
                    name,
                    email: fields.email,
                    company,
                })
            }
        }
    }
}

impl fmt::Debug for UserFormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserFormController")
            .field("fields", &self.fields)
            .field("source_id", &self.source_id)
            .field("mode", &self.mode())
            .finish()
    }
}
