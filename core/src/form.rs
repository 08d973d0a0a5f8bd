//! Form state for the create-post form.
//!
//! Every field is always present and holds a plain string. Host input
//! events address fields by their input name through
//! [`FormState::set_field_by_name`]; Rust callers use the typed
//! [`FormField`] key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// The three inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    UserId,
    Title,
    Body,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::UserId, FormField::Title, FormField::Body];

    /// The input name, which is also the JSON key on the wire.
    pub fn name(self) -> &'static str {
        match self {
            FormField::UserId => "userId",
            FormField::Title => "title",
            FormField::Body => "body",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// Current values of the form, also the JSON payload of the POST.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(rename = "userId", default)]
    pub user_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl FormState {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::UserId => &self.user_id,
            FormField::Title => &self.title,
            FormField::Body => &self.body,
        }
    }

    /// Overwrite one field with `value`. No validation is applied.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::UserId => &mut self.user_id,
            FormField::Title => &mut self.title,
            FormField::Body => &mut self.body,
        };
        *slot = value.into();
    }

    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field: FormField = name.parse()?;
        self.set_field(field, value);
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
