//! Data shapes exchanged with the UserBoard API and shared by the views.
//!
//! `User` and `UserDraft` serialize to exactly the JSON the API expects:
//! `{id, firstname, lastname, age, date_of_birth}` with `id` omitted for drafts.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// ISO-8601 calendar date layout used on the wire.
pub const ISO_DATE: &str = "%Y-%m-%d";

/// A persisted user. `id` is assigned by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub age: i64,
    pub date_of_birth: String,
}

impl User {
    /// "first last", as shown in the delete confirmation.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Form-local user without an id; the body of a create request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub firstname: String,
    pub lastname: String,
    pub age: i64,
    pub date_of_birth: String,
}

/// Body of a delete request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUser {
    pub id: i64,
}

/// Editable fields of a [`UserDraft`], in form order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    #[default]
    Firstname,
    Lastname,
    Age,
    DateOfBirth,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Firstname,
        Field::Lastname,
        Field::Age,
        Field::DateOfBirth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Firstname => "First Name",
            Field::Lastname => "Last Name",
            Field::Age => "Age",
            Field::DateOfBirth => "Date of Birth",
        }
    }

    /// Next field, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Field::Firstname => Field::Lastname,
            Field::Lastname => Field::Age,
            Field::Age => Field::DateOfBirth,
            Field::DateOfBirth => Field::Firstname,
        }
    }

    /// Previous field, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Field::Firstname => Field::DateOfBirth,
            Field::Lastname => Field::Firstname,
            Field::Age => Field::Lastname,
            Field::DateOfBirth => Field::Age,
        }
    }
}

/// Validation messages keyed by field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Drop the message for one field; returns whether there was one.
    pub fn clear(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Render an ISO date with a strftime pattern.
///
/// Input that is not an ISO date, or a pattern chrono cannot format, yields
/// the input unchanged.
pub fn format_date(iso: &str, pattern: &str) -> String {
    let Ok(d) = NaiveDate::parse_from_str(iso.trim(), ISO_DATE) else {
        return iso.to_string();
    };
    let mut out = String::new();
    match write!(out, "{}", d.format(pattern)) {
        Ok(()) => out,
        Err(_) => iso.to_string(),
    }
}
