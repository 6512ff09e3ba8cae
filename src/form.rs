//! Creation form: draft state, validation and reset.
//!
//! The form never sees the user list. It produces a trimmed [`UserDraft`] when
//! validation passes and is told afterwards whether the create call succeeded.
use chrono::NaiveDate;
use tracing::debug;

use crate::error::FetchError;
use crate::model::{Field, FieldErrors, ISO_DATE, UserDraft};

pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 150;
/// Digits accepted in the age input; enough for `MAX_AGE`.
pub const AGE_MAX_DIGITS: usize = 3;

pub const FIRSTNAME_REQUIRED: &str = "First name is required";
pub const LASTNAME_REQUIRED: &str = "Last name is required";
pub const AGE_OUT_OF_RANGE: &str = "Age must be between 1 and 150";
pub const DATE_REQUIRED: &str = "Date of birth is required";
pub const DATE_INVALID: &str = "Date of birth must be a valid date (YYYY-MM-DD)";

/// Check every rule and return all failures at once.
pub fn validate(draft: &UserDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.firstname.trim().is_empty() {
        errors.insert(Field::Firstname, FIRSTNAME_REQUIRED);
    }
    if draft.lastname.trim().is_empty() {
        errors.insert(Field::Lastname, LASTNAME_REQUIRED);
    }
    if !(MIN_AGE..=MAX_AGE).contains(&draft.age) {
        errors.insert(Field::Age, AGE_OUT_OF_RANGE);
    }
    if draft.date_of_birth.is_empty() {
        errors.insert(Field::DateOfBirth, DATE_REQUIRED);
    } else if NaiveDate::parse_from_str(&draft.date_of_birth, ISO_DATE).is_err() {
        errors.insert(Field::DateOfBirth, DATE_INVALID);
    }
    errors
}

#[derive(Clone, Debug, Default)]
pub struct CreationForm {
    pub draft: UserDraft,
    pub errors: FieldErrors,
    pub focused: Field,
}

impl CreationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of a field as shown in its input. Age 0 shows as empty.
    pub fn field_text(&self, field: Field) -> String {
        match field {
            Field::Firstname => self.draft.firstname.clone(),
            Field::Lastname => self.draft.lastname.clone(),
            Field::Age => {
                if self.draft.age == 0 {
                    String::new()
                } else {
                    self.draft.age.to_string()
                }
            }
            Field::DateOfBirth => self.draft.date_of_birth.clone(),
        }
    }

    /// Replace a field's value and drop its error, without re-validating.
    pub fn set_field(&mut self, field: Field, value: &str) {
        match field {
            Field::Firstname => self.draft.firstname = value.to_string(),
            Field::Lastname => self.draft.lastname = value.to_string(),
            Field::Age => self.draft.age = value.trim().parse().unwrap_or(0),
            Field::DateOfBirth => self.draft.date_of_birth = value.to_string(),
        }
        self.errors.clear(field);
    }

    /// Type one character into the focused field. Age only accepts up to
    /// [`AGE_MAX_DIGITS`] digits.
    pub fn push_char(&mut self, c: char) {
        let field = self.focused;
        let mut text = self.field_text(field);
        if field == Field::Age && (!c.is_ascii_digit() || text.len() >= AGE_MAX_DIGITS) {
            return;
        }
        text.push(c);
        self.set_field(field, &text);
    }

    pub fn pop_char(&mut self) {
        let field = self.focused;
        let mut text = self.field_text(field);
        text.pop();
        self.set_field(field, &text);
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    /// Validate and, if clean, return the draft with trimmed names.
    ///
    /// On failure the errors are stored on the form and `None` is returned;
    /// the draft itself is left as typed.
    pub fn submit(&mut self) -> Option<UserDraft> {
        self.errors = validate(&self.draft);
        if !self.errors.is_empty() {
            debug!(errors = self.errors.len(), "form validation failed");
            return None;
        }
        Some(UserDraft {
            firstname: self.draft.firstname.trim().to_string(),
            lastname: self.draft.lastname.trim().to_string(),
            ..self.draft.clone()
        })
    }

    /// Result of the create call: success resets the form, failure keeps it.
    pub fn complete(&mut self, result: Result<(), FetchError>) {
        match result {
            Ok(()) => *self = Self::default(),
            Err(e) => debug!(error = %e, "create failed; keeping draft"),
        }
    }
}
