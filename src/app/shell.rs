//! Shell operations over the canonical user list.
//!
//! Each operation is split in two: a begin half that flips loading flags and
//! returns the [`Request`] to dispatch, and [`AppState::apply`] which runs the
//! completion half once the [`Outcome`] arrives on the UI thread.
use tracing::{error, info};

use super::AppState;
use crate::api::worker::{Outcome, Request};
use crate::error::FetchError;
use crate::model::User;

pub const LOAD_FAILED: &str = "Failed to load users. Please refresh the list.";
pub const CREATE_FAILED: &str = "Failed to create user. Please try again.";

impl AppState {
    /// Start a full reload of the user list.
    pub fn refresh_users(&mut self) -> Request {
        self.list_loading = true;
        Request::ListUsers
    }

    /// Validate the form and start a create if it passes.
    ///
    /// Returns `None` when validation fails or a create is already in flight.
    pub fn submit_new_user(&mut self) -> Option<Request> {
        if self.create_loading {
            return None;
        }
        let draft = self.form.submit()?;
        self.create_loading = true;
        Some(Request::CreateUser(draft))
    }

    /// Start deleting a user. There is no loading flag for deletes.
    pub fn remove_user(&mut self, id: i64) -> Request {
        Request::DeleteUser { id }
    }

    /// Apply a finished request to state.
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Listed(result) => self.finish_refresh(result),
            Outcome::Created(result) => {
                let result = self.finish_create(result);
                self.form.complete(result);
            }
            Outcome::Deleted { id, result } => {
                let result = self.finish_remove(id, result);
                self.on_delete_finished(result);
            }
        }
    }

    fn finish_refresh(&mut self, result: Result<Vec<User>, FetchError>) {
        match result {
            Ok(users) => {
                info!(count = users.len(), "users loaded");
                self.users = users;
                self.clamp_selection();
            }
            Err(e) => {
                error!(error = %e, "failed to fetch users");
                self.alert(LOAD_FAILED);
            }
        }
        self.list_loading = false;
    }

    /// Append on success; alert and hand the error back on failure.
    fn finish_create(&mut self, result: Result<User, FetchError>) -> Result<(), FetchError> {
        self.create_loading = false;
        match result {
            Ok(user) => {
                info!(id = user.id, "user created");
                self.users.push(user);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to create user");
                self.alert(CREATE_FAILED);
                Err(e)
            }
        }
    }

    /// Drop the entry on success. An id that is no longer listed is not an error.
    fn finish_remove(
        &mut self,
        id: i64,
        result: Result<(), FetchError>,
    ) -> Result<(), FetchError> {
        match result {
            Ok(()) => {
                info!(id, "user deleted");
                self.users.retain(|u| u.id != id);
                self.clamp_selection();
                Ok(())
            }
            Err(e) => {
                error!(id, error = %e, "failed to delete user");
                Err(e)
            }
        }
    }
}
