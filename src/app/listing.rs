//! Listing interactions: row selection and the delete confirmation flow.
use tracing::error;

use super::{AppState, ModalState};
use crate::api::worker::Request;
use crate::error::FetchError;

pub const DELETE_FAILED: &str = "Failed to delete user. Please try again.";

impl AppState {
    pub fn clamp_selection(&mut self) {
        let last = self.users.len().saturating_sub(1);
        self.selected_user_index = self.selected_user_index.min(last);
    }

    pub fn move_up(&mut self) {
        self.selected_user_index = self.selected_user_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_user_index + 1 < self.users.len() {
            self.selected_user_index += 1;
        }
    }

    pub fn page_up(&mut self) {
        let rpp = self.rows_per_page.max(1);
        self.selected_user_index = self.selected_user_index.saturating_sub(rpp);
    }

    pub fn page_down(&mut self) {
        let rpp = self.rows_per_page.max(1);
        self.selected_user_index = self.selected_user_index.saturating_add(rpp);
        self.clamp_selection();
    }

    /// Ask before deleting the selected row. Nothing to delete while loading.
    pub fn open_delete_confirm(&mut self) {
        if self.list_loading {
            return;
        }
        if let Some(u) = self.users.get(self.selected_user_index) {
            self.modal = Some(ModalState::DeleteConfirm {
                id: u.id,
                name: u.full_name(),
                yes: false,
            });
        }
    }

    /// Close the confirmation; on "yes" hand back the delete to dispatch.
    pub fn answer_delete_confirm(&mut self, yes: bool) -> Option<Request> {
        match self.modal.take() {
            Some(ModalState::DeleteConfirm { id, .. }) if yes => Some(self.remove_user(id)),
            Some(ModalState::DeleteConfirm { .. }) => None,
            other => {
                self.modal = other;
                None
            }
        }
    }

    /// The listing presents its own delete failures.
    pub fn on_delete_finished(&mut self, result: Result<(), FetchError>) {
        if let Err(e) = result {
            error!(error = %e, "delete failed");
            self.alert(DELETE_FAILED);
        }
    }
}
