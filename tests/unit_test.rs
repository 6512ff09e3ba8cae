// Unit tests for userboard
// Drive the shell, form and listing through the public API with a fake remote store.

use std::sync::{Arc, Mutex};

use userboard::api::UsersApi;
use userboard::api::worker::{Request, Worker};
use userboard::app::AppState;
use userboard::error::{ApiOperation, FetchError};
use userboard::model::{User, UserDraft};

/// In-memory stand-in for the API that records every call.
#[derive(Default)]
struct FakeApi {
    users: Mutex<Vec<User>>,
    next_id: Mutex<i64>,
    calls: Mutex<Vec<String>>,
    fail: Mutex<bool>,
}

impl FakeApi {
    fn with_users(users: Vec<User>) -> Arc<Self> {
        let next = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Arc::new(Self {
            users: Mutex::new(users),
            next_id: Mutex::new(next),
            ..Default::default()
        })
    }

    fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self, op: ApiOperation) -> Result<(), FetchError> {
        if *self.fail.lock().unwrap() {
            Err(FetchError::new(op, "status 500"))
        } else {
            Ok(())
        }
    }
}

impl UsersApi for FakeApi {
    fn list_users(&self) -> Result<Vec<User>, FetchError> {
        self.calls.lock().unwrap().push("list".into());
        self.check(ApiOperation::List)?;
        Ok(self.users.lock().unwrap().clone())
    }

    fn create_user(&self, draft: &UserDraft) -> Result<User, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create:{}|{}", draft.firstname, draft.lastname));
        self.check(ApiOperation::Create)?;
        let mut id = self.next_id.lock().unwrap();
        let user = User {
            id: *id,
            firstname: draft.firstname.clone(),
            lastname: draft.lastname.clone(),
            age: draft.age,
            date_of_birth: draft.date_of_birth.clone(),
        };
        *id += 1;
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    fn delete_user(&self, id: i64) -> Result<(), FetchError> {
        self.calls.lock().unwrap().push(format!("delete:{id}"));
        self.check(ApiOperation::Delete)?;
        self.users.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }
}

fn user(id: i64, first: &str, last: &str) -> User {
    User {
        id,
        firstname: first.into(),
        lastname: last.into(),
        age: 30,
        date_of_birth: "1990-01-01".into(),
    }
}

fn valid_draft() -> UserDraft {
    UserDraft {
        firstname: "John".into(),
        lastname: "Doe".into(),
        age: 30,
        date_of_birth: "2000-01-01".into(),
    }
}

/// Dispatch a request and apply every outcome it produced.
fn run(app: &mut AppState, worker: &Worker, request: Option<Request>) {
    if let Some(r) = request {
        worker.dispatch(r);
    }
    while let Some(outcome) = worker.try_recv() {
        app.apply(outcome);
    }
}

fn setup(users: Vec<User>) -> (Arc<FakeApi>, Worker, AppState) {
    let api = FakeApi::with_users(users);
    let worker = Worker::inline(api.clone());
    (api, worker, AppState::default())
}

#[cfg(test)]
mod form_submission_tests {
    use super::*;

    #[test]
    fn invalid_drafts_never_reach_the_network() {
        let drafts = [
            UserDraft {
                firstname: String::new(),
                ..valid_draft()
            },
            UserDraft {
                firstname: "   ".into(),
                ..valid_draft()
            },
            UserDraft {
                lastname: "\t ".into(),
                ..valid_draft()
            },
            UserDraft {
                age: 0,
                ..valid_draft()
            },
            UserDraft {
                age: 151,
                ..valid_draft()
            },
            UserDraft {
                date_of_birth: String::new(),
                ..valid_draft()
            },
        ];
        for d in drafts {
            let (api, worker, mut app) = setup(vec![]);
            app.form.draft = d.clone();
            let req = app.submit_new_user();
            assert!(req.is_none(), "draft {d:?} should be blocked");
            run(&mut app, &worker, req);
            assert!(api.calls().is_empty());
            assert!(!app.create_loading);
        }
    }

    #[test]
    fn scenario_missing_firstname_reports_exactly_one_error() {
        let (api, _worker, mut app) = setup(vec![]);
        app.form.draft = UserDraft {
            firstname: String::new(),
            ..valid_draft()
        };
        assert!(app.submit_new_user().is_none());
        let errors: Vec<_> = app.form.errors.iter().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].1, "First name is required");
        assert!(api.calls().is_empty());
    }

    #[test]
    fn names_are_trimmed_before_sending() {
        let (api, worker, mut app) = setup(vec![]);
        app.form.draft = UserDraft {
            firstname: "  John  ".into(),
            lastname: " Doe ".into(),
            ..valid_draft()
        };
        let req = app.submit_new_user();
        run(&mut app, &worker, req);
        assert_eq!(api.calls(), vec!["create:John|Doe".to_string()]);
    }

    #[test]
    fn successful_create_appends_and_resets_form() {
        let (_api, worker, mut app) = setup(vec![user(1, "A", "B")]);
        app.users = vec![user(1, "A", "B")];
        app.form.draft = valid_draft();
        let req = app.submit_new_user();
        assert!(app.create_loading);
        run(&mut app, &worker, req);

        assert!(!app.create_loading);
        assert_eq!(app.users.len(), 2);
        let last = app.users.last().unwrap();
        assert_eq!(last.id, 2);
        assert_eq!(last.firstname, "John");
        assert_eq!(app.form.draft, UserDraft::default());
        assert!(app.form.errors.is_empty());
        assert!(app.alerts.is_empty());
    }

    #[test]
    fn failed_create_keeps_draft_and_list() {
        let (api, worker, mut app) = setup(vec![]);
        api.set_failing(true);
        let typed = UserDraft {
            firstname: " John".into(),
            ..valid_draft()
        };
        app.form.draft = typed.clone();
        let req = app.submit_new_user();
        run(&mut app, &worker, req);

        assert!(!app.create_loading);
        assert!(app.users.is_empty());
        assert_eq!(app.form.draft, typed);
        assert_eq!(
            app.alerts.front().map(String::as_str),
            Some("Failed to create user. Please try again.")
        );

        // retry after the server recovers
        api.set_failing(false);
        let req = app.submit_new_user();
        run(&mut app, &worker, req);
        assert_eq!(app.users.len(), 1);
        assert_eq!(app.form.draft, UserDraft::default());
    }
}

#[cfg(test)]
mod shell_tests {
    use super::*;

    #[test]
    fn refresh_is_idempotent_for_unchanged_remote() {
        let (_api, worker, mut app) = setup(vec![user(3, "C", "C"), user(1, "A", "A")]);
        let req = app.refresh_users();
        run(&mut app, &worker, Some(req));
        let first = app.users.clone();
        let req = app.refresh_users();
        run(&mut app, &worker, Some(req));
        assert_eq!(app.users, first);
        // server order is display order
        assert_eq!(first.iter().map(|u| u.id).collect::<Vec<_>>(), vec![3, 1]);
        assert!(!app.list_loading);
    }

    #[test]
    fn failed_refresh_alerts_and_clears_flag() {
        let (api, worker, mut app) = setup(vec![user(1, "A", "A")]);
        api.set_failing(true);
        let req = app.refresh_users();
        run(&mut app, &worker, Some(req));
        assert!(!app.list_loading);
        assert!(app.users.is_empty());
        assert_eq!(app.alerts.len(), 1);
    }

    #[test]
    fn delete_removes_only_that_id() {
        let (_api, worker, mut app) = setup(vec![user(1, "A", "A"), user(2, "B", "B")]);
        let req = app.refresh_users();
        run(&mut app, &worker, Some(req));
        let req = app.remove_user(1);
        run(&mut app, &worker, Some(req));
        assert!(app.users.iter().all(|u| u.id != 1));
        assert_eq!(app.users.len(), 1);
    }

    #[test]
    fn delete_of_unknown_id_leaves_list_unchanged() {
        let (_api, worker, mut app) = setup(vec![user(1, "A", "A")]);
        let req = app.refresh_users();
        run(&mut app, &worker, Some(req));
        let before = app.users.clone();
        let req = app.remove_user(77);
        run(&mut app, &worker, Some(req));
        assert_eq!(app.users, before);
        assert!(app.alerts.is_empty());
    }

    #[test]
    fn failed_delete_is_reported_by_the_listing() {
        let (api, worker, mut app) = setup(vec![user(1, "A", "A")]);
        let req = app.refresh_users();
        run(&mut app, &worker, Some(req));
        api.set_failing(true);
        app.open_delete_confirm();
        let req = app.answer_delete_confirm(true);
        run(&mut app, &worker, req);
        assert_eq!(app.users.len(), 1);
        assert_eq!(
            app.alerts.front().map(String::as_str),
            Some("Failed to delete user. Please try again.")
        );
    }
}
