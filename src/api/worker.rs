use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use tracing::debug;

use super::UsersApi;
use crate::error::FetchError;
use crate::model::{User, UserDraft};

/// A single call to make against the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    ListUsers,
    CreateUser(UserDraft),
    DeleteUser { id: i64 },
}

/// Completion of a [`Request`], delivered back to the UI thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Listed(Result<Vec<User>, FetchError>),
    Created(Result<User, FetchError>),
    Deleted {
        id: i64,
        result: Result<(), FetchError>,
    },
}

/// Run one request to completion on the calling thread.
pub fn execute(api: &dyn UsersApi, request: Request) -> Outcome {
    match request {
        Request::ListUsers => Outcome::Listed(api.list_users()),
        Request::CreateUser(draft) => Outcome::Created(api.create_user(&draft)),
        Request::DeleteUser { id } => Outcome::Deleted {
            id,
            result: api.delete_user(id),
        },
    }
}

/// Executes requests off the UI thread and hands outcomes back over a channel.
///
/// Requests of different kinds may be in flight at the same time and finish in
/// any order. Nothing is ever cancelled.
pub struct Worker {
    api: Arc<dyn UsersApi>,
    tx: Sender<Outcome>,
    rx: Receiver<Outcome>,
    background: bool,
}

impl Worker {
    /// One background thread per request.
    pub fn new(api: Arc<dyn UsersApi>) -> Self {
        let (tx, rx) = channel();
        Self {
            api,
            tx,
            rx,
            background: true,
        }
    }

    /// Execute synchronously inside `dispatch`; outcomes are queued for `try_recv`.
    pub fn inline(api: Arc<dyn UsersApi>) -> Self {
        let (tx, rx) = channel();
        Self {
            api,
            tx,
            rx,
            background: false,
        }
    }

    pub fn dispatch(&self, request: Request) {
        debug!(?request, background = self.background, "dispatch");
        if self.background {
            let api = Arc::clone(&self.api);
            let tx = self.tx.clone();
            thread::spawn(move || {
                let outcome = execute(api.as_ref(), request);
                // Receiver gone means the UI has exited.
                let _ = tx.send(outcome);
            });
        } else {
            let _ = self.tx.send(execute(self.api.as_ref(), request));
        }
    }

    pub fn try_recv(&self) -> Option<Outcome> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiOperation;
    use std::time::Duration;

    struct Static;

    impl UsersApi for Static {
        fn list_users(&self) -> Result<Vec<User>, FetchError> {
            Ok(vec![])
        }
        fn create_user(&self, _draft: &UserDraft) -> Result<User, FetchError> {
            Err(FetchError::new(ApiOperation::Create, "nope"))
        }
        fn delete_user(&self, _id: i64) -> Result<(), FetchError> {
            Ok(())
        }
    }

    #[test]
    fn inline_worker_queues_outcome() {
        let w = Worker::inline(Arc::new(Static));
        assert!(w.try_recv().is_none());
        w.dispatch(Request::DeleteUser { id: 3 });
        assert_eq!(
            w.try_recv(),
            Some(Outcome::Deleted {
                id: 3,
                result: Ok(())
            })
        );
        assert!(w.try_recv().is_none());
    }

    #[test]
    fn background_worker_delivers_outcome() {
        let w = Worker::new(Arc::new(Static));
        w.dispatch(Request::CreateUser(UserDraft::default()));
        let mut got = None;
        for _ in 0..200 {
            if let Some(o) = w.try_recv() {
                got = Some(o);
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert!(matches!(got, Some(Outcome::Created(Err(_)))));
    }
}
