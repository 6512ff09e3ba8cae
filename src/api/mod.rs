//! Data access layer for the UserBoard HTTP API.
//!
//! One network round-trip per call, no retries and no caching. Every failure
//! (transport, non-2xx status, undecodable body) becomes a [`FetchError`].
pub mod worker;

use reqwest::blocking::{Client, Response};
use tracing::{debug, warn};

use crate::error::{ApiOperation, FetchError};
use crate::model::{DeleteUser, User, UserDraft};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Remote user store. Implemented over HTTP by [`HttpUsersApi`]; tests supply fakes.
pub trait UsersApi: Send + Sync {
    /// `GET /users`
    fn list_users(&self) -> Result<Vec<User>, FetchError>;
    /// `POST /users/create`
    fn create_user(&self, draft: &UserDraft) -> Result<User, FetchError>;
    /// `DELETE /user` with `{id}` in the body.
    fn delete_user(&self, id: i64) -> Result<(), FetchError>;
}

pub struct HttpUsersApi {
    base_url: String,
    client: Client,
}

impl HttpUsersApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn check_status(op: ApiOperation, res: reqwest::Result<Response>) -> Result<Response, FetchError> {
    let resp = res.map_err(|e| {
        warn!(?op, error = %e, "request failed");
        FetchError::new(op, e.to_string())
    })?;
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        warn!(?op, %status, "non-success response");
        Err(FetchError::new(op, format!("status {}", status)))
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    op: ApiOperation,
    resp: Response,
) -> Result<T, FetchError> {
    resp.json::<T>().map_err(|e| {
        warn!(?op, error = %e, "undecodable response body");
        FetchError::new(op, format!("decode: {}", e))
    })
}

impl UsersApi for HttpUsersApi {
    fn list_users(&self) -> Result<Vec<User>, FetchError> {
        let url = self.url("/users");
        debug!(%url, "listing users");
        let resp = check_status(ApiOperation::List, self.client.get(&url).send())?;
        decode(ApiOperation::List, resp)
    }

    fn create_user(&self, draft: &UserDraft) -> Result<User, FetchError> {
        let url = self.url("/users/create");
        debug!(%url, firstname = %draft.firstname, lastname = %draft.lastname, "creating user");
        let resp = check_status(
            ApiOperation::Create,
            self.client.post(&url).json(draft).send(),
        )?;
        decode(ApiOperation::Create, resp)
    }

    fn delete_user(&self, id: i64) -> Result<(), FetchError> {
        let url = self.url("/user");
        debug!(%url, id, "deleting user");
        check_status(
            ApiOperation::Delete,
            self.client.delete(&url).json(&DeleteUser { id }).send(),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn draft() -> UserDraft {
        UserDraft {
            firstname: "Jane".into(),
            lastname: "Doe".into(),
            age: 30,
            date_of_birth: "1994-05-06".into(),
        }
    }

    #[test]
    fn list_users_decodes_array_in_server_order() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(200).json_body(json!([
                {"id": 2, "firstname": "B", "lastname": "B", "age": 20,
                 "date_of_birth": "2000-01-01"},
                {"id": 1, "firstname": "A", "lastname": "A", "age": 21,
                 "date_of_birth": "1999-01-01"}
            ]));
        });
        let api = HttpUsersApi::new(&server.base_url());
        let users = api.list_users().unwrap();
        m.assert();
        assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn list_users_non_success_is_fetch_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(503);
        });
        let err = HttpUsersApi::new(&server.base_url())
            .list_users()
            .unwrap_err();
        assert_eq!(err.operation, ApiOperation::List);
    }

    #[test]
    fn create_user_posts_json_draft() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST)
                .path("/users/create")
                .header("content-type", "application/json")
                .json_body(json!({
                    "firstname": "Jane",
                    "lastname": "Doe",
                    "age": 30,
                    "date_of_birth": "1994-05-06"
                }));
            then.status(200).json_body(json!({
                "id": 11,
                "firstname": "Jane",
                "lastname": "Doe",
                "age": 30,
                "date_of_birth": "1994-05-06"
            }));
        });
        let user = HttpUsersApi::new(&server.base_url())
            .create_user(&draft())
            .unwrap();
        m.assert();
        assert_eq!(user.id, 11);
        assert_eq!(user.firstname, "Jane");
    }

    #[test]
    fn create_user_ignores_error_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/users/create");
            then.status(422)
                .json_body(json!({"detail": [{"msg": "too long"}]}));
        });
        let err = HttpUsersApi::new(&server.base_url())
            .create_user(&draft())
            .unwrap_err();
        assert_eq!(err.operation, ApiOperation::Create);
        assert_eq!(err.detail, "status 422 Unprocessable Entity");
    }

    #[test]
    fn delete_user_sends_id_in_body() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(DELETE).path("/user").json_body(json!({"id": 5}));
            then.status(200)
                .json_body(json!({"message": "User deleted successfully"}));
        });
        HttpUsersApi::new(&server.base_url())
            .delete_user(5)
            .unwrap();
        m.assert();
    }

    #[test]
    fn delete_user_not_found_is_fetch_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE).path("/user");
            then.status(404);
        });
        let res = HttpUsersApi::new(&server.base_url()).delete_user(99);
        assert!(res.is_err());
    }

    #[test]
    fn unreachable_server_is_fetch_error() {
        // Port 9 (discard) is not expected to run an HTTP server.
        let err = HttpUsersApi::new("http://127.0.0.1:9")
            .list_users()
            .unwrap_err();
        assert_eq!(err.operation, ApiOperation::List);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpUsersApi::new("http://localhost:8000/");
        assert_eq!(api.base_url(), "http://localhost:8000");
        assert_eq!(api.url("/users"), "http://localhost:8000/users");
    }
}
