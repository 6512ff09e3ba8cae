use std::fmt::{Display, Formatter};

use thiserror::Error;

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T> = std::result::Result<T, DynError>;

pub trait Context<T> {
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

#[derive(Debug)]
pub struct WithContextError {
    pub context: String,
    pub source: DynError,
}

impl Display for WithContextError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.context, self.source)
    }
}

impl std::error::Error for WithContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: Into<DynError>,
{
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            Box::new(WithContextError {
                context: f(),
                source: e.into(),
            }) as DynError
        })
    }
}

#[derive(Debug)]
pub struct SimpleError(pub String);

impl Display for SimpleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SimpleError {}

pub fn simple_error(msg: impl Into<String>) -> DynError {
    Box::new(SimpleError(msg.into()))
}

/// Which remote call a [`FetchError`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiOperation {
    List,
    Create,
    Delete,
}

impl ApiOperation {
    pub fn failure_message(self) -> &'static str {
        match self {
            ApiOperation::List => "Failed to fetch users",
            ApiOperation::Create => "Failed to create user",
            ApiOperation::Delete => "Failed to delete user",
        }
    }
}

/// The only error the data access layer produces.
///
/// Non-2xx statuses, transport failures and undecodable bodies all collapse
/// into this one kind; `detail` exists for the log file only.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{} ({detail})", .operation.failure_message())]
pub struct FetchError {
    pub operation: ApiOperation,
    pub detail: String,
}

impl FetchError {
    pub fn new(operation: ApiOperation, detail: impl Into<String>) -> Self {
        Self {
            operation,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_display_uses_generic_message() {
        let err = FetchError::new(ApiOperation::Delete, "status 500");
        assert_eq!(err.to_string(), "Failed to delete user (status 500)");
    }

    #[test]
    fn with_ctx_prefixes_message() {
        let res: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = res.with_ctx(|| "open log file".to_string()).unwrap_err();
        assert_eq!(err.to_string(), "open log file: gone");
    }
}
