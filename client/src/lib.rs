pub mod raw;
pub mod session;

use std::time::Duration;

pub use hostel_shared as shared;
pub use hostel_shared::account::{Role, User};
pub use raw::{call, Attachment, NotLoggedIn, Request, ResponseError};
pub use session::{AccountInfo, Session};

/// Everything a request needs: the http client, where the API lives,
/// and who is calling it.
#[derive(Clone)]
pub struct Context {
    req_client: reqwest::Client,
    /// Base url of the API, without a trailing slash.
    url_prefix: String,
    pub session: Session,
}

impl Context {
    pub fn new(url_prefix: impl Into<String>, session: Session) -> anyhow::Result<Self> {
        Self::with_timeout(url_prefix, session, Duration::from_secs(30))
    }

    pub fn with_timeout(
        url_prefix: impl Into<String>,
        session: Session,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let req_client = reqwest::Client::builder().timeout(timeout).build()?;
        let mut url_prefix = url_prefix.into();
        while url_prefix.ends_with('/') {
            url_prefix.pop();
        }

        Ok(Self {
            req_client,
            url_prefix,
            session,
        })
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Calls a request within this context.
    #[inline]
    pub async fn call<T: Request>(&self, req: T) -> anyhow::Result<T::Output> {
        raw::call(req, self).await
    }
}

/// Gets the message to show for a failed call: the server's own message
/// when it sent one, `fallback` otherwise.
pub fn error_message(err: &anyhow::Error, fallback: &str) -> String {
    err.chain()
        .find_map(|e| e.downcast_ref::<ResponseError>())
        .and_then(|e| e.message.clone())
        .unwrap_or_else(|| fallback.to_owned())
}

/// Gets the status code of a rejected call.
pub fn error_status(err: &anyhow::Error) -> Option<reqwest::StatusCode> {
    err.chain()
        .find_map(|e| e.downcast_ref::<ResponseError>())
        .map(|e| e.status_code)
}
