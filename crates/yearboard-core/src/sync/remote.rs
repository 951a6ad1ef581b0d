//! HTTP client for the calendar-data API.
//!
//! Wire contract:
//!
//! ```text
//! GET {base}/api/calendar-data?year={y}  -> 200 {data, version, lastModified}
//!                                        |  401 (not signed in) | 404 (no data yet)
//! PUT {base}/api/calendar-data           -> 200 {message, version, lastModified}
//!     body {userId, year, data, force}   |  401 | 400
//! ```
//!
//! Both operations are single-shot and non-retrying; retry policy belongs
//! to the sync engine, not this client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDocument;

use super::types::{RemoteError, SyncKey};

/// Remote persistence for calendar documents. The seam the sync engine is
/// tested against.
pub trait RemoteStore {
    /// Authenticated read of the document for a key.
    fn pull(&self, key: &SyncKey) -> Result<CalendarDocument, RemoteError>;

    /// Authenticated upsert, unconditionally overwriting server state.
    /// Last-writer-wins by design; there is no optimistic-concurrency check.
    fn push(&self, key: &SyncKey, doc: &CalendarDocument) -> Result<PushReceipt, RemoteError>;
}

/// Server acknowledgement of a push.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushReceipt {
    pub version: i64,
    pub last_modified: DateTime<Utc>,
}

#[derive(Deserialize)]
struct PullResponse {
    data: CalendarDocument,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PushResponse {
    version: i64,
    last_modified: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PushRequest<'a> {
    user_id: &'a str,
    year: i32,
    data: &'a CalendarDocument,
    /// Force overwrite, no conflict check.
    force: bool,
}

/// Blocking HTTP implementation of [`RemoteStore`].
#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    client: reqwest::blocking::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpRemoteStore {
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/calendar-data", self.base_url)
    }

    fn authorize(
        &self,
        req: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.auth_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

impl RemoteStore for HttpRemoteStore {
    fn pull(&self, key: &SyncKey) -> Result<CalendarDocument, RemoteError> {
        let response = self
            .authorize(self.client.get(self.endpoint()))
            .query(&[("year", key.year)])
            .send()?;

        match response.status() {
            reqwest::StatusCode::UNAUTHORIZED => Err(RemoteError::AuthenticationRequired),
            reqwest::StatusCode::NOT_FOUND => Err(RemoteError::NotFound),
            status if !status.is_success() => {
                Err(RemoteError::Transport(format!("Pull failed: {status}")))
            }
            _ => Ok(response.json::<PullResponse>()?.data),
        }
    }

    fn push(&self, key: &SyncKey, doc: &CalendarDocument) -> Result<PushReceipt, RemoteError> {
        let body = PushRequest {
            user_id: &key.user_id,
            year: key.year,
            data: doc,
            force: true,
        };
        let response = self
            .authorize(self.client.put(self.endpoint()))
            .json(&body)
            .send()?;

        match response.status() {
            reqwest::StatusCode::UNAUTHORIZED => Err(RemoteError::AuthenticationRequired),
            status if !status.is_success() => {
                Err(RemoteError::Transport(format!("Push failed: {status}")))
            }
            _ => {
                let acked = response.json::<PushResponse>()?;
                Ok(PushReceipt {
                    version: acked.version,
                    last_modified: acked.last_modified,
                })
            }
        }
    }
}
