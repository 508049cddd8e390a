//! Cursor pagination for event listings.
//!
//! Events are ordered by `happened_at` descending, ties broken by id
//! descending, which gives a total, stable order. The cursor is an opaque
//! base64url encoding of the last returned position; re-issuing the same
//! cursor against an unchanged dataset reproduces the same next page.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Page size applied when the caller sends no `limit`.
pub const DEFAULT_LIMIT: u32 = 20;

/// Hard cap on the page size regardless of the requested `limit`.
pub const MAX_LIMIT: u32 = 100;

/// Pagination parameters for list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl PageQuery {
    /// Effective page size: default 20, clamped to 1–100.
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT) as usize
    }
}

/// One page of results. `next_cursor` is present iff more rows exist
/// beyond this page; it is omitted from JSON entirely at the end.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }

    /// Map items while preserving the cursor (domain → DTO convenience).
    pub fn map_items<U>(self, mut f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(&mut f).collect(),
            next_cursor: self.next_cursor,
        }
    }
}

/// Error returned when a cursor token cannot be decoded.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid cursor")]
pub struct InvalidCursor;

/// Resume position inside the `(happened_at DESC, id DESC)` ordering.
///
/// A page resumed from a cursor contains exactly the rows whose
/// `(happened_at, id)` tuple is strictly less than the cursor's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCursor {
    pub happened_at: DateTime<Utc>,
    pub id: Uuid,
}

impl EventCursor {
    /// Encode into the opaque token handed to clients.
    pub fn encode(&self) -> String {
        let json = serde_json::to_vec(self).expect("cursor serialization is infallible");
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Decode a client-supplied token. Any malformed input is rejected
    /// uniformly; the token's internals are not part of the API.
    pub fn decode(token: &str) -> Result<Self, InvalidCursor> {
        let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| InvalidCursor)?;
        serde_json::from_slice(&bytes).map_err(|_| InvalidCursor)
    }

    /// True if a row at `(happened_at, id)` comes strictly after this
    /// cursor in the descending ordering.
    pub fn is_before(&self, happened_at: DateTime<Utc>, id: Uuid) -> bool {
        (happened_at, id) < (self.happened_at, self.id)
    }
}
