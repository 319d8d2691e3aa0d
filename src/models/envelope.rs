use serde::Deserialize;
use serde_json::Value;

/// One page of a paginated list response.
///
/// List endpoints wrap their records in `{count, results, next, previous}`.
/// Every field defaults, so a body that carries none of them (e.g. a single
/// product detail) deserializes to an empty envelope rather than failing.
#[derive(Debug, Clone, Deserialize)]
pub struct PageEnvelope {
    /// Total number of records across all pages, when the API reports it.
    #[serde(default)]
    pub count: Option<u64>,

    /// Records carried by this page, in API order.
    #[serde(default)]
    pub results: Vec<Value>,

    /// Absolute URL of the next page, or `None` on the last page.
    #[serde(default)]
    pub next: Option<String>,

    /// Absolute URL of the previous page, or `None` on the first page.
    #[serde(default)]
    pub previous: Option<String>,
}

impl PageEnvelope {
    /// Returns true if this page signals a further page to fetch.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}
