/// Body returned for every request that cannot be decoded. Existing clients
/// match on this exact text.
pub const DECODE_ERROR_MESSAGE: &str = "Could not decode request: JSON parsing failed";

/// Field of the request object that carries the catalog entries.
pub const PAYLOAD_FIELD: &str = "payload";

pub mod metrics {

    pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";

    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

    pub const ENTRIES_RECEIVED_TOTAL: &str = "catalog_entries_received_total";

    pub const ENTRIES_RETURNED_TOTAL: &str = "catalog_entries_returned_total";

    pub const ENTRIES_SKIPPED_TOTAL: &str = "catalog_entries_skipped_total";

    /// `path` label for requests that matched no route.
    pub const UNMATCHED_ROUTE: &str = "unmatched";
}
