//! Canonical schema constants for structured logging
//!
//! Field keys and event names shared by the logging macros, the test capture
//! layer and anything that filters mrcheck log output.

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Declaration and payload addressing
pub const FIELD_NAMESPACE: &str = "namespace";
pub const FIELD_NAME: &str = "name";
pub const FIELD_SOURCE: &str = "source";
pub const FIELD_DATA_KEY: &str = "data_key";
pub const FIELD_IDENTITY: &str = "identity";

// Collection sizes
pub const FIELD_OBJECT_COUNT: &str = "object_count";
pub const FIELD_SOURCE_COUNT: &str = "source_count";
pub const FIELD_MISMATCH_COUNT: &str = "mismatch_count";
pub const FIELD_MISSING_COUNT: &str = "missing_count";
pub const FIELD_EXTRA_COUNT: &str = "extra_count";

pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
