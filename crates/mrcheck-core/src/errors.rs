use mrcheck_core_types::RequestId;
use thiserror::Error;

/// Result type alias using the canonical error facility
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable `ERR_*` code usable for programmatic handling
/// and for asserting on failures in tests. Logical mismatches between object
/// sets are never errors; they are reported through a non-empty diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    InvalidInput,
    /// A declaration or payload source does not exist in storage
    NotFound,

    // Decode class
    /// Document is not well-formed YAML or lacks identifying metadata
    MalformedDocument,
    /// apiVersion/kind is not known to the injected type registry
    UnknownKind,
    /// A payload flagged as compressed is not a valid compressed stream
    CorruptPayload,

    /// Two payload documents declare the same identity (only under `CollisionPolicy::Reject`)
    DuplicateObject,

    // Cancellation
    Cancelled,
    Timeout,

    Io,
    Serialization,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::MalformedDocument => "ERR_MALFORMED_DOCUMENT",
            ExErrorKind::UnknownKind => "ERR_UNKNOWN_KIND",
            ExErrorKind::CorruptPayload => "ERR_CORRUPT_PAYLOAD",
            ExErrorKind::DuplicateObject => "ERR_DUPLICATE_OBJECT",
            ExErrorKind::Cancelled => "ERR_CANCELLED",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for every kind raised while turning payload bytes into objects
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            ExErrorKind::MalformedDocument | ExErrorKind::UnknownKind | ExErrorKind::CorruptPayload
        )
    }

    /// True for cooperative cancellation and deadline expiry
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ExErrorKind::Cancelled | ExErrorKind::Timeout)
    }
}

/// Canonical structured error type
///
/// Carries the classification plus the payload coordinates (source, data key,
/// object identity) needed to find the offending document.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    source_ref: Option<String>,
    data_key: Option<String>,
    identity: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    cause: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            source_ref: None,
            data_key: None,
            identity: None,
            request_id: None,
            message: String::new(),
            cause: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the payload source (`namespace/name`) being processed
    pub fn with_source_ref(mut self, source_ref: impl Into<String>) -> Self {
        self.source_ref = Some(source_ref.into());
        self
    }

    /// Add the data key inside the payload source
    pub fn with_data_key(mut self, key: impl Into<String>) -> Self {
        self.data_key = Some(key.into());
        self
    }

    /// Add the object identity involved
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add the underlying cause
    pub fn with_cause(mut self, cause: ExError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn source_ref(&self) -> Option<&str> {
        self.source_ref.as_deref()
    }

    pub fn data_key(&self) -> Option<&str> {
        self.data_key.as_deref()
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&ExError> {
        self.cause.as_deref()
    }

    /// Shorthand for `self.kind().is_decode()`
    pub fn is_decode(&self) -> bool {
        self.kind.is_decode()
    }

    /// Shorthand for a `NotFound` kind check
    pub fn is_not_found(&self) -> bool {
        self.kind == ExErrorKind::NotFound
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(source_ref) = &self.source_ref {
            write!(f, " (source: {})", source_ref)?;
        }
        if let Some(key) = &self.data_key {
            write!(f, " (key: {})", key)?;
        }
        if let Some(identity) = &self.identity {
            write!(f, " (identity: {})", identity)?;
        }
        if let Some(cause) = &self.cause {
            write!(f, ": caused by {}", cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|c| c as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain failures raised while resolving and decoding payloads
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerifyError {
    #[error("Declaration not found: {namespace}/{name}")]
    DeclarationNotFound { namespace: String, name: String },

    #[error("Payload source not found: {namespace}/{name}")]
    SourceNotFound { namespace: String, name: String },

    #[error("Malformed document: {reason}")]
    MalformedDocument { reason: String },

    #[error("No kind registered for {api_version}, Kind={kind}")]
    UnknownKind { api_version: String, kind: String },

    #[error("Corrupt compressed payload under key {key}: {reason}")]
    CorruptPayload { key: String, reason: String },

    #[error("Object {identity} declared more than once")]
    DuplicateObject { identity: String },

    #[error("Invalid name segment {segment:?}: {reason}")]
    InvalidName { segment: String, reason: String },

    #[error("Operation {op} was cancelled")]
    Cancelled { op: String },

    #[error("Deadline exceeded during {op}")]
    DeadlineExceeded { op: String },
}

impl From<VerifyError> for ExError {
    fn from(err: VerifyError) -> Self {
        let message = err.to_string();
        match err {
            VerifyError::DeclarationNotFound { namespace, name } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_op("fetch_declaration")
                    .with_source_ref(format!("{}/{}", namespace, name))
                    .with_message(message)
            }
            VerifyError::SourceNotFound { namespace, name } => ExError::new(ExErrorKind::NotFound)
                .with_op("fetch_source")
                .with_source_ref(format!("{}/{}", namespace, name))
                .with_message(message),
            VerifyError::MalformedDocument { .. } => {
                ExError::new(ExErrorKind::MalformedDocument).with_message(message)
            }
            VerifyError::UnknownKind { .. } => {
                ExError::new(ExErrorKind::UnknownKind).with_message(message)
            }
            VerifyError::CorruptPayload { key, .. } => ExError::new(ExErrorKind::CorruptPayload)
                .with_op("decompress")
                .with_data_key(key)
                .with_message(message),
            VerifyError::DuplicateObject { identity } => {
                ExError::new(ExErrorKind::DuplicateObject)
                    .with_identity(identity)
                    .with_message(message)
            }
            VerifyError::InvalidName { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            VerifyError::Cancelled { op } => ExError::new(ExErrorKind::Cancelled)
                .with_op(op)
                .with_message(message),
            VerifyError::DeadlineExceeded { op } => ExError::new(ExErrorKind::Timeout)
                .with_op(op)
                .with_message(message),
        }
    }
}

impl From<serde_yaml::Error> for VerifyError {
    fn from(err: serde_yaml::Error) -> Self {
        VerifyError::MalformedDocument {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_class_kinds() {
        assert!(ExErrorKind::MalformedDocument.is_decode());
        assert!(ExErrorKind::UnknownKind.is_decode());
        assert!(ExErrorKind::CorruptPayload.is_decode());
        assert!(!ExErrorKind::NotFound.is_decode());
        assert!(!ExErrorKind::Timeout.is_decode());
    }

    #[test]
    fn test_source_not_found_maps_to_not_found() {
        let err: ExError = VerifyError::SourceNotFound {
            namespace: "shoot--foo".to_string(),
            name: "managedresource-seed".to_string(),
        }
        .into();

        assert!(err.is_not_found());
        assert_eq!(err.code(), "ERR_NOT_FOUND");
        assert_eq!(err.source_ref(), Some("shoot--foo/managedresource-seed"));
    }

    #[test]
    fn test_display_includes_context_and_cause() {
        let cause = ExError::new(ExErrorKind::CorruptPayload).with_message("bad stream");
        let err = ExError::new(ExErrorKind::CorruptPayload)
            .with_op("build_object_set")
            .with_source_ref("ns/secret")
            .with_data_key("data.yaml.br")
            .with_cause(cause);

        let text = err.to_string();
        assert!(text.starts_with("[ERR_CORRUPT_PAYLOAD] in operation 'build_object_set'"));
        assert!(text.contains("(source: ns/secret)"));
        assert!(text.contains("(key: data.yaml.br)"));
        assert!(text.contains("caused by [ERR_CORRUPT_PAYLOAD]: bad stream"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_cancellation_kinds() {
        let err: ExError = VerifyError::DeadlineExceeded {
            op: "fetch_source".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::Timeout);
        assert!(err.kind().is_cancellation());
        assert_eq!(err.op(), Some("fetch_source"));
    }
}
