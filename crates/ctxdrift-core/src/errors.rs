use ctxdrift_core_types::RequestId;
use thiserror::Error;

/// Result type alias using the canonical error facility
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (and remote agents)
/// can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Malformed or missing required input parameter
    InvalidInput,
    /// Unknown or expired snapshot id, missing index file
    NotFound,
    /// Index or bundle file failed to parse or violates its schema
    Corrupt,
    /// A recognised request that this build does not implement (e.g. git baselines)
    Unsupported,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Corrupt => "ERR_CORRUPT",
            ExErrorKind::Unsupported => "ERR_UNSUPPORTED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional context
/// (operation, entity id, file path) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    path: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            path: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (snapshot id, component name)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add file or folder path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
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

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
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
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// ========== End Error Facility ==========

/// Boundary errors raised while decoding context files
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// File bytes are not valid UTF-8
    #[error("{document} is not valid UTF-8: {message}")]
    InvalidUtf8 { document: String, message: String },

    /// File bytes are not valid JSON
    #[error("{document} is not valid JSON: {message}")]
    InvalidJson { document: String, message: String },

    /// JSON is valid but does not match the expected schema
    #[error("{document} does not match its schema: {message}")]
    SchemaMismatch { document: String, message: String },

    /// Index `type` discriminator is missing or wrong
    #[error("expected document type `{expected}`, found `{found}`")]
    WrongDocumentType { expected: String, found: String },

    /// Bundle file root is not a JSON array
    #[error("bundle file root must be a JSON array, found {found}")]
    BundleFileNotArray { found: String },

    /// Two folders in one index share a path
    #[error("duplicate folder path in index: {path}")]
    DuplicateFolder { path: String },
}

/// Conversion from ModelError to ExError
///
/// Every boundary decode failure is a Corrupt condition.
impl From<ModelError> for ExError {
    fn from(err: ModelError) -> Self {
        let message = err.to_string();
        match err {
            ModelError::DuplicateFolder { path } => ExError::new(ExErrorKind::Corrupt)
                .with_op("parse_index")
                .with_path(path)
                .with_message(message),
            ModelError::WrongDocumentType { .. } => ExError::new(ExErrorKind::Corrupt)
                .with_op("parse_index")
                .with_message(message),
            ModelError::BundleFileNotArray { .. } => ExError::new(ExErrorKind::Corrupt)
                .with_op("parse_bundles")
                .with_message(message),
            ModelError::InvalidUtf8 { .. }
            | ModelError::InvalidJson { .. }
            | ModelError::SchemaMismatch { .. } => ExError::new(ExErrorKind::Corrupt)
                .with_op("parse_context_document")
                .with_message(message),
        }
    }
}

/// Conversion from serde_json::Error for serialization of outbound results
impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}
