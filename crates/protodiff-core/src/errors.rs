use thiserror::Error;

/// Result type alias using SchemaError
pub type Result<T> = std::result::Result<T, SchemaError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and external API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Snapshot construction
    /// A declaration is structurally invalid (unknown type/label, inverted range)
    MalformedSchema,
    /// A logically required descriptor attribute is absent
    MissingField,
    /// Input bytes are not a valid protobuf encoding of the expected message
    Decode,
    /// Input bytes are not valid JSON for the expected shape
    Serialization,

    // Diff outcome
    /// The diff found at least one backward-incompatible change
    BreakingChanges,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MalformedSchema => "ERR_MALFORMED_SCHEMA",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::Decode => "ERR_DECODE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::BreakingChanges => "ERR_BREAKING_CHANGES",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context needed
/// to point at the offending input.
#[derive(Debug, Clone, PartialEq)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    problem_count: Option<usize>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            problem_count: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (a declaration path such as `pkg.Message.field[1]`)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add the number of problems a failed diff found
    pub fn with_problem_count(mut self, count: usize) -> Self {
        self.problem_count = Some(count);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
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

    /// Get the entity context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the problem count, if any (populated on BreakingChanges)
    pub fn problem_count(&self) -> Option<usize> {
        self.problem_count
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
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
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Errors raised while building a [`SchemaSnapshot`](crate::model::SchemaSnapshot)
/// from descriptor input.
///
/// `path` always names the offending declaration, e.g.
/// `helloworld.HelloRequest.field[2]`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A required descriptor attribute is absent
    #[error("missing required attribute `{attribute}` on {path}")]
    MissingField { path: String, attribute: String },

    /// A field type number outside the descriptor vocabulary
    #[error("unknown field type {value} on {path}")]
    UnknownFieldType { path: String, value: i32 },

    /// A field label number outside the descriptor vocabulary
    #[error("unknown field label {value} on {path}")]
    UnknownLabel { path: String, value: i32 },

    /// A reserved range whose end does not lie after its start
    #[error("reserved range {start} to {end} on {path} is empty or inverted")]
    InvalidReservedRange { path: String, start: i32, end: i32 },

    /// Protobuf wire decoding failed
    #[error("failed to decode {what}: {message}")]
    Decode { what: String, message: String },

    /// JSON decoding failed
    #[error("failed to parse descriptor JSON: {message}")]
    Json { message: String },
}

impl SchemaError {
    pub(crate) fn missing(path: impl Into<String>, attribute: &str) -> Self {
        SchemaError::MissingField {
            path: path.into(),
            attribute: attribute.to_string(),
        }
    }
}

/// Conversion from SchemaError to ExError
impl From<SchemaError> for ExError {
    fn from(err: SchemaError) -> Self {
        let message = err.to_string();
        match err {
            SchemaError::MissingField { path, .. } => ExError::new(ExErrorKind::MissingField)
                .with_entity_id(path)
                .with_message(message),

            SchemaError::UnknownFieldType { path, .. }
            | SchemaError::UnknownLabel { path, .. }
            | SchemaError::InvalidReservedRange { path, .. } => {
                ExError::new(ExErrorKind::MalformedSchema)
                    .with_entity_id(path)
                    .with_message(message)
            }

            SchemaError::Decode { .. } => ExError::new(ExErrorKind::Decode).with_message(message),

            SchemaError::Json { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}
