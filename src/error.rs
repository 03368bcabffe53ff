use thiserror::Error;

/// What kind of schema element an error refers to. Only used for error
/// messages, the wire bodies spell the kind out themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Field,
    FieldType,
    CopyField,
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementKind::Field => write!(f, "Field"),
            ElementKind::FieldType => write!(f, "Field type"),
            ElementKind::CopyField => write!(f, "Copy field"),
        }
    }
}

/// Errors raised by the transport layer. Implementations outside this crate
/// can funnel anything through `Other`.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Errors raised by [`SchemaClient`](crate::SchemaClient).
///
/// Precondition failures (`AlreadyExists`, `NotFound`) are raised before any
/// mutating request goes out. Transport failures pass through untranslated.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{kind} '{name}' already exists in collection '{collection}'")]
    AlreadyExists {
        kind: ElementKind,
        name: String,
        collection: String,
    },
    #[error("{kind} '{name}' does not exist in collection '{collection}'")]
    NotFound {
        kind: ElementKind,
        name: String,
        collection: String,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("unexpected schema response shape: {0}")]
    Decode(#[from] serde_json::Error),
}
