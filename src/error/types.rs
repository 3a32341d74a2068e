use thiserror::Error;

/// Unified result type for the tabstack crate.
pub type Result<T> = std::result::Result<T, StackError>;

/// Errors surfaced by the stack manager and snapshot codec.
#[derive(Debug, Error)]
pub enum StackError {
    /// Pushed screens must implement the lifecycle capability. This is a
    /// programming error on the caller's side; the stack is left untouched.
    #[error("screen `{0}` does not implement the stack lifecycle")]
    LifecycleRequired(String),
    /// No factory is registered for a screen kind found in a snapshot.
    #[error("no screen factory registered for kind `{0}`")]
    UnknownKind(String),
    #[error("screen factory for kind `{kind}` rejected its arguments: {message}")]
    BadScreenArgs { kind: String, message: String },
    #[error("snapshot codec error: {0}")]
    Codec(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
