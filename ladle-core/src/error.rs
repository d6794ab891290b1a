/// Conditions raised by cursors and by the traversal engine that callers may
/// want to tell apart.
///
/// They travel inside [`Error`](crate::Error), recover them with
/// `error.downcast_ref::<CursorError>()`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    #[error("The cursor is closed")]
    Closed,
    #[error("The cursor is not positioned on a record")]
    NoCurrentRecord,
    #[error("The cursor does not support advancing to the next result set")]
    Unsupported,
    #[error("Column `{0}` does not exist in the current result set")]
    ColumnNotFound(String),
    #[error("Column index {index} is out of range, the current result set has {count} columns")]
    IndexOutOfRange { index: usize, count: usize },
    #[error(
        "Expected {declared} result sets but the cursor produced only {available}"
    )]
    ResultSetMismatch { declared: usize, available: usize },
}
