use crate::{CursorError, Result, Value};

/// Forward-only reader over one or more ordered result sets.
///
/// A cursor is positioned *before* the first record of its first result set
/// when handed to the traversal operations of [`CursorExt`](crate::CursorExt).
/// It cannot rewind: every record and every result set is visited at most once.
///
/// # Contract
/// * `advance_record` returns `Ok(false)` when the current result set is
///   exhausted. Exhaustion is never an error.
/// * `field_count` returns `0` when there is no active result set, for example
///   after a statement that does not produce rows.
/// * `advance_result_set` may be unsupported, in which case it fails with
///   [`CursorError::Unsupported`]. It returns `Ok(false)` when there are no more
///   result sets.
/// * `close` is idempotent: closing an already closed cursor succeeds and does
///   nothing. After closing only `close` and `is_closed` are meaningful.
pub trait Cursor {
    /// Move to the next record of the current result set.
    fn advance_record(&mut self) -> Result<bool>;
    /// Number of columns of the current result set.
    fn field_count(&self) -> usize;
    /// Label of the column at `index` in the current result set.
    fn field_name(&self, index: usize) -> Option<&str>;
    /// Field at `index` of the current record.
    fn value(&self, index: usize) -> Result<Value>;
    /// Move to the next result set, discarding what is left of the current one.
    fn advance_result_set(&mut self) -> Result<bool> {
        Err(CursorError::Unsupported.into())
    }
    /// Release the resources held by the cursor.
    fn close(&mut self) -> Result<()>;
    fn is_closed(&self) -> bool;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn advance_record(&mut self) -> Result<bool> {
        (**self).advance_record()
    }
    fn field_count(&self) -> usize {
        (**self).field_count()
    }
    fn field_name(&self, index: usize) -> Option<&str> {
        (**self).field_name(index)
    }
    fn value(&self, index: usize) -> Result<Value> {
        (**self).value(index)
    }
    fn advance_result_set(&mut self) -> Result<bool> {
        (**self).advance_result_set()
    }
    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    fn advance_record(&mut self) -> Result<bool> {
        (**self).advance_record()
    }
    fn field_count(&self) -> usize {
        (**self).field_count()
    }
    fn field_name(&self, index: usize) -> Option<&str> {
        (**self).field_name(index)
    }
    fn value(&self, index: usize) -> Result<Value> {
        (**self).value(index)
    }
    fn advance_result_set(&mut self) -> Result<bool> {
        (**self).advance_result_set()
    }
    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}
