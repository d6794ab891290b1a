use ladle::{Cursor, CursorError, Error, Result, Value};

/// Wraps a cursor and records how the traversal engine drives it.
///
/// Can also simulate a cursor failing to close or lacking result set support.
#[derive(Debug)]
pub struct ProbeCursor<C: Cursor> {
    inner: C,
    closes: usize,
    record_advances: usize,
    result_set_advances: usize,
    fail_close: bool,
    single_result: bool,
}

impl<C: Cursor> ProbeCursor<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            closes: 0,
            record_advances: 0,
            result_set_advances: 0,
            fail_close: false,
            single_result: false,
        }
    }
    /// `close` releases the inner cursor then reports a failure.
    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }
    /// `advance_result_set` fails with [`CursorError::Unsupported`].
    pub fn single_result(mut self) -> Self {
        self.single_result = true;
        self
    }
    /// Number of calls to `close`.
    pub fn closes(&self) -> usize {
        self.closes
    }
    /// Number of calls to `advance_record`.
    pub fn record_advances(&self) -> usize {
        self.record_advances
    }
    /// Number of calls to `advance_result_set`.
    pub fn result_set_advances(&self) -> usize {
        self.result_set_advances
    }
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Cursor> Cursor for ProbeCursor<C> {
    fn advance_record(&mut self) -> Result<bool> {
        self.record_advances += 1;
        self.inner.advance_record()
    }
    fn field_count(&self) -> usize {
        self.inner.field_count()
    }
    fn field_name(&self, index: usize) -> Option<&str> {
        self.inner.field_name(index)
    }
    fn value(&self, index: usize) -> Result<Value> {
        self.inner.value(index)
    }
    fn advance_result_set(&mut self) -> Result<bool> {
        self.result_set_advances += 1;
        if self.single_result {
            return Err(CursorError::Unsupported.into());
        }
        self.inner.advance_result_set()
    }
    fn close(&mut self) -> Result<()> {
        self.closes += 1;
        self.inner.close()?;
        if self.fail_close {
            return Err(Error::msg("Simulated failure while closing the cursor"));
        }
        Ok(())
    }
    fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}
