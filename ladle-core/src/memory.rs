use crate::{Cursor, CursorError, Result, Row, RowNames, Value};
use std::collections::VecDeque;

/// In-memory result set: column labels and rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    labels: RowNames,
    rows: Vec<Row>,
}

impl ResultSet {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }
    /// Result set of a statement that produced no columns.
    pub fn without_columns() -> Self {
        Self::default()
    }
    pub fn with_row(mut self, row: impl IntoIterator<Item = Value>) -> Self {
        self.rows.push(row.into_iter().collect());
        self
    }
    pub fn labels(&self) -> &RowNames {
        &self.labels
    }
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// [`Cursor`] over result sets held in memory.
#[derive(Debug, Default)]
pub struct MemoryCursor {
    current: Option<ResultSet>,
    pending: VecDeque<ResultSet>,
    position: usize,
    closed: bool,
}

impl MemoryCursor {
    pub fn new(results: impl IntoIterator<Item = ResultSet>) -> Self {
        let mut pending: VecDeque<_> = results.into_iter().collect();
        Self {
            current: pending.pop_front(),
            pending,
            position: 0,
            closed: false,
        }
    }
    fn record(&self) -> Option<&Row> {
        self.current
            .as_ref()
            .and_then(|set| set.rows.get(self.position.checked_sub(1)?))
    }
}

impl Cursor for MemoryCursor {
    fn advance_record(&mut self) -> Result<bool> {
        if self.closed {
            return Err(CursorError::Closed.into());
        }
        let Some(set) = &self.current else {
            return Ok(false);
        };
        let len = set.rows.len();
        if self.position <= len {
            self.position += 1;
        }
        Ok(self.position <= len)
    }
    fn field_count(&self) -> usize {
        self.current.as_ref().map_or(0, |v| v.labels.len())
    }
    fn field_name(&self, index: usize) -> Option<&str> {
        self.current
            .as_ref()
            .and_then(|v| v.labels.get(index))
            .map(String::as_str)
    }
    fn value(&self, index: usize) -> Result<Value> {
        if self.closed {
            return Err(CursorError::Closed.into());
        }
        let row = self.record().ok_or(CursorError::NoCurrentRecord)?;
        row.get(index).cloned().ok_or_else(|| {
            CursorError::IndexOutOfRange {
                index,
                count: row.len(),
            }
            .into()
        })
    }
    fn advance_result_set(&mut self) -> Result<bool> {
        if self.closed {
            return Err(CursorError::Closed.into());
        }
        self.current = self.pending.pop_front();
        self.position = 0;
        Ok(self.current.is_some())
    }
    fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.current = None;
        self.pending.clear();
        Ok(())
    }
    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryCursor, ResultSet};
    use crate::{Cursor, CursorError, Value};

    #[test]
    fn memory_cursor_walks_records_and_sets() {
        let mut cursor = MemoryCursor::new([
            ResultSet::new(["a"]).with_row([1.into()]),
            ResultSet::without_columns(),
        ]);
        assert_eq!(cursor.field_count(), 1);
        assert_eq!(cursor.field_name(0), Some("a"));
        assert!(cursor.value(0).is_err());
        assert!(cursor.advance_record().unwrap());
        assert_eq!(cursor.value(0).unwrap(), Value::Int32(Some(1)));
        assert!(matches!(
            cursor.value(1).unwrap_err().downcast_ref::<CursorError>(),
            Some(CursorError::IndexOutOfRange { index: 1, count: 1 })
        ));
        assert!(!cursor.advance_record().unwrap());
        assert!(!cursor.advance_record().unwrap());
        assert!(cursor.value(0).is_err());
        assert!(cursor.advance_result_set().unwrap());
        assert_eq!(cursor.field_count(), 0);
        assert!(!cursor.advance_record().unwrap());
        assert!(!cursor.advance_result_set().unwrap());
        assert!(!cursor.advance_record().unwrap());
    }

    #[test]
    fn memory_cursor_close() {
        let mut cursor = MemoryCursor::new([ResultSet::new(["a"]).with_row([1.into()])]);
        cursor.close().unwrap();
        assert!(cursor.is_closed());
        assert_eq!(cursor.field_count(), 0);
        cursor.close().expect("Closing twice must succeed");
        assert!(matches!(
            cursor.advance_record().unwrap_err().downcast_ref::<CursorError>(),
            Some(CursorError::Closed)
        ));
        assert!(cursor.advance_result_set().is_err());
    }
}
