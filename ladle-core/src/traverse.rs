use crate::{AsValue, Cursor, CursorError, CursorGuard, Hydrator, Result, RowLabeled};

/// Callback invoked once per record by [`CursorExt::for_each_result`].
pub type RecordCallback<'a, C> = &'a mut dyn FnMut(&mut C) -> Result<()>;

/// Traversal operations available on every [`Cursor`].
///
/// Operations returning `&mut Self` hand back the same cursor so traversals
/// can be chained:
///
/// ```rust
/// use ladle_core::{CursorExt, MemoryCursor, ResultSet, Result};
///
/// # fn main() -> Result<()> {
/// let mut cursor = MemoryCursor::new([
///     ResultSet::new(["id"]).with_row([1.into()]),
///     ResultSet::new(["id"]).with_row([2.into()]).with_row([3.into()]),
/// ]);
/// let mut ids = Vec::<i32>::new();
/// cursor
///     .for_each_record(false, |c| Ok(ids.push(c.get("id")?)))?
///     .next_result_safely()
///     .for_each_record(true, |c| Ok(ids.push(c.get("id")?)))?;
/// assert_eq!(ids, [1, 2, 3]);
/// # Ok(())
/// # }
/// ```
///
/// # Closing
/// `close_on_complete` decides whether the operation closes the cursor when it
/// completes. Failures escaping a callback of [`for_each_record`] close the
/// cursor regardless of the flag, the position of the cursor cannot be trusted
/// anymore at that point.
///
/// [`for_each_record`]: CursorExt::for_each_record
pub trait CursorExt: Cursor {
    /// Materialize a single record.
    ///
    /// With `do_advance` the cursor is advanced first and `Ok(None)` is returned,
    /// leaving the cursor open, when no record is available. A failing advance
    /// closes the cursor if `close_on_complete` is set. Without it the
    /// cursor must already be positioned on a record. The instance is populated
    /// by [`Hydrator::populate_self`] which honours `close_on_complete`.
    fn fill_object<T>(&mut self, close_on_complete: bool, do_advance: bool) -> Result<Option<T>>
    where
        T: Hydrator + Default,
    {
        if do_advance {
            let mut cursor = CursorGuard::new(&mut *self, close_on_complete);
            let found = cursor.advance_record()?;
            cursor.set_close(false);
            if !found {
                return Ok(None);
            }
        }
        let mut result = T::default();
        result.populate_self(self, close_on_complete)?;
        Ok(Some(result))
    }

    /// Advance and populate `target` from the next record, keeping the cursor
    /// open. A default instance is created when `target` is `None`. Nothing
    /// changes when the result set is exhausted.
    fn fill_object_into<T>(&mut self, target: &mut Option<T>) -> Result<&mut Self>
    where
        T: Hydrator + Default,
    {
        if self.advance_record()? {
            target
                .get_or_insert_with(T::default)
                .populate_self(&mut *self, false)?;
        }
        Ok(self)
    }

    /// Materialize every remaining record of the current result set.
    fn fill_collection<T>(&mut self, close_on_complete: bool) -> Result<Vec<T>>
    where
        T: Hydrator + Default,
    {
        let mut result = Vec::new();
        T::populate_into(self, close_on_complete, &mut result)?;
        Ok(result)
    }

    /// Append every remaining record of the current result set to `target`,
    /// keeping the cursor open.
    fn fill_collection_into<T, E>(&mut self, target: &mut E) -> Result<&mut Self>
    where
        T: Hydrator + Default,
        E: Extend<T>,
    {
        T::populate_into(&mut *self, false, target)?;
        Ok(self)
    }

    /// Invoke `callback` once per remaining record of the current result set.
    fn for_each_record<F>(&mut self, close_on_complete: bool, mut callback: F) -> Result<&mut Self>
    where
        F: FnMut(&mut Self) -> Result<()>,
    {
        {
            let mut cursor = CursorGuard::new(&mut *self, true);
            while cursor.advance_record()? {
                callback(&mut *cursor)?;
            }
            cursor.set_close(close_on_complete);
        }
        Ok(self)
    }

    /// Walk consecutive result sets, one callback per result set.
    ///
    /// Callback `i` is invoked for every record of result set `i`. The cursor is
    /// always closed when this returns. When the cursor runs out of result sets
    /// before the callbacks are over, the walk stops with
    /// [`CursorError::ResultSetMismatch`].
    fn for_each_result(&mut self, callbacks: &mut [RecordCallback<'_, Self>]) -> Result<()> {
        let declared = callbacks.len();
        let mut cursor = CursorGuard::new(self, true);
        for (i, callback) in callbacks.iter_mut().enumerate() {
            if i > 0 && !cursor.try_next_result() {
                return Err(CursorError::ResultSetMismatch {
                    declared,
                    available: i,
                }
                .into());
            }
            cursor.for_each_record(false, |c| callback(c))?;
        }
        Ok(())
    }

    /// Move to the next result set, ignoring any failure.
    fn next_result_safely(&mut self) -> &mut Self {
        self.try_next_result();
        self
    }

    /// Close the cursor, ignoring any failure. Does nothing on a closed cursor.
    fn close_safely(&mut self) {
        if self.is_closed() {
            return;
        }
        if let Err(e) = self.close() {
            log::debug!("Ignoring the failure while closing the cursor: {:#}", e);
        }
    }

    /// Invoke `callback` when the current result set has no columns, this is
    /// the case for statements that do not produce a result set. Never moves
    /// the cursor.
    fn no_record<F: FnOnce()>(&mut self, callback: F) -> &mut Self {
        if self.field_count() == 0 {
            callback();
        }
        self
    }

    #[doc(hidden)]
    fn try_next_result(&mut self) -> bool {
        match self.advance_result_set() {
            Ok(advanced) => advanced,
            Err(e) => {
                log::debug!("Ignoring the failure while advancing the result set: {:#}", e);
                false
            }
        }
    }

    /// Position of the column `name`. Exact matches win over case insensitive ones.
    fn field_index(&self, name: &str) -> Option<usize> {
        let count = self.field_count();
        (0..count)
            .find(|i| self.field_name(*i) == Some(name))
            .or_else(|| {
                (0..count).find(|i| {
                    self.field_name(*i)
                        .is_some_and(|v| v.eq_ignore_ascii_case(name))
                })
            })
    }

    /// Convert the field `name` of the current record.
    fn get<T: AsValue>(&self, name: &str) -> Result<T> {
        let index = self
            .field_index(name)
            .ok_or_else(|| CursorError::ColumnNotFound(name.into()))?;
        self.get_index(index)
    }

    /// Convert the field at `index` of the current record.
    fn get_index<T: AsValue>(&self, index: usize) -> Result<T> {
        let value = self.value(index)?;
        T::try_from_value(value).map_err(|e| {
            let name = self.field_name(index).unwrap_or_default();
            e.context(format!("While reading column {index} `{name}`"))
        })
    }

    /// Copy of the current record with its labels.
    fn current_row(&self) -> Result<RowLabeled> {
        let count = self.field_count();
        let labels = (0..count)
            .map(|i| self.field_name(i).unwrap_or_default().to_string())
            .collect();
        let values = (0..count).map(|i| self.value(i)).collect::<Result<_>>()?;
        Ok(RowLabeled::new(labels, values))
    }
}

impl<C: Cursor + ?Sized> CursorExt for C {}
